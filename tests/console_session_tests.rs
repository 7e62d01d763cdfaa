//! End-to-end console tests: bytes in, terminal output and dispatches out

mod common;

use common::{feed, quiet_console, table, Recorder, CID_INT, CID_PING, CID_SECRET, TEST};
use serial_cmdb::console::help::UNKNOWN_NOTICE;
use serial_cmdb::{Console, ConsoleError, Param, SessionConfig, SessionView, SliceSource};

#[test]
fn test_banner_and_prompt() {
    let console = Console::new(table());
    let mut out = String::new();
    console.print_banner(&mut out);

    assert!(out.contains("Cmdb v"));
    assert!(out.contains("Type 'Help'"));
    assert!(out.ends_with("CMD>"));
}

#[test]
fn test_subsystem_round_trip() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    assert_eq!(feed(&mut console, "Test\r", &mut out, &mut rec), 1);
    assert_eq!(console.active_subsystem(), Some(TEST));
    assert_eq!(out, "\r\nTest>");

    out.clear();
    feed(&mut console, "Int 42\r", &mut out, &mut rec);
    assert_eq!(out, "\r\n<Int>Test>");
    assert_eq!(rec.calls.len(), 1);
    assert_eq!(rec.calls[0].id, CID_INT);
    assert_eq!(rec.calls[0].params, vec![Param::Int(42)]);
    assert_eq!(rec.calls[0].subsystem, Some("Test"));

    out.clear();
    feed(&mut console, "Idle\r", &mut out, &mut rec);
    assert_eq!(console.active_subsystem(), None);
    assert_eq!(out, "\r\nCMD>");
}

#[test]
fn test_member_unknown_outside_subsystem() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Int 42\r", &mut out, &mut rec);

    assert!(rec.calls.is_empty());
    assert_eq!(out, format!("\r\n{}CMD>", UNKNOWN_NOTICE));
    assert_eq!(console.last_error(), Some(ConsoleError::UnknownCommand));
}

#[test]
fn test_wrong_argument_count_prints_syntax() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Test\rInt\r", &mut out, &mut rec);

    assert!(rec.calls.is_empty());
    let syntax = format!("{:<40}- * Int as parameter.\r\nParams: dummy\r\n", "Syntax: Int int");
    assert!(out.contains(&syntax), "{:?}", out);
    assert_eq!(
        console.last_error(),
        Some(ConsoleError::ArgumentCount { expected: 1, found: 0 })
    );
}

#[test]
fn test_out_of_range_argument_is_not_dispatched() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Test\rInt 99999\r", &mut out, &mut rec);

    assert!(rec.calls.is_empty());
    assert!(out.contains("Syntax: Int int"));
    assert_eq!(console.last_error(), Some(ConsoleError::ArgumentRange(1)));
}

#[test]
fn test_subsystem_with_arguments_is_rejected() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Test 1\r", &mut out, &mut rec);

    assert_eq!(console.active_subsystem(), None);
    assert!(out.contains("(dormant subsystem)."));
}

#[test]
fn test_global_and_hidden_dispatch() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "ping 10 node7\rsecret\r", &mut out, &mut rec);

    assert_eq!(rec.calls.len(), 2);
    assert_eq!(rec.calls[0].id, CID_PING);
    assert_eq!(rec.calls[0].params[0].as_byte(), Some(0x10));
    assert_eq!(rec.calls[0].params[1].as_str(), Some("node7"));
    assert_eq!(rec.calls[0].subsystem, None);
    assert_eq!(rec.calls[1].id, CID_SECRET);
}

#[test]
fn test_empty_line_prints_prompt_only() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    assert_eq!(feed(&mut console, "\r", &mut out, &mut rec), 0);
    assert_eq!(out, "\r\nCMD>");
}

#[test]
fn test_line_feed_is_dropped() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Idle\r\n", &mut out, &mut rec);

    assert_eq!(out, "\r\nCMD>");
    assert_eq!(console.line(), "");
}

#[test]
fn test_echo_and_echo_off() {
    let mut console = Console::new(table());
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Cls", &mut out, &mut rec);
    assert_eq!(out, "Cls");

    out.clear();
    feed(&mut console, "\rEcho 0\r", &mut out, &mut rec);
    assert!(!console.echo());

    out.clear();
    feed(&mut console, "Idle", &mut out, &mut rec);
    assert!(out.is_empty());
    assert_eq!(console.line(), "Idle");
}

#[test]
fn test_bold_toggle() {
    let mut console = Console::new(table());
    let mut out = String::new();
    let mut rec = Recorder::default();

    assert!(console.bold());
    feed(&mut console, "Bold 0\r", &mut out, &mut rec);
    assert!(!console.bold());
}

#[test]
fn test_cls_clears_and_homes() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Cls\r", &mut out, &mut rec);
    assert_eq!(out, "\r\n\x1b[2J\x1b[HCMD>");
}

#[test]
fn test_boot_sets_reboot_request_once() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    assert!(!console.take_reboot_request());
    feed(&mut console, "Boot\r", &mut out, &mut rec);
    assert!(console.take_reboot_request());
    assert!(!console.take_reboot_request());
}

#[test]
fn test_backspace() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "\x08", &mut out, &mut rec);
    assert_eq!(out, "\x07");

    out.clear();
    feed(&mut console, "ab\x08", &mut out, &mut rec);
    assert_eq!(console.line(), "a");
    assert_eq!(out, "\x08 \x08");
}

#[test]
fn test_delete_clears_line() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "abc\x7f", &mut out, &mut rec);
    assert_eq!(console.line(), "");
    assert_eq!(out, "\x08 \x08".repeat(3));
}

#[test]
fn test_cursor_up_recalls_last_line() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Help Idle\r", &mut out, &mut rec);
    out.clear();
    feed(&mut console, "xy\x1b[A", &mut out, &mut rec);

    assert_eq!(console.line(), "Help Idle");
    assert_eq!(out, "\x08 \x08\x08 \x08Help Idle");
    assert_eq!(console.last_line(), Some("Help Idle"));
}

#[test]
fn test_cursor_left_erases() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "ab\x1b[D\x1b[C", &mut out, &mut rec);
    assert_eq!(console.line(), "a");
}

#[test]
fn test_unknown_escape_rings_bell() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "\x1b[Zok", &mut out, &mut rec);

    assert_eq!(out, "\x07");
    assert_eq!(console.line(), "ok");
    assert_eq!(console.last_error(), Some(ConsoleError::UnrecognizedEscape));
}

#[test]
fn test_escape_overflow_rings_bell() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "\x1b[1234", &mut out, &mut rec);

    assert_eq!(out, "\x07");
    assert_eq!(console.last_error(), Some(ConsoleError::EscapeOverflow));
}

#[test]
fn test_line_overflow_rings_bell() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    let long = "a".repeat(133);
    feed(&mut console, &long, &mut out, &mut rec);

    assert_eq!(console.line().len(), 132);
    assert_eq!(out, "\x07");
    assert_eq!(console.last_error(), Some(ConsoleError::LineOverflow));
}

#[test]
fn test_control_byte_rings_bell() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "\x01", &mut out, &mut rec);
    assert_eq!(out, "\x07");
    assert_eq!(console.line(), "");
}

#[test]
fn test_poll_reads_from_source() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();
    let mut input = SliceSource::new(b"Test\rInt 7\r");

    let mut processed = 0;
    while !input.remaining().is_empty() {
        if console.poll(&mut input, &mut out, &mut rec) {
            processed += 1;
        }
    }

    assert_eq!(processed, 2);
    assert_eq!(rec.calls.len(), 1);
    assert_eq!(rec.calls[0].params, vec![Param::Int(7)]);
}

#[test]
fn test_closure_dispatcher() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut seen = Vec::new();
    let mut handler = |cmd: &serial_cmdb::Invocation<'_>, _out: &mut dyn core::fmt::Write| {
        seen.push(cmd.params.int_at(0));
    };

    for b in "Test\rInt -3\r".bytes() {
        console.scan(b, &mut out, &mut handler);
    }

    assert_eq!(seen, vec![Some(-3)]);
}

#[test]
fn test_help_lists_top_level_commands() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    assert_eq!(feed(&mut console, "Help\r", &mut out, &mut rec), 1);

    assert!(out.contains("        Test"));
    assert!(out.contains("        Ping byte[h] string"));
    assert!(!out.contains(" Int int"));
    assert!(out.ends_with("(global command).\r\n\r\nCMD>"));
    assert!(rec.calls.is_empty());
}

#[test]
fn test_help_inside_subsystem_shows_members() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Test\r", &mut out, &mut rec);
    out.clear();
    feed(&mut console, "help\r", &mut out, &mut rec);

    assert!(out.contains(&format!("{:<40}- * Int as parameter,", "         Int int")));
    assert!(out.contains("(active subsystem),"));
    assert!(out.ends_with("Test>"));
}

#[test]
fn test_help_topic_through_console() {
    let mut console = quiet_console();
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Help Test\r", &mut out, &mut rec);
    assert!(out.contains("Test subsystem commands:\r\n\r\n"));
    assert!(out.contains("         Int int"));
}

#[test]
fn test_handler_sees_session_state() {
    let mut console = Console::with_config(table(), SessionConfig { echo: false, bold: true });
    let mut out = String::new();
    let mut rec = Recorder::default();

    feed(&mut console, "Test\rInt 1\r", &mut out, &mut rec);

    assert_eq!(
        rec.calls[0].session,
        SessionView { active: Some(TEST), echo: false, bold: true }
    );
    assert_eq!(console.session(), rec.calls[0].session);
}
