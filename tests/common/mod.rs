//! Shared fixtures for the console integration tests

#![allow(dead_code)]

use core::fmt::Write;

use serial_cmdb::console::commands::{BOLD, BOOT, CLS, ECHO, HELP, IDLE, MACRO, MACROS, RUN};
use serial_cmdb::{
    Category, CommandDescriptor, CommandId, CommandTable, Console, Dispatch, Invocation, Param,
    SessionConfig, SessionView,
};

pub const CID_TEST: CommandId = CommandId(1);
pub const CID_INT: CommandId = CommandId(2);
pub const CID_PING: CommandId = CommandId(3);
pub const CID_SECRET: CommandId = CommandId(4);

/// Index of the `Test` subsystem root
pub const TEST: usize = 0;

pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor::new("Test", Category::Subsystem, CID_TEST, "", "* Test Subsystem", ""),
    CommandDescriptor::new("Int", Category::Member(TEST), CID_INT, "%i", "* Int as parameter", "dummy"),
    CommandDescriptor::new("Ping", Category::Global, CID_PING, "%bx %s", "Ping a node", "node name"),
    CommandDescriptor::new("Secret", Category::Hidden, CID_SECRET, "", "Not listed", ""),
    BOOT,
    ECHO,
    BOLD,
    CLS,
    MACRO,
    RUN,
    MACROS,
    IDLE,
    HELP,
];

pub fn table() -> CommandTable {
    CommandTable::new(COMMANDS).unwrap()
}

/// Console with echo and bold off, so output is easy to compare
pub fn quiet_console() -> Console {
    Console::with_config(table(), SessionConfig { echo: false, bold: false })
}

/// One command the console handed to the application
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub id: CommandId,
    pub params: Vec<Param>,
    pub subsystem: Option<&'static str>,
    pub session: SessionView,
}

/// Dispatcher that records every call and prints a marker
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Dispatch for Recorder {
    fn on_command(&mut self, cmd: &Invocation<'_>, out: &mut dyn Write) {
        let _ = write!(out, "<{}>", cmd.command.name);
        self.calls.push(Call {
            id: cmd.id,
            params: cmd.params.iter().cloned().collect(),
            subsystem: cmd.subsystem.map(|s| s.name),
            session: cmd.session,
        });
    }
}

/// Feed every byte of `input`, return how many lines were processed
pub fn feed(console: &mut Console, input: &str, out: &mut String, rec: &mut Recorder) -> usize {
    input
        .bytes()
        .filter(|&b| console.scan(b, out, rec))
        .count()
}

/// Play the current macro to the end
pub fn play_macro(console: &mut Console, out: &mut String, rec: &mut Recorder) {
    let mut steps = 0;
    while console.macro_playing() {
        console.step_macro(out, rec);
        steps += 1;
        assert!(steps < 1000, "macro playback did not terminate");
    }
}
