//! Main console struct integrating all components
//!
//! [`Console::scan`] is the single entry point for input: live bytes and
//! macro playback both go through it. On carriage return the line is parsed
//! and either handled here (subsystem switch, built-ins) or handed to the
//! application's [`Dispatch`].

use core::fmt::Write;

use crate::config::{SessionConfig, PROMPT};
use crate::io::ByteSource;
use super::ansi::{BACKSPACE, BELL, BS, CLS, CR, CRLF, DELETE, HOME, LF};
use super::commands::{Category, CommandId, CommandTable};
use super::escape::{EscapeDecoder, EscapeEvent, EscapeKey, ESC};
use super::dispatch::SessionView;
use super::help::{self, HelpView, UNKNOWN_NOTICE};
use super::macros::MacroBuffer;
use super::parser::{parse_line, ParsedLine};
use super::{ConsoleError, Dispatch, History, Invocation, LineBuffer};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console state machine
pub struct Console {
    table: CommandTable,
    line: LineBuffer,
    history: History,
    escape: EscapeDecoder,
    macros: MacroBuffer,
    /// Table index of the active subsystem root
    active: Option<usize>,
    echo: bool,
    bold: bool,
    last_error: Option<ConsoleError>,
    reboot_requested: bool,
}

impl Console {
    /// Create new console with default session flags
    pub fn new(table: CommandTable) -> Self {
        Self::with_config(table, SessionConfig::default())
    }

    pub fn with_config(table: CommandTable, config: SessionConfig) -> Self {
        Self {
            table,
            line: LineBuffer::new(),
            history: History::new(),
            escape: EscapeDecoder::new(),
            macros: MacroBuffer::new(),
            active: None,
            echo: config.echo,
            bold: config.bold,
            last_error: None,
            reboot_requested: false,
        }
    }

    /// Process a single input byte
    ///
    /// Returns `true` exactly when a non-empty line was submitted and
    /// processed.
    pub fn scan(&mut self, byte: u8, out: &mut dyn Write, handler: &mut dyn Dispatch) -> bool {
        match byte {
            CR => return self.submit(out, handler),
            BACKSPACE => {
                self.erase_last(out);
                return false;
            }
            DELETE => {
                self.erase_line(out);
                return false;
            }
            _ => {}
        }

        if byte == ESC || self.escape.is_collecting() {
            match self.escape.feed(byte) {
                EscapeEvent::Pending => {}
                EscapeEvent::Key(key) => self.handle_key(key, out),
                EscapeEvent::Rejected(e) => self.bell(out, Some(e)),
            }
            return false;
        }

        match byte {
            // Companion of CR, dropped
            LF => {}
            0x20..=0x7E => {
                if !self.line.push(byte) {
                    self.bell(out, Some(ConsoleError::LineOverflow));
                } else if self.echo {
                    let _ = out.write_char(char::from(byte));
                }
            }
            _ => self.bell(out, None),
        }

        false
    }

    /// One iteration of the host loop: a live byte if one is waiting, then
    /// one macro step.
    ///
    /// While a macro plays, live input stays in `input` until playback ends.
    pub fn poll(
        &mut self,
        input: &mut dyn ByteSource,
        out: &mut dyn Write,
        handler: &mut dyn Dispatch,
    ) -> bool {
        if self.macros.is_playing() {
            return self.step_macro(out, handler);
        }

        let mut submitted = false;
        if input.has_next() {
            if let Some(byte) = input.next_byte() {
                submitted = self.scan(byte, out, handler);
            }
        }
        submitted | self.step_macro(out, handler)
    }

    /// Play back one macro byte; after the last one a CR is injected so the
    /// final command executes.
    pub fn step_macro(&mut self, out: &mut dyn Write, handler: &mut dyn Dispatch) -> bool {
        let Some(byte) = self.macros.next_byte() else {
            return false;
        };

        let mut submitted = self.scan(byte, out, handler);

        if !self.macros.has_next() && self.macros.is_playing() {
            // Still flagged as playing so a trailing Run cannot restart it.
            submitted |= self.scan(CR, out, handler);
            self.macros.stop();
            log::debug!("macro playback finished");
        }

        submitted
    }

    fn submit(&mut self, out: &mut dyn Write, handler: &mut dyn Dispatch) -> bool {
        let _ = out.write_str(CRLF);

        let line = core::mem::take(&mut self.line);
        self.escape.reset();

        let submitted = !line.is_empty();
        if submitted {
            self.history.push(line.as_bytes());
            self.process(line.as_str(), out, handler);
        }

        self.print_prompt(out);
        submitted
    }

    fn erase_last(&mut self, out: &mut dyn Write) {
        if self.line.pop().is_some() {
            let _ = out.write_str(BS);
        } else {
            self.bell(out, None);
        }
    }

    fn erase_line(&mut self, out: &mut dyn Write) {
        while self.line.pop().is_some() {
            let _ = out.write_str(BS);
        }
    }

    fn handle_key(&mut self, key: EscapeKey, out: &mut dyn Write) {
        match key {
            EscapeKey::CursorLeft => self.erase_last(out),
            EscapeKey::CursorUp => self.recall(out),
            EscapeKey::CursorRight | EscapeKey::CursorDown => {}
        }
    }

    /// Replace the current line with the last submitted one
    fn recall(&mut self, out: &mut dyn Write) {
        self.erase_line(out);
        if let Some(prev) = self.history.last() {
            self.line.set(prev.as_bytes());
        }
        let _ = out.write_str(self.line.as_str());
    }

    fn bell(&mut self, out: &mut dyn Write, error: Option<ConsoleError>) {
        let _ = out.write_char(BELL);
        if let Some(e) = error {
            log::trace!("input rejected: {}", e);
            self.last_error = Some(e);
        }
    }

    fn view(&self) -> HelpView {
        HelpView {
            active: self.active,
            bold: self.bold,
        }
    }

    /// Session snapshot handed to the application
    pub fn session(&self) -> SessionView {
        SessionView {
            active: self.active,
            echo: self.echo,
            bold: self.bold,
        }
    }

    fn process(&mut self, line: &str, out: &mut dyn Write, handler: &mut dyn Dispatch) {
        let parsed = parse_line(&self.table, line, self.active);
        self.last_error = parsed.error;

        let Some(index) = parsed.index else {
            log::debug!("unknown command: {}", line);
            let _ = out.write_str(UNKNOWN_NOTICE);
            return;
        };
        let Some(cmd) = self.table.get(index) else {
            return;
        };

        if parsed.is_valid()
            && parsed.expected == 0
            && parsed.found == 0
            && cmd.category == Category::Subsystem
        {
            log::info!("subsystem {} active", cmd.name);
            self.active = Some(index);
            return;
        }

        let Some(id) = parsed.id.filter(|_| parsed.error.is_none()) else {
            log::debug!("syntax error in '{}': {:?}", cmd.name, parsed.error);
            help::render_command(out, &self.table, self.view(), "Syntax: ", index, ".\r\n");
            return;
        };

        if id.is_builtin() {
            self.builtin(id, &parsed, out);
        } else {
            log::debug!("dispatch {} ({}), {} param(s)", cmd.name, id, parsed.params.len());
            let subsystem = self.active.and_then(|i| self.table.get(i));
            handler.on_command(
                &Invocation {
                    id,
                    command: cmd,
                    params: &parsed.params,
                    subsystem,
                    session: self.session(),
                },
                out,
            );
        }
    }

    fn builtin(&mut self, id: CommandId, parsed: &ParsedLine, out: &mut dyn Write) {
        let params = &parsed.params;
        match id {
            CommandId::IDLE => {
                log::info!("subsystem deselected");
                self.active = None;
            }
            CommandId::ECHO => {
                if let Some(on) = params.bool_at(0) {
                    self.echo = on;
                }
            }
            CommandId::BOLD => {
                if let Some(on) = params.bool_at(0) {
                    self.bold = on;
                }
            }
            CommandId::CLS => {
                let _ = out.write_str(CLS);
                let _ = out.write_str(HOME);
            }
            CommandId::BOOT => {
                log::warn!("reboot requested");
                self.reboot_requested = true;
            }
            CommandId::MACRO => {
                if self.refuse_while_playing(out) {
                    return;
                }
                let text = params.str_at(0).unwrap_or("");
                log::info!("macro defined: {}", text);
                self.macros.define(text);
            }
            CommandId::RUN => {
                if self.refuse_while_playing(out) {
                    return;
                }
                log::info!("macro started");
                self.macros.start();
            }
            CommandId::MACROS => {
                let _ = out.write_str("[Macro]\r\n");
                match self.macros.text() {
                    Some(text) => {
                        let _ = write!(out, "Value={}\r\n", text);
                    }
                    None => {
                        let _ = out.write_str(";No Macro Defined\r\n");
                    }
                }
            }
            CommandId::HELP => match params.str_at(0) {
                Some(name) => help::render_topic(out, &self.table, self.view(), name),
                None => help::render_listing(out, &self.table, self.view()),
            },
            _ => {
                log::warn!("reserved command id {} has no built-in", id);
            }
        }
    }

    fn refuse_while_playing(&mut self, out: &mut dyn Write) -> bool {
        if !self.macros.is_playing() {
            return false;
        }
        let e = ConsoleError::MacroBusy;
        log::warn!("{}", e);
        let _ = write!(out, "{}\r\n", e);
        self.last_error = Some(e);
        true
    }

    /// Print the prompt: `CMD>` or the active subsystem's name
    pub fn print_prompt(&self, out: &mut dyn Write) {
        match self.active.and_then(|i| self.table.get(i)) {
            Some(root) => {
                let _ = write!(out, "{}>", root.name);
            }
            None => {
                let _ = out.write_str(PROMPT);
            }
        }
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = write!(out, "\r\n{}\r\n", VERSION);
        let _ = out.write_str("Type 'Help' for a list of available commands.\r\n\r\n");
        self.print_prompt(out);
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Table index of the active subsystem root
    pub fn active_subsystem(&self) -> Option<usize> {
        self.active
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Line being edited
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Last submitted line
    pub fn last_line(&self) -> Option<&str> {
        self.history.last()
    }

    /// Error recorded by the most recent line or rejected byte
    pub fn last_error(&self) -> Option<ConsoleError> {
        self.last_error
    }

    /// Returns `true` once after `Boot` was executed
    pub fn take_reboot_request(&mut self) -> bool {
        core::mem::take(&mut self.reboot_requested)
    }

    /// Stored macro text, encoded
    pub fn macro_text(&self) -> Option<&str> {
        self.macros.text()
    }

    pub fn macro_has_next(&self) -> bool {
        self.macros.has_next()
    }

    pub fn macro_playing(&self) -> bool {
        self.macros.is_playing()
    }
}
