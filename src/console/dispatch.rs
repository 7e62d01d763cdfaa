//! Application dispatch seam
//!
//! Commands that are neither built-ins nor subsystem switches are handed to
//! the application through [`Dispatch`]. The console never looks at what the
//! handler does.

use core::fmt::Write;

use super::commands::{CommandDescriptor, CommandId};
use super::parser::Params;

/// Read-only snapshot of the session at dispatch time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    /// Table index of the active subsystem root
    pub active: Option<usize>,
    pub echo: bool,
    pub bold: bool,
}

/// A validated command ready for the application
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub id: CommandId,
    pub command: &'static CommandDescriptor,
    pub params: &'a Params,
    /// Root command of the active subsystem, if any
    pub subsystem: Option<&'static CommandDescriptor>,
    pub session: SessionView,
}

/// Receives application commands
pub trait Dispatch {
    fn on_command(&mut self, cmd: &Invocation<'_>, out: &mut dyn Write);
}

impl<F> Dispatch for F
where
    F: FnMut(&Invocation<'_>, &mut dyn Write),
{
    fn on_command(&mut self, cmd: &Invocation<'_>, out: &mut dyn Write) {
        self(cmd, out)
    }
}
