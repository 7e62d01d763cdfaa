//! Module: config
//!
//! Purpose: Build-time limits and session defaults for the interpreter.
//!
//! Every buffer in the console is sized from these constants. Nothing here is
//! runtime-configurable except [`SessionConfig`], which only seeds the
//! session flags at construction.

/// Max (strlen) of a command line.
pub const MAX_CMD_LEN: usize = 132;

/// Max number of parameters per command.
pub const MAX_ARGS: usize = 8;

/// Max (strlen) of a string parameter.
pub const MAX_PARM_LEN: usize = 32;

/// Max size of an ANSI escape sequence, ESC included.
pub const MAX_ESC_LEN: usize = 5;

/// Range accepted by the `b` (byte) modifier.
pub const MIN_BYTE: i64 = -128;
pub const MAX_BYTE: i64 = 127;

/// Range accepted by the `h` (short) modifier.
pub const MIN_SHORT: i64 = -32768;
pub const MAX_SHORT: i64 = 32767;

/// Range accepted by unmodified integers.
///
/// The native int of the reference target is 16 bits wide.
pub const MIN_INT: i64 = -32768;
pub const MAX_INT: i64 = 32767;

/// Prompt shown when no subsystem is active.
pub const PROMPT: &str = "CMD>";

/// Column width the command name is right-aligned to in help listings.
pub const NAME_WIDTH: usize = 12;

/// Column at which help descriptions start.
pub const HELP_COLUMN: usize = 40;

/// Initial values of the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Echo typed characters back to the terminal.
    pub echo: bool,
    /// Highlight subsystem commands in help output.
    pub bold: bool,
}

impl SessionConfig {
    pub const fn new() -> Self {
        Self { echo: true, bold: true }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
