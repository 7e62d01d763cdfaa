//! Control bytes and ANSI sequences written to the terminal

pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const BELL: char = '\x07';
pub const BACKSPACE: u8 = 0x08;
pub const DELETE: u8 = 0x7F;

pub const CRLF: &str = "\r\n";

/// Destructive backspace: step back, blank, step back
pub const BS: &str = "\x08 \x08";

pub const BOLD_ON: &str = "\x1b[1m";
pub const BOLD_OFF: &str = "\x1b[0m";
pub const CLS: &str = "\x1b[2J";
pub const HOME: &str = "\x1b[H";
