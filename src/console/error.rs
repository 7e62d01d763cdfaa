//! Console error types

use thiserror::Error;

/// Console error with code and message.
///
/// Every variant is recovered locally: the console prints a notice or rings
/// the bell and returns to its ready state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// E01: Unknown command
    #[error("E01: unknown command")]
    UnknownCommand,
    /// E02: Argument count does not match the command pattern
    #[error("E02: expected {expected} argument(s), found {found}")]
    ArgumentCount { expected: usize, found: usize },
    /// E03: Argument out of range (1-based index)
    #[error("E03: argument {0} out of range")]
    ArgumentRange(usize),
    /// E04: Argument could not be converted (1-based index)
    #[error("E04: argument {0} has an invalid format")]
    ArgumentFormat(usize),
    /// E05: Escape sequence not in the escape table
    #[error("E05: unrecognized escape sequence")]
    UnrecognizedEscape,
    /// E06: Line buffer full
    #[error("E06: line too long")]
    LineOverflow,
    /// E07: Escape buffer full
    #[error("E07: escape sequence too long")]
    EscapeOverflow,
    /// E08: Macro command issued while a macro is playing
    #[error("E08: macro is running")]
    MacroBusy,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::ArgumentCount { .. } => "E02",
            Self::ArgumentRange(_) => "E03",
            Self::ArgumentFormat(_) => "E04",
            Self::UnrecognizedEscape => "E05",
            Self::LineOverflow => "E06",
            Self::EscapeOverflow => "E07",
            Self::MacroBusy => "E08",
        }
    }

    /// 1-based index of the offending argument, if the error has one.
    pub fn argument(&self) -> Option<usize> {
        match self {
            Self::ArgumentRange(i) | Self::ArgumentFormat(i) => Some(*i),
            _ => None,
        }
    }
}

/// Reasons a command table is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("command table is empty")]
    Empty,
    #[error("mandatory command '{0}' is missing")]
    MissingMandatory(&'static str),
    #[error("command id {0} is used more than once")]
    DuplicateId(u16),
    #[error("command '{name}' refers to subsystem index {index}, which is not a subsystem")]
    BadSubsystem { name: &'static str, index: usize },
    #[error("command '{0}' has an invalid parameter pattern")]
    BadPattern(&'static str),
    #[error("command '{0}' has more parameters than allowed")]
    TooManyParams(&'static str),
}
