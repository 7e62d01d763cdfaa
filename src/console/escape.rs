//! ANSI escape sequence collection
//!
//! Bytes following ESC are buffered until an alphabetic terminator arrives,
//! then the whole sequence is looked up in [`ESCAPE_TABLE`].

use crate::config::MAX_ESC_LEN;
use super::{ConsoleError, LineBuffer};

/// Escape byte
pub const ESC: u8 = 0x1B;

/// Cursor keys recognized by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeKey {
    CursorUp,
    CursorDown,
    CursorRight,
    CursorLeft,
}

/// Known sequences, matched byte for byte
pub const ESCAPE_TABLE: &[(&[u8], EscapeKey)] = &[
    (b"\x1b[A", EscapeKey::CursorUp),
    (b"\x1b[B", EscapeKey::CursorDown),
    (b"\x1b[C", EscapeKey::CursorRight),
    (b"\x1b[D", EscapeKey::CursorLeft),
];

/// Look a complete sequence up in the escape table
pub fn lookup(seq: &[u8]) -> Option<EscapeKey> {
    ESCAPE_TABLE
        .iter()
        .find(|(code, _)| *code == seq)
        .map(|(_, key)| *key)
}

/// Result of feeding one byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeEvent {
    /// Sequence still incomplete
    Pending,
    /// Sequence complete and recognized
    Key(EscapeKey),
    /// Sequence complete but unknown, or too long
    Rejected(ConsoleError),
}

/// Escape collection state
#[derive(Debug, Default, Clone)]
pub struct EscapeDecoder {
    buf: LineBuffer<MAX_ESC_LEN>,
}

impl EscapeDecoder {
    pub const fn new() -> Self {
        Self {
            buf: LineBuffer::new(),
        }
    }

    /// True while a sequence is being collected
    pub fn is_collecting(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Discard any partial sequence
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Feed a byte. The caller routes ESC and every byte that arrives while
    /// [`is_collecting`](Self::is_collecting) is true.
    pub fn feed(&mut self, byte: u8) -> EscapeEvent {
        if byte == ESC {
            // A new ESC abandons whatever was collected so far.
            self.buf.clear();
        }

        if !self.buf.push(byte) {
            self.buf.clear();
            return EscapeEvent::Rejected(ConsoleError::EscapeOverflow);
        }

        if !byte.is_ascii_alphabetic() {
            return EscapeEvent::Pending;
        }

        let event = match lookup(self.buf.as_bytes()) {
            Some(key) => EscapeEvent::Key(key),
            None => EscapeEvent::Rejected(ConsoleError::UnrecognizedEscape),
        };
        self.buf.clear();
        event
    }
}
