//! Macro storage and playback
//!
//! A macro is a single stored line in which `_` stands for a space and `|`
//! for a carriage return, e.g. `Test|Int_42|Idle`. Playback hands the decoded
//! bytes back one at a time so they can travel the same input path as typed
//! characters.

use crate::config::MAX_CMD_LEN;
use super::LineBuffer;

/// Encoded stand-in for a space
pub const MACRO_SPACE: u8 = b'_';

/// Encoded stand-in for a carriage return
pub const MACRO_CR: u8 = b'|';

/// Decode one stored macro byte into the byte that is played back
pub fn decode(byte: u8) -> u8 {
    match byte {
        MACRO_SPACE => b' ',
        MACRO_CR => b'\r',
        other => other,
    }
}

/// Macro text plus playback cursor
#[derive(Debug, Default, Clone)]
pub struct MacroBuffer {
    text: LineBuffer<MAX_CMD_LEN>,
    cursor: Option<usize>,
}

impl MacroBuffer {
    pub const fn new() -> Self {
        Self {
            text: LineBuffer::new(),
            cursor: None,
        }
    }

    /// Store a macro, replacing the previous one and stopping playback
    pub fn define(&mut self, text: &str) {
        self.text.set(text.as_bytes());
        self.cursor = None;
    }

    /// Stored macro text (encoded), if any
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.as_str())
        }
    }

    /// Rewind playback to the first byte
    pub fn start(&mut self) {
        if !self.text.is_empty() {
            self.cursor = Some(0);
        }
    }

    /// Stop playback, keep the text
    pub fn stop(&mut self) {
        self.cursor = None;
    }

    /// True from [`start`](Self::start) until [`stop`](Self::stop)
    pub fn is_playing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Bytes left to play
    pub fn has_next(&self) -> bool {
        self.cursor.is_some_and(|c| c < self.text.len())
    }

    /// Next decoded byte without advancing
    pub fn peek(&self) -> Option<u8> {
        let c = self.cursor?;
        self.text.as_bytes().get(c).copied().map(decode)
    }

    /// Next decoded byte, advancing the cursor
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.cursor = self.cursor.map(|c| c + 1);
        Some(byte)
    }
}
