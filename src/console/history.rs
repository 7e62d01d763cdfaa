//! Single-slot command history
//!
//! Holds the last submitted line for cursor-up recall.

use super::LineBuffer;

/// Last submitted command line
#[derive(Debug, Default, Clone)]
pub struct History {
    last: LineBuffer,
}

impl History {
    /// Create empty history
    pub const fn new() -> Self {
        Self {
            last: LineBuffer::new(),
        }
    }

    /// Remember a submitted line, replacing the previous one
    pub fn push(&mut self, line: &[u8]) {
        self.last.set(line);
    }

    /// Last submitted line, if any
    pub fn last(&self) -> Option<&str> {
        if self.last.is_empty() {
            None
        } else {
            Some(self.last.as_str())
        }
    }

    /// Forget the stored line
    pub fn clear(&mut self) {
        self.last.clear();
    }
}
