//! Character input seam
//!
//! The console is fed, never self-driving: the host loop asks a
//! [`ByteSource`] for input and passes each byte to the console. Output goes
//! through any [`core::fmt::Write`].

/// Polled byte input (UART, stdin, scripted bytes)
pub trait ByteSource {
    /// True if a byte can be read without blocking
    fn has_next(&mut self) -> bool;

    /// Read the next byte. `None` if nothing is available.
    fn next_byte(&mut self) -> Option<u8>;

    /// True once the source can never produce input again
    fn is_closed(&self) -> bool {
        false
    }
}

/// Scripted input from a byte slice
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn has_next(&mut self) -> bool {
        self.pos < self.bytes.len()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }

    fn is_closed(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}
