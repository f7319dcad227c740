//! Forward-only reader over a borrowed byte slice.
//!
//! Every read hands back a sub-slice of the source, so decoding a frame
//! never copies bytes until a packet decides to own them.

use crate::error::{ProtocolError, Result};

/// Bounded, forward-only cursor over an immutable byte slice.
///
/// The position only moves forward and every successful read advances it
/// by exactly the number of bytes returned.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Wrap `buf` with the read position at 0
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Return the next `n` bytes and advance past them.
    ///
    /// # Errors
    /// - `BufferExhausted` when no bytes remain, whatever `n` is
    /// - `InsufficientBytes` when fewer than `n` bytes remain
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Err(ProtocolError::BufferExhausted);
        }
        if n > remaining {
            return Err(ProtocolError::InsufficientBytes {
                requested: n,
                remaining,
            });
        }

        let start = self.pos;
        self.pos += n;
        Ok(&self.buf[start..self.pos])
    }

    /// Return the next byte and advance past it
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a big-endian `u32`, independent of host byte order
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying slice
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
