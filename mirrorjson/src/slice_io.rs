// SPDX-License-Identifier: Apache-2.0

//! Bounded in-memory backends: a cursor over a byte slice.
//!
//! Reads stop at the slice's logical length, writes stop at capacity.
//! A caller whose write is cut short ([`IoError::OutputFull`]) must
//! grow its buffer and restart the whole document; the engine has no
//! mid-document resume for writes.

use crate::io::{IoError, JsonIo};

/// A [`JsonIo`] source over a borrowed byte slice.
#[derive(Debug)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Creates a reader over `data`, cursor at the start.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor position.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl JsonIo for SliceReader<'_> {
    fn next_byte(&mut self) -> Result<u8, IoError> {
        match self.data.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(byte)
            }
            None => Err(IoError::EndOfInput),
        }
    }

    fn push_back(&mut self, byte: u8) -> Result<(), IoError> {
        if self.pos > 0 && self.data[self.pos - 1] == byte {
            self.pos -= 1;
            Ok(())
        } else {
            Err(IoError::PushBackRejected)
        }
    }

    fn read_bulk(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.data.len() - self.pos);
        dst[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    fn write_bulk(&mut self, _src: &[u8]) -> usize {
        0
    }

    fn write_byte(&mut self, _byte: u8) -> Result<(), IoError> {
        Err(IoError::OutputFull)
    }
}

/// A [`JsonIo`] sink over a borrowed, fixed-capacity byte buffer.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    /// Creates a writer over `buf`, cursor at the start.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.pos
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl JsonIo for SliceWriter<'_> {
    fn next_byte(&mut self) -> Result<u8, IoError> {
        Err(IoError::EndOfInput)
    }

    fn push_back(&mut self, _byte: u8) -> Result<(), IoError> {
        Err(IoError::PushBackRejected)
    }

    fn read_bulk(&mut self, _dst: &mut [u8]) -> usize {
        0
    }

    fn write_bulk(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + n].copy_from_slice(&src[..n]);
        self.pos += n;
        n
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), IoError> {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = byte;
                self.pos += 1;
                Ok(())
            }
            None => Err(IoError::OutputFull),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_boundary_behavior() {
        let data = b"abc";
        let mut reader = SliceReader::new(data);

        assert_eq!(reader.next_byte(), Ok(b'a'));
        assert_eq!(reader.next_byte(), Ok(b'b'));
        assert_eq!(reader.next_byte(), Ok(b'c'));
        assert_eq!(reader.pos(), 3);
        assert_eq!(reader.next_byte(), Err(IoError::EndOfInput));
        // Exhaustion does not advance the cursor.
        assert_eq!(reader.pos(), 3);
    }

    #[test]
    fn pushback_only_accepts_last_byte() {
        let mut reader = SliceReader::new(b"xy");
        assert_eq!(reader.push_back(b'x'), Err(IoError::PushBackRejected));
        assert_eq!(reader.next_byte(), Ok(b'x'));
        assert_eq!(reader.push_back(b'y'), Err(IoError::PushBackRejected));
        assert_eq!(reader.push_back(b'x'), Ok(()));
        assert_eq!(reader.next_byte(), Ok(b'x'));
    }

    #[test]
    fn bulk_read_is_bounded() {
        let mut reader = SliceReader::new(b"hello");
        let mut dst = [0u8; 8];
        assert_eq!(reader.read_bulk(&mut dst), 5);
        assert_eq!(&dst[..5], b"hello");
        assert_eq!(reader.read_bulk(&mut dst), 0);
    }

    #[test]
    fn writer_short_transfer_at_capacity() {
        let mut buf = [0u8; 4];
        let mut writer = SliceWriter::new(&mut buf);
        assert_eq!(writer.write_bulk(b"abcdef"), 4);
        assert_eq!(writer.write_byte(b'g'), Err(IoError::OutputFull));
        assert_eq!(writer.as_slice(), b"abcd");
    }
}
