// SPDX-License-Identifier: Apache-2.0

//! Byte-stream backends over `std::io`, gated behind the `std` feature.
//!
//! These delegate straight to the wrapped stream; the only state added
//! is the one-byte pushback slot the capability set requires. Wrap
//! files in a `BufReader`/`BufWriter` if per-byte syscalls matter.

use std::io::{Read, Write};

use crate::io::{IoError, JsonIo};

/// A [`JsonIo`] source over any [`std::io::Read`].
#[derive(Debug)]
pub struct StreamReader<R: Read> {
    inner: R,
    unread: Option<u8>,
}

impl<R: Read> StreamReader<R> {
    /// Wraps `inner` for a read session.
    pub fn new(inner: R) -> Self {
        Self { inner, unread: None }
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> JsonIo for StreamReader<R> {
    fn next_byte(&mut self) -> Result<u8, IoError> {
        if let Some(byte) = self.unread.take() {
            return Ok(byte);
        }
        let mut one = [0u8; 1];
        match self.inner.read(&mut one) {
            Ok(1) => Ok(one[0]),
            _ => Err(IoError::EndOfInput),
        }
    }

    fn push_back(&mut self, byte: u8) -> Result<(), IoError> {
        if self.unread.is_some() {
            return Err(IoError::PushBackRejected);
        }
        self.unread = Some(byte);
        Ok(())
    }

    fn read_bulk(&mut self, dst: &mut [u8]) -> usize {
        let mut filled = 0;
        if let Some(byte) = self.unread.take() {
            if dst.is_empty() {
                self.unread = Some(byte);
                return 0;
            }
            dst[0] = byte;
            filled = 1;
        }
        while filled < dst.len() {
            match self.inner.read(&mut dst[filled..]) {
                Ok(0) | Err(_) => break,
                Ok(n) => filled += n,
            }
        }
        filled
    }

    fn write_bulk(&mut self, _src: &[u8]) -> usize {
        0
    }

    fn write_byte(&mut self, _byte: u8) -> Result<(), IoError> {
        Err(IoError::OutputFull)
    }
}

/// A [`JsonIo`] sink over any [`std::io::Write`].
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    inner: W,
}

impl<W: Write> StreamWriter<W> {
    /// Wraps `inner` for a write session.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> JsonIo for StreamWriter<W> {
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
        match self.inner.write_all(src) {
            Ok(()) => src.len(),
            Err(_) => 0,
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), IoError> {
        self.inner
            .write_all(&[byte])
            .map_err(|_| IoError::OutputFull)
    }
}
