// SPDX-License-Identifier: Apache-2.0

//! Fixed 64-byte staging for numeric text, shared by both engines.
//!
//! 20 digits hold 2^64-1, so 64 bytes is ample for any supported
//! integer and for fixed-point floats of sane magnitude; anything
//! larger is reported as a capacity failure rather than truncated.

use core::fmt;
use core::num::IntErrorKind;
use core::str::FromStr;

use crate::Error;

pub(crate) const NUM_BUF_LEN: usize = 64;

pub(crate) struct NumBuf {
    bytes: [u8; NUM_BUF_LEN],
    len: usize,
}

impl NumBuf {
    pub fn new() -> Self {
        Self { bytes: [0; NUM_BUF_LEN], len: 0 }
    }

    /// Renders `args` into a fresh buffer.
    pub fn format(args: fmt::Arguments<'_>) -> Result<Self, Error> {
        let mut buf = Self::new();
        fmt::Write::write_fmt(&mut buf, args).map_err(|_| Error::BufferFull)?;
        Ok(buf)
    }

    pub fn push(&mut self, byte: u8) -> Result<(), Error> {
        if self.len == NUM_BUF_LEN {
            return Err(Error::BufferFull);
        }
        self.bytes[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The staged text. Only ever ASCII by construction.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }
}

impl fmt::Write for NumBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.len + bytes.len() > NUM_BUF_LEN {
            return Err(fmt::Error);
        }
        self.bytes[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }
}

/// Parses a staged integer token. Overflow of the target width is a
/// range violation; anything else (stray `.`, empty sign, junk) is a
/// schema mismatch.
pub(crate) fn parse_int<T>(text: &str) -> Result<T, Error>
where
    T: FromStr<Err = core::num::ParseIntError>,
{
    text.parse::<T>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::OutOfRange,
        _ => Error::Mismatch,
    })
}

/// Parses a staged float token.
pub(crate) fn parse_float<T>(text: &str) -> Result<T, Error>
where
    T: FromStr<Err = core::num::ParseFloatError>,
{
    text.parse::<T>().map_err(|_| Error::Mismatch)
}
