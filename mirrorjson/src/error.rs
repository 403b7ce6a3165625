// SPDX-License-Identifier: Apache-2.0

use crate::io::IoError;

/// Errors that can occur while reading or writing a document.
///
/// Every data-dependent failure is a plain signal: the caller already
/// knows which label it was processing, so no variant carries payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The input source was exhausted mid-value.
    EndOfData,
    /// The output sink is full; the document on the wire is truncated
    /// and must be discarded.
    OutputFull,
    /// The byte stream did not match what the caller asserted the
    /// schema to be: a delimiter, label, or literal was not found at
    /// the current cursor.
    Mismatch,
    /// A numeric value does not fit the requested type width, or a
    /// non-finite float was written.
    OutOfRange,
    /// A string value (or the numeric staging buffer) does not fit the
    /// supplied destination.
    BufferFull,
    /// Invalid escape sequence or invalid hex digits after `\u`.
    InvalidEscape,
    /// The decoded string is not valid UTF-8.
    InvalidUtf8,
    /// Nesting exceeds [`MAX_DEPTH`](crate::MAX_DEPTH).
    DepthExceeded,
    /// Mismatched begin/end aggregate kind, or an end call with no
    /// open frame. This is a caller bug, not a data error.
    FrameMismatch,
    /// The backend rejected a one-byte pushback. Conforming backends
    /// never do; this indicates a broken [`JsonIo`](crate::JsonIo)
    /// implementation.
    PushBackRejected,
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::EndOfInput => Error::EndOfData,
            IoError::OutputFull => Error::OutputFull,
            IoError::PushBackRejected => Error::PushBackRejected,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::EndOfData => write!(f, "input exhausted mid-value"),
            Error::OutputFull => write!(f, "output sink full"),
            Error::Mismatch => write!(f, "token does not match expected schema"),
            Error::OutOfRange => write!(f, "numeric value out of range"),
            Error::BufferFull => write!(f, "destination buffer too small"),
            Error::InvalidEscape => write!(f, "invalid escape sequence"),
            Error::InvalidUtf8 => write!(f, "decoded string is not valid UTF-8"),
            Error::DepthExceeded => write!(f, "nesting depth limit exceeded"),
            Error::FrameMismatch => write!(f, "mismatched object/array begin and end"),
            Error::PushBackRejected => write!(f, "backend rejected single-byte pushback"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        assert_eq!(Error::from(IoError::EndOfInput), Error::EndOfData);
        assert_eq!(Error::from(IoError::OutputFull), Error::OutputFull);
        assert_eq!(Error::from(IoError::PushBackRejected), Error::PushBackRejected);
    }

    #[test]
    fn display_is_stable() {
        // Displayed text is part of the diagnostic surface; keep the
        // schema-mismatch wording intact.
        let msg = format!("{}", Error::Mismatch);
        assert!(msg.contains("schema"));
    }
}
