// SPDX-License-Identifier: Apache-2.0

//! The five-operation capability set the engine is written against.
//!
//! Everything above this module — frame tracking, the writer, the
//! reader — sees only [`JsonIo`]. The crate ships two implementations:
//! a bounded in-memory backend ([`SliceReader`](crate::SliceReader) /
//! [`SliceWriter`](crate::SliceWriter)) and, with the `std` feature, a
//! byte-stream backend ([`StreamReader`](crate::StreamReader) /
//! [`StreamWriter`](crate::StreamWriter)). Callers with other sources
//! (UART, ring buffers, memory-mapped files) implement the trait
//! themselves.

/// Error type for backend operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IoError {
    /// No more bytes can be read from the source.
    EndOfInput,
    /// No more bytes can be written to the sink.
    OutputFull,
    /// The pushback slot is occupied or the byte does not match the
    /// most recently read one.
    PushBackRejected,
}

/// A byte source/sink for one document session.
///
/// A session is either reading or writing, never both; an
/// implementation may hard-fail the direction it does not support.
/// The engine assumes exclusive access for the whole session and
/// performs no locking.
pub trait JsonIo {
    /// Consume and return the next byte.
    fn next_byte(&mut self) -> Result<u8, IoError>;

    /// Un-consume `byte`. Only the most recently read byte is ever
    /// pushed back, and never more than one at a time; that is the
    /// full lookahead the engine needs.
    fn push_back(&mut self, byte: u8) -> Result<(), IoError>;

    /// Read up to `dst.len()` bytes, returning how many were
    /// transferred. A short count means the source is exhausted.
    fn read_bulk(&mut self, dst: &mut [u8]) -> usize;

    /// Write up to `src.len()` bytes, returning how many were
    /// transferred. A short count means the sink is full; the engine
    /// treats that as a fatal truncation.
    fn write_bulk(&mut self, src: &[u8]) -> usize;

    /// Write a single byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), IoError>;
}
