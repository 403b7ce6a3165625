// SPDX-License-Identifier: Apache-2.0

//! A schema-driven streaming JSON reader/writer.
//!
//! This is not a general-purpose parser: it builds no tree, tolerates
//! no unknown or reordered fields, and the call sequence *is* the
//! schema. Application code that knows its document shape drives the
//! engine field by field in both directions, and the engine does the
//! lexical work: labels, separators, numeric text, string escaping
//! (including `\uXXXX` to UTF-8), and chunked transfer of strings
//! larger than the destination buffer.
//!
//! The engine never allocates. I/O goes through the five-operation
//! [`JsonIo`] capability set, with built-in backends for bounded
//! in-memory buffers and (with the `std` feature) byte streams.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod error;
pub use error::Error;

mod io;
pub use io::{IoError, JsonIo};

mod slice_io;
pub use slice_io::{SliceReader, SliceWriter};

#[cfg(feature = "std")]
mod stream_io;
#[cfg(feature = "std")]
pub use stream_io::{StreamReader, StreamWriter};

mod frame;
pub use frame::MAX_DEPTH;

mod escape;

mod num;

mod writer;
pub use writer::{JsonWriter, WriteOptions};

mod reader;
pub use reader::{JsonReader, StrPart};
