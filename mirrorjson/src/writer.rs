// SPDX-License-Identifier: Apache-2.0

//! The write half of the engine.
//!
//! Every primitive emits the member separator (and, inside objects,
//! the `"label":` prefix) before its value, so application code simply
//! mirrors its record layout field by field:
//!
//! ```rust
//! use mirrorjson::{JsonWriter, SliceWriter};
//!
//! let mut buf = [0u8; 128];
//! let mut w = JsonWriter::compact(SliceWriter::new(&mut buf));
//! w.begin_object("point").unwrap();
//! w.write_i32("x", 10).unwrap();
//! w.write_i32("y", -4).unwrap();
//! w.end_object().unwrap();
//! let io = w.finish().unwrap();
//! assert_eq!(io.as_slice(), br#"{"x":10,"y":-4}"#);
//! ```
//!
//! A failed write leaves the sink truncated mid-document; there is no
//! rollback. Callers with growable buffers restart from scratch.

use log::trace;

use crate::escape::escape_for;
use crate::frame::FrameStack;
use crate::io::JsonIo;
use crate::num::NumBuf;
use crate::Error;

/// Output formatting for one write session.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Emit newlines and indentation between members.
    pub pretty: bool,
    /// Spaces per nesting level when pretty-printing.
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { pretty: true, indent: 2 }
    }
}

/// Streaming JSON writer over a [`JsonIo`] sink.
#[derive(Debug)]
pub struct JsonWriter<Io: JsonIo> {
    io: Io,
    frames: FrameStack,
    opts: WriteOptions,
    line: usize,
}

impl<Io: JsonIo> JsonWriter<Io> {
    /// Creates a pretty-printing writer with default options.
    pub fn new(io: Io) -> Self {
        Self::with_options(io, WriteOptions::default())
    }

    /// Creates a writer that emits no whitespace beyond the grammar.
    pub fn compact(io: Io) -> Self {
        Self::with_options(io, WriteOptions { pretty: false, indent: 0 })
    }

    pub fn with_options(io: Io, opts: WriteOptions) -> Self {
        Self {
            io,
            frames: FrameStack::new(),
            opts,
            line: 1,
        }
    }

    /// Current output line, counting emitted newlines. Always 1 in
    /// compact mode.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Verifies every begin has been matched by an end and returns the
    /// backend.
    pub fn finish(self) -> Result<Io, Error> {
        if !self.frames.at_root() {
            return Err(Error::FrameMismatch);
        }
        trace!("document written, {} line(s)", self.line);
        Ok(self.io)
    }

    fn put_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.io.write_byte(byte)?;
        Ok(())
    }

    fn put_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if self.io.write_bulk(bytes) == bytes.len() {
            Ok(())
        } else {
            Err(Error::OutputFull)
        }
    }

    fn newline(&mut self) -> Result<(), Error> {
        if self.opts.pretty {
            self.put_byte(b'\n')?;
            self.line += 1;
        }
        Ok(())
    }

    fn indent(&mut self) -> Result<(), Error> {
        if self.opts.pretty {
            for _ in 0..self.frames.depth() * self.opts.indent {
                self.put_byte(b' ')?;
            }
        }
        Ok(())
    }

    /// Comma before every member but the first; members of the
    /// implicit root frame stay on the opening line.
    fn member_separator(&mut self) -> Result<(), Error> {
        if self.frames.top().count > 0 {
            self.put_byte(b',')?;
        }
        if !self.frames.at_root() {
            self.newline()?;
        }
        self.frames.bump();
        Ok(())
    }

    fn label(&mut self, label: &str) -> Result<(), Error> {
        self.member_separator()?;
        self.indent()?;
        if self.frames.top().is_array {
            return Ok(());
        }
        self.put_byte(b'"')?;
        self.put_all(label.as_bytes())?;
        if self.opts.pretty {
            self.put_all(b"\": ")
        } else {
            self.put_all(b"\":")
        }
    }

    fn begin_aggregate(&mut self, label: &str, is_array: bool) -> Result<(), Error> {
        self.label(label)?;
        self.put_byte(if is_array { b'[' } else { b'{' })?;
        self.frames.push(is_array)
    }

    fn end_aggregate(&mut self, is_array: bool) -> Result<(), Error> {
        let frame = self.frames.pop(is_array)?;
        if frame.count > 0 {
            self.newline()?;
            self.indent()?;
        }
        self.put_byte(if is_array { b']' } else { b'}' })
    }

    /// Opens an object. `label` is ignored inside arrays.
    pub fn begin_object(&mut self, label: &str) -> Result<(), Error> {
        self.begin_aggregate(label, false)
    }

    pub fn end_object(&mut self) -> Result<(), Error> {
        self.end_aggregate(false)
    }

    /// Opens an array. `label` is ignored inside arrays.
    pub fn begin_array(&mut self, label: &str) -> Result<(), Error> {
        self.begin_aggregate(label, true)
    }

    pub fn end_array(&mut self) -> Result<(), Error> {
        self.end_aggregate(true)
    }

    pub fn write_bool(&mut self, label: &str, val: bool) -> Result<(), Error> {
        self.label(label)?;
        self.put_all(if val { b"true" } else { b"false" })
    }

    fn write_number(&mut self, label: &str, buf: &NumBuf) -> Result<(), Error> {
        self.label(label)?;
        self.put_all(buf.as_bytes())
    }

    pub fn write_i32(&mut self, label: &str, val: i32) -> Result<(), Error> {
        let buf = NumBuf::format(format_args!("{val}"))?;
        self.write_number(label, &buf)
    }

    pub fn write_u32(&mut self, label: &str, val: u32) -> Result<(), Error> {
        let buf = NumBuf::format(format_args!("{val}"))?;
        self.write_number(label, &buf)
    }

    // The narrow widths route through the 32-bit path; they always
    // emit the full decimal value.

    pub fn write_i8(&mut self, label: &str, val: i8) -> Result<(), Error> {
        self.write_i32(label, i32::from(val))
    }

    pub fn write_u8(&mut self, label: &str, val: u8) -> Result<(), Error> {
        self.write_u32(label, u32::from(val))
    }

    pub fn write_i16(&mut self, label: &str, val: i16) -> Result<(), Error> {
        self.write_i32(label, i32::from(val))
    }

    pub fn write_u16(&mut self, label: &str, val: u16) -> Result<(), Error> {
        self.write_u32(label, u32::from(val))
    }

    pub fn write_i64(&mut self, label: &str, val: i64) -> Result<(), Error> {
        let buf = NumBuf::format(format_args!("{val}"))?;
        self.write_number(label, &buf)
    }

    pub fn write_u64(&mut self, label: &str, val: u64) -> Result<(), Error> {
        let buf = NumBuf::format(format_args!("{val}"))?;
        self.write_number(label, &buf)
    }

    /// Writes a float in fixed-point form with six fractional digits.
    /// NaN and infinities are rejected with [`Error::OutOfRange`].
    pub fn write_f32(&mut self, label: &str, val: f32) -> Result<(), Error> {
        if !val.is_finite() {
            return Err(Error::OutOfRange);
        }
        let buf = NumBuf::format(format_args!("{val:.6}"))?;
        self.write_number(label, &buf)
    }

    /// See [`JsonWriter::write_f32`].
    pub fn write_f64(&mut self, label: &str, val: f64) -> Result<(), Error> {
        if !val.is_finite() {
            return Err(Error::OutOfRange);
        }
        let buf = NumBuf::format(format_args!("{val:.6}"))?;
        self.write_number(label, &buf)
    }

    /// Writes a single character as a one-character string value.
    pub fn write_char(&mut self, label: &str, val: char) -> Result<(), Error> {
        let mut tmp = [0u8; 4];
        let s = val.encode_utf8(&mut tmp);
        self.write_str(label, s)
    }

    fn put_escaped(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &byte in bytes {
            match escape_for(byte) {
                Some(two) => self.put_all(&two)?,
                None => self.put_byte(byte)?,
            }
        }
        Ok(())
    }

    /// Writes a string value, applying the named escapes.
    pub fn write_str(&mut self, label: &str, val: &str) -> Result<(), Error> {
        self.label(label)?;
        self.put_byte(b'"')?;
        self.put_escaped(val.as_bytes())?;
        self.put_byte(b'"')
    }

    /// Writes a fixed-length byte slice as a quoted value, verbatim.
    /// The caller is responsible for the payload being quote-safe.
    pub fn write_strn(&mut self, label: &str, val: &[u8]) -> Result<(), Error> {
        self.label(label)?;
        self.put_byte(b'"')?;
        self.put_all(val)?;
        self.put_byte(b'"')
    }

    /// Quoted but unescaped: for pre-sanitized payloads.
    pub fn write_raw_str(&mut self, label: &str, val: &str) -> Result<(), Error> {
        self.write_strn(label, val.as_bytes())
    }

    /// Label framing only; the payload is emitted with no quotes and
    /// no escaping. Embeds pre-rendered JSON.
    pub fn write_raw_value(&mut self, label: &str, val: &str) -> Result<(), Error> {
        self.label(label)?;
        self.put_all(val.as_bytes())
    }
}
