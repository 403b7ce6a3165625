// SPDX-License-Identifier: Apache-2.0

//! The read half of the engine.
//!
//! The caller replays the exact call sequence that produced the
//! document; each primitive consumes the separator, the label (inside
//! objects), and the value token, failing with [`Error::Mismatch`]
//! when the bytes disagree with what the caller asserted. There is no
//! lookahead beyond one byte and no recovery: the first failure
//! abandons the document.
//!
//! ```rust
//! use mirrorjson::{JsonReader, SliceReader};
//!
//! let mut r = JsonReader::new(SliceReader::new(br#"{"x":10,"y":-4}"#));
//! r.begin_object("point").unwrap();
//! assert_eq!(r.read_i32("x").unwrap(), 10);
//! assert_eq!(r.read_i32("y").unwrap(), -4);
//! r.end_object().unwrap();
//! ```

use log::{debug, trace};

use crate::escape::{decode_escape, MAX_ESCAPE_LEN};
use crate::frame::FrameStack;
use crate::io::JsonIo;
use crate::num::{parse_float, parse_int, NumBuf};
use crate::Error;

/// Resumption state for [`JsonReader::read_str_part`].
///
/// `len` is how many decoded bytes sit in the destination; a caller
/// that drains the buffer between calls resets it to zero, a caller
/// that grows the buffer in place leaves it alone. `more` tracks
/// whether the closing quote is still pending.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrPart {
    pub len: usize,
    pub more: bool,
}

/// Streaming JSON reader over a [`JsonIo`] source.
#[derive(Debug)]
pub struct JsonReader<Io: JsonIo> {
    io: Io,
    frames: FrameStack,
    line: usize,
}

impl<Io: JsonIo> JsonReader<Io> {
    pub fn new(io: Io) -> Self {
        Self {
            io,
            frames: FrameStack::new(),
            line: 1,
        }
    }

    /// Current input line, counting newlines consumed as whitespace.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Verifies every begin has been matched by an end and returns the
    /// backend.
    pub fn finish(self) -> Result<Io, Error> {
        if !self.frames.at_root() {
            return Err(Error::FrameMismatch);
        }
        trace!("document read, {} line(s)", self.line);
        Ok(self.io)
    }

    fn getc(&mut self) -> Result<u8, Error> {
        let byte = self.io.next_byte()?;
        Ok(byte)
    }

    fn ungetc(&mut self, byte: u8) -> Result<(), Error> {
        self.io.push_back(byte)?;
        Ok(())
    }

    /// Next byte that is not JSON whitespace.
    fn next_non_ws(&mut self) -> Result<u8, Error> {
        loop {
            let byte = self.getc()?;
            if byte == b'\n' {
                self.line += 1;
            } else if !matches!(byte, b' ' | b'\t' | b'\r') {
                return Ok(byte);
            }
        }
    }

    /// Positions the cursor at the next non-whitespace byte without
    /// consuming it. Running out of input here is not an error; the
    /// following token read reports it.
    fn skip_ws(&mut self) -> Result<(), Error> {
        match self.next_non_ws() {
            Ok(byte) => self.ungetc(byte),
            Err(Error::EndOfData) => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn expect_non_ws(&mut self, want: u8) -> Result<(), Error> {
        if self.next_non_ws()? == want {
            Ok(())
        } else {
            Err(Error::Mismatch)
        }
    }

    fn read_exact(&mut self, bytes: &[u8]) -> Result<(), Error> {
        for &want in bytes {
            if self.getc()? != want {
                return Err(Error::Mismatch);
            }
        }
        Ok(())
    }

    /// Consumes the separator and, inside objects, the `"label":`
    /// prefix. Inside arrays the label is only a caller-side hint and
    /// is not matched against input.
    pub fn read_member_label(&mut self, label: &str) -> Result<(), Error> {
        let res = self.label_inner(label);
        if res.is_err() {
            debug!("label {label:?} not matched at line {}", self.line);
        }
        res
    }

    fn label_inner(&mut self, label: &str) -> Result<(), Error> {
        if self.frames.top().count > 0 {
            self.expect_non_ws(b',')?;
        }
        self.frames.bump();
        if self.frames.top().is_array {
            return Ok(());
        }
        self.expect_non_ws(b'"')?;
        self.read_exact(label.as_bytes())?;
        if self.getc()? != b'"' {
            return Err(Error::Mismatch);
        }
        self.expect_non_ws(b':')
    }

    fn begin_aggregate(&mut self, label: &str, is_array: bool) -> Result<(), Error> {
        self.read_member_label(label)?;
        self.frames.push(is_array)?;
        self.expect_non_ws(if is_array { b'[' } else { b'{' })
    }

    fn end_aggregate(&mut self, is_array: bool) -> Result<(), Error> {
        self.frames.pop(is_array)?;
        self.expect_non_ws(if is_array { b']' } else { b'}' })
    }

    pub fn begin_object(&mut self, label: &str) -> Result<(), Error> {
        self.begin_aggregate(label, false)
    }

    pub fn end_object(&mut self) -> Result<(), Error> {
        self.end_aggregate(false)
    }

    pub fn begin_array(&mut self, label: &str) -> Result<(), Error> {
        self.begin_aggregate(label, true)
    }

    pub fn end_array(&mut self) -> Result<(), Error> {
        self.end_aggregate(true)
    }

    pub fn read_bool(&mut self, label: &str) -> Result<bool, Error> {
        self.read_member_label(label)?;
        match self.next_non_ws()? {
            b't' => {
                self.read_exact(b"rue")?;
                Ok(true)
            }
            b'f' => {
                self.read_exact(b"alse")?;
                Ok(false)
            }
            _ => Err(Error::Mismatch),
        }
    }

    /// Scans a maximal run of digits, `-` and `.` into the staging
    /// buffer. Permissive on shape; the numeric parser decides.
    fn read_number_token(&mut self, label: &str) -> Result<NumBuf, Error> {
        self.read_member_label(label)?;
        self.skip_ws()?;
        let mut buf = NumBuf::new();
        loop {
            match self.io.next_byte() {
                Ok(byte) if byte.is_ascii_digit() || byte == b'-' || byte == b'.' => {
                    buf.push(byte)?;
                }
                Ok(byte) => {
                    self.ungetc(byte)?;
                    break;
                }
                // End of input terminates the token; whether that is
                // an error surfaces at the next structural read.
                Err(_) => break,
            }
        }
        if buf.is_empty() {
            return Err(Error::Mismatch);
        }
        Ok(buf)
    }

    pub fn read_i32(&mut self, label: &str) -> Result<i32, Error> {
        let buf = self.read_number_token(label)?;
        parse_int(buf.as_str())
    }

    pub fn read_u32(&mut self, label: &str) -> Result<u32, Error> {
        let buf = self.read_number_token(label)?;
        parse_int(buf.as_str())
    }

    // Narrow widths read through the 32-bit path and then range-check.

    pub fn read_i8(&mut self, label: &str) -> Result<i8, Error> {
        let val = self.read_i32(label)?;
        i8::try_from(val).map_err(|_| Error::OutOfRange)
    }

    pub fn read_u8(&mut self, label: &str) -> Result<u8, Error> {
        let val = self.read_u32(label)?;
        u8::try_from(val).map_err(|_| Error::OutOfRange)
    }

    pub fn read_i16(&mut self, label: &str) -> Result<i16, Error> {
        let val = self.read_i32(label)?;
        i16::try_from(val).map_err(|_| Error::OutOfRange)
    }

    pub fn read_u16(&mut self, label: &str) -> Result<u16, Error> {
        let val = self.read_u32(label)?;
        u16::try_from(val).map_err(|_| Error::OutOfRange)
    }

    pub fn read_i64(&mut self, label: &str) -> Result<i64, Error> {
        let buf = self.read_number_token(label)?;
        parse_int(buf.as_str())
    }

    pub fn read_u64(&mut self, label: &str) -> Result<u64, Error> {
        let buf = self.read_number_token(label)?;
        parse_int(buf.as_str())
    }

    pub fn read_f32(&mut self, label: &str) -> Result<f32, Error> {
        let buf = self.read_number_token(label)?;
        parse_float(buf.as_str())
    }

    pub fn read_f64(&mut self, label: &str) -> Result<f64, Error> {
        let buf = self.read_number_token(label)?;
        parse_float(buf.as_str())
    }

    /// Decodes string content into `dst` until the closing quote.
    ///
    /// Returns `Ok(true)` when the quote was consumed. In partial mode
    /// it instead returns `Ok(false)` once fewer than 4 bytes remain,
    /// so an escape never splits across calls; in one-shot mode
    /// exhausting `dst` with content still pending is
    /// [`Error::BufferFull`].
    fn read_str_body(
        &mut self,
        dst: &mut [u8],
        len: &mut usize,
        part: bool,
    ) -> Result<bool, Error> {
        loop {
            if part && dst.len() - *len < MAX_ESCAPE_LEN {
                return Ok(false);
            }
            let byte = self.getc()?;
            if byte == b'"' {
                return Ok(true);
            }
            if byte == b'\\' {
                let mut tmp = [0u8; MAX_ESCAPE_LEN];
                let n = decode_escape(&mut self.io, &mut tmp)?;
                if n > dst.len() - *len {
                    return Err(Error::BufferFull);
                }
                dst[*len..*len + n].copy_from_slice(&tmp[..n]);
                *len += n;
            } else {
                if *len == dst.len() {
                    return Err(Error::BufferFull);
                }
                dst[*len] = byte;
                *len += 1;
            }
        }
    }

    /// Reads a whole string value. The value must fit `dst`; an exact
    /// fit succeeds. Use [`JsonReader::read_str_part`] when it may not.
    pub fn read_str<'b>(&mut self, label: &str, dst: &'b mut [u8]) -> Result<&'b str, Error> {
        self.read_member_label(label)?;
        self.expect_non_ws(b'"')?;
        let mut len = 0;
        let done = self.read_str_body(dst, &mut len, false)?;
        debug_assert!(done);
        core::str::from_utf8(&dst[..len]).map_err(|_| Error::InvalidUtf8)
    }

    /// Reads a string value in resumable chunks.
    ///
    /// Start with `StrPart::default()`. After each call, `dst[..part.len]`
    /// holds decoded bytes; while `part.more` is set the value has not
    /// ended and the caller either drains the chunk (resetting
    /// `part.len` to zero) or grows the buffer in place, then calls
    /// again. `dst` must be at least 4 bytes (one maximal UTF-8
    /// escape) to guarantee progress, and `part.len` must fit inside
    /// it; either violation is [`Error::BufferFull`]. Chunks may
    /// split multi-byte UTF-8 sequences, so they are bytes, not
    /// `&str`.
    pub fn read_str_part(
        &mut self,
        label: &str,
        dst: &mut [u8],
        part: &mut StrPart,
    ) -> Result<(), Error> {
        if dst.len() < MAX_ESCAPE_LEN || part.len > dst.len() {
            return Err(Error::BufferFull);
        }
        if !part.more {
            self.read_member_label(label)?;
            self.expect_non_ws(b'"')?;
            part.len = 0;
        }
        let done = self.read_str_body(dst, &mut part.len, true)?;
        part.more = !done;
        Ok(())
    }

    /// Reads exactly `dst.len()` bytes of string content, verbatim.
    /// Mirror of [`JsonWriter::write_strn`](crate::JsonWriter::write_strn):
    /// no escape decoding.
    pub fn read_strn(&mut self, label: &str, dst: &mut [u8]) -> Result<(), Error> {
        self.read_member_label(label)?;
        self.expect_non_ws(b'"')?;
        if self.io.read_bulk(dst) != dst.len() {
            return Err(Error::EndOfData);
        }
        if self.getc()? != b'"' {
            return Err(Error::Mismatch);
        }
        Ok(())
    }

    /// Reads a one-character string value.
    pub fn read_char(&mut self, label: &str) -> Result<char, Error> {
        let mut buf = [0u8; 4];
        let text = self.read_str(label, &mut buf)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(val), None) => Ok(val),
            _ => Err(Error::Mismatch),
        }
    }

    /// True if the next non-whitespace byte is `]`, without consuming
    /// it. For iterating arrays of unknown length.
    pub fn peek_array_end(&mut self) -> bool {
        match self.next_non_ws() {
            Ok(byte) => {
                let pushed = self.ungetc(byte);
                debug_assert!(pushed.is_ok(), "backend rejected single-byte pushback");
                byte == b']'
            }
            Err(_) => false,
        }
    }

    /// True if only whitespace remains before end of input.
    pub fn peek_end_of_data(&mut self) -> bool {
        match self.next_non_ws() {
            Ok(byte) => {
                let pushed = self.ungetc(byte);
                debug_assert!(pushed.is_ok(), "backend rejected single-byte pushback");
                false
            }
            Err(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice_io::SliceReader;

    fn reader(input: &[u8]) -> JsonReader<SliceReader<'_>> {
        JsonReader::new(SliceReader::new(input))
    }

    #[test]
    fn label_must_match_exactly() {
        let mut r = reader(br#"{"name": true}"#);
        r.begin_object("root").unwrap();
        assert_eq!(r.read_bool("Name"), Err(Error::Mismatch));
    }

    #[test]
    fn labels_are_hints_inside_arrays() {
        let mut r = reader(b"[1, 2]");
        r.begin_array("values").unwrap();
        assert_eq!(r.read_i32("anything").unwrap(), 1);
        assert_eq!(r.read_i32("goes").unwrap(), 2);
        r.end_array().unwrap();
    }

    #[test]
    fn number_token_stops_at_delimiter() {
        let mut r = reader(br#"{"n": 42,"m": 7}"#);
        r.begin_object("root").unwrap();
        assert_eq!(r.read_u32("n").unwrap(), 42);
        assert_eq!(r.read_u32("m").unwrap(), 7);
        r.end_object().unwrap();
    }

    #[test]
    fn number_token_at_end_of_input() {
        // EOF terminates the digit run without failing the value read.
        let mut r = reader(b"17");
        assert_eq!(r.read_u32("n").unwrap(), 17);
        assert!(r.peek_end_of_data());
    }

    #[test]
    fn bool_literals() {
        let mut r = reader(b"[true, false, tru]");
        r.begin_array("flags").unwrap();
        assert_eq!(r.read_bool(""), Ok(true));
        assert_eq!(r.read_bool(""), Ok(false));
        assert_eq!(r.read_bool(""), Err(Error::Mismatch));
    }

    #[test]
    fn line_counting() {
        let mut r = reader(b"{\n  \"a\": 1,\n  \"b\": 2\n}");
        r.begin_object("root").unwrap();
        assert_eq!(r.read_i32("a").unwrap(), 1);
        assert_eq!(r.line(), 2);
        assert_eq!(r.read_i32("b").unwrap(), 2);
        r.end_object().unwrap();
        assert_eq!(r.line(), 4);
    }

    #[test]
    fn char_is_exactly_one_scalar() {
        let mut r = reader(br#"["x", "ab", ""]"#);
        r.begin_array("chars").unwrap();
        assert_eq!(r.read_char(""), Ok('x'));
        assert_eq!(r.read_char(""), Err(Error::Mismatch));
    }

    #[test]
    fn strn_is_verbatim() {
        let mut r = reader(br#"{"tag": "a\nb"}"#);
        r.begin_object("root").unwrap();
        let mut raw = [0u8; 4];
        r.read_strn("tag", &mut raw).unwrap();
        // The backslash-n stays two bytes; no decoding.
        assert_eq!(&raw, br"a\nb");
        r.end_object().unwrap();
    }

    #[test]
    fn finish_requires_balance() {
        let mut r = reader(b"[");
        r.begin_array("root").unwrap();
        assert_eq!(r.finish().unwrap_err(), Error::FrameMismatch);
    }
}
