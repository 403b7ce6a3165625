// SPDX-License-Identifier: Apache-2.0

//! JSON string escape handling, both directions.
//!
//! Write side produces only the named two-character escapes
//! (`\b \f \n \r \t \" \\ \/`); all other bytes pass through verbatim.
//! Read side reverses those and additionally decodes `\uXXXX`,
//! re-encoding the code point as 1–4 bytes of UTF-8. Surrogate halves
//! are not combined; each escape decodes independently.

use crate::io::JsonIo;
use crate::Error;

/// Longest decoded form of a single escape: a 4-byte UTF-8 sequence.
pub(crate) const MAX_ESCAPE_LEN: usize = 4;

/// The two-character escape for `byte`, if it has one.
pub(crate) fn escape_for(byte: u8) -> Option<[u8; 2]> {
    match byte {
        b'"' | b'\\' | b'/' => Some([b'\\', byte]),
        0x08 => Some([b'\\', b'b']),
        0x0c => Some([b'\\', b'f']),
        b'\n' => Some([b'\\', b'n']),
        b'\r' => Some([b'\\', b'r']),
        b'\t' => Some([b'\\', b't']),
        _ => None,
    }
}

/// Numeric value of an ASCII hex digit.
fn hex_digit(byte: u8) -> Result<u32, Error> {
    match byte {
        b'0'..=b'9' => Ok((byte - b'0') as u32),
        b'a'..=b'f' => Ok((byte - b'a' + 10) as u32),
        b'A'..=b'F' => Ok((byte - b'A' + 10) as u32),
        _ => Err(Error::InvalidEscape),
    }
}

fn read_hex4<Io: JsonIo>(io: &mut Io) -> Result<u32, Error> {
    let mut value = 0u32;
    for _ in 0..4 {
        let byte = io.next_byte()?;
        value = (value << 4) | hex_digit(byte)?;
    }
    Ok(value)
}

/// Packs `code` into UTF-8 continuation-byte form. Accepts anything
/// below 2^21, mirroring the wire format's four length ranges; the
/// result is only guaranteed to be valid UTF-8 for real scalar values.
fn encode_utf8(code: u32, out: &mut [u8; MAX_ESCAPE_LEN]) -> Result<usize, Error> {
    if code < 1 << 7 {
        out[0] = code as u8;
        Ok(1)
    } else if code < 1 << 11 {
        out[0] = 0xc0 | ((code >> 6) & 0x1f) as u8;
        out[1] = 0x80 | (code & 0x3f) as u8;
        Ok(2)
    } else if code < 1 << 16 {
        out[0] = 0xe0 | ((code >> 12) & 0x0f) as u8;
        out[1] = 0x80 | ((code >> 6) & 0x3f) as u8;
        out[2] = 0x80 | (code & 0x3f) as u8;
        Ok(3)
    } else if code < 1 << 21 {
        out[0] = 0xf0 | ((code >> 18) & 0x07) as u8;
        out[1] = 0x80 | ((code >> 12) & 0x3f) as u8;
        out[2] = 0x80 | ((code >> 6) & 0x3f) as u8;
        out[3] = 0x80 | (code & 0x3f) as u8;
        Ok(4)
    } else {
        Err(Error::InvalidEscape)
    }
}

/// Decodes one escape sequence, with the cursor positioned just past
/// the backslash. Writes the decoded bytes into `out` and returns how
/// many were produced.
pub(crate) fn decode_escape<Io: JsonIo>(
    io: &mut Io,
    out: &mut [u8; MAX_ESCAPE_LEN],
) -> Result<usize, Error> {
    let tag = io.next_byte()?;
    let byte = match tag {
        b'"' | b'\\' | b'/' => tag,
        b'b' => 0x08,
        b'f' => 0x0c,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'u' => {
            let code = read_hex4(io)?;
            return encode_utf8(code, out);
        }
        _ => return Err(Error::InvalidEscape),
    };
    out[0] = byte;
    Ok(1)
}
