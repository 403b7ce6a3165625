// SPDX-License-Identifier: Apache-2.0

// The resumable string read: destination buffers smaller than the
// value, with the engine picking up exactly where it left off.

use mirrorjson::{Error, JsonReader, SliceReader, StrPart};

/// Drains a whole string value through `dst`, collecting the chunks.
fn read_in_chunks(
    reader: &mut JsonReader<SliceReader<'_>>,
    label: &str,
    dst: &mut [u8],
) -> Result<(Vec<u8>, usize), Error> {
    let mut part = StrPart::default();
    let mut assembled = Vec::new();
    let mut calls = 0;
    loop {
        reader.read_str_part(label, dst, &mut part)?;
        calls += 1;
        assembled.extend_from_slice(&dst[..part.len]);
        if !part.more {
            return Ok((assembled, calls));
        }
        part.len = 0;
    }
}

#[test]
fn nine_chars_through_four_bytes() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"s": "abcdefghi"}"#));
    r.begin_object("root").unwrap();

    let mut dst = [0u8; 4];
    let mut part = StrPart::default();
    let mut assembled = Vec::new();
    let mut more_flags = Vec::new();
    loop {
        r.read_str_part("s", &mut dst, &mut part).unwrap();
        assembled.extend_from_slice(&dst[..part.len]);
        more_flags.push(part.more);
        if !part.more {
            break;
        }
        part.len = 0;
    }
    assert_eq!(assembled, b"abcdefghi");
    // Every call but the last reports more pending.
    let (last, rest) = more_flags.split_last().unwrap();
    assert!(!last);
    assert!(rest.iter().all(|&m| m));

    r.end_object().unwrap();
}

#[test]
fn escapes_never_split_across_calls() {
    // 4-byte buffer, value mixing plain chars with a 3-byte \u escape
    // and named escapes.
    let mut r = JsonReader::new(SliceReader::new(
        br#"{"s": "ab\u4e2dcd\n\"ef"}"#,
    ));
    r.begin_object("root").unwrap();
    let mut dst = [0u8; 4];
    let (assembled, _) = read_in_chunks(&mut r, "s", &mut dst).unwrap();
    assert_eq!(assembled, "ab\u{4e2d}cd\n\"ef".as_bytes());
    r.end_object().unwrap();
}

#[test]
fn grow_in_place_accumulates() {
    let text = br#"{"s": "hello world, yes!"}"#;
    let mut r = JsonReader::new(SliceReader::new(text));
    r.begin_object("root").unwrap();

    let mut small = [0u8; 16];
    let mut part = StrPart::default();
    r.read_str_part("s", &mut small, &mut part).unwrap();
    assert!(part.more);
    assert!(part.len > 0);

    // Move the partial content into a larger buffer and continue
    // without resetting `len`: the value accumulates in one place.
    let mut big = [0u8; 64];
    big[..part.len].copy_from_slice(&small[..part.len]);
    r.read_str_part("s", &mut big, &mut part).unwrap();
    assert!(!part.more);
    assert_eq!(&big[..part.len], b"hello world, yes!");
    r.end_object().unwrap();
}

#[test]
fn stale_len_larger_than_buffer_is_rejected() {
    // Resume with a smaller buffer but a leftover `len` from the
    // bigger one: the call must fail cleanly, not underflow.
    let mut r = JsonReader::new(SliceReader::new(br#"{"s": "abcdefghijklmnop"}"#));
    r.begin_object("root").unwrap();

    let mut dst = [0u8; 8];
    let mut part = StrPart::default();
    r.read_str_part("s", &mut dst, &mut part).unwrap();
    assert!(part.more);
    assert!(part.len > 4);

    let mut smaller = [0u8; 4];
    assert_eq!(
        r.read_str_part("s", &mut smaller, &mut part),
        Err(Error::BufferFull)
    );
}

#[test]
fn tiny_destination_is_rejected() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"s": "abc"}"#));
    r.begin_object("root").unwrap();
    let mut dst = [0u8; 3];
    let mut part = StrPart::default();
    assert_eq!(
        r.read_str_part("s", &mut dst, &mut part),
        Err(Error::BufferFull)
    );
}

#[test]
fn one_shot_needs_full_fit() {
    let mut r = JsonReader::new(SliceReader::new(br#"["abcdefghi", "abcd"]"#));
    r.begin_array("root").unwrap();
    let mut dst = [0u8; 4];
    assert_eq!(r.read_str("", &mut dst), Err(Error::BufferFull));
}

#[test]
fn one_shot_exact_fit_succeeds() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"s": "abcd"}"#));
    r.begin_object("root").unwrap();
    let mut dst = [0u8; 4];
    assert_eq!(r.read_str("s", &mut dst).unwrap(), "abcd");
    r.end_object().unwrap();
}

#[test]
fn unterminated_string_is_an_error() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"s": "runs off"#));
    r.begin_object("root").unwrap();
    let mut dst = [0u8; 64];
    assert_eq!(r.read_str("s", &mut dst), Err(Error::EndOfData));
}

#[test]
fn unicode_escapes_decode_to_utf8() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"s": "\u0041\u00e9\u4e2d"}"#));
    r.begin_object("root").unwrap();
    let mut dst = [0u8; 16];
    let text = r.read_str("s", &mut dst).unwrap();
    assert_eq!(text, "A\u{e9}\u{4e2d}");
    // 1 + 2 + 3 bytes of UTF-8 respectively.
    assert_eq!(text.len(), 6);
    r.end_object().unwrap();
}
