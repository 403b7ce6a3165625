// SPDX-License-Identifier: Apache-2.0

// Failure behavior: truncated documents, schema mismatches, and
// mismatched frame closes must fail cleanly, never hang or succeed.

use mirrorjson::{Error, IoError, JsonIo, JsonReader, SliceReader};
use test_log::test;

/// A read-only backend whose pushback slot is broken.
#[cfg(debug_assertions)]
struct NoPushback<'a>(SliceReader<'a>);

#[cfg(debug_assertions)]
impl JsonIo for NoPushback<'_> {
    fn next_byte(&mut self) -> Result<u8, IoError> {
        self.0.next_byte()
    }
    fn push_back(&mut self, _byte: u8) -> Result<(), IoError> {
        Err(IoError::PushBackRejected)
    }
    fn read_bulk(&mut self, dst: &mut [u8]) -> usize {
        self.0.read_bulk(dst)
    }
    fn write_bulk(&mut self, _src: &[u8]) -> usize {
        0
    }
    fn write_byte(&mut self, _byte: u8) -> Result<(), IoError> {
        Err(IoError::OutputFull)
    }
}

#[test]
fn truncated_object_fails_at_end() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"n": 4"#));
    r.begin_object("root").unwrap();
    assert_eq!(r.read_u32("n").unwrap(), 4);
    assert_eq!(r.end_object(), Err(Error::EndOfData));
}

#[test]
fn empty_input_fails_immediately() {
    let mut r = JsonReader::new(SliceReader::new(b""));
    assert_eq!(r.begin_object("root"), Err(Error::EndOfData));
}

#[test]
fn array_closed_as_object_is_a_contract_violation() {
    let mut r = JsonReader::new(SliceReader::new(b"[1]"));
    r.begin_array("root").unwrap();
    assert_eq!(r.read_i32("").unwrap(), 1);
    assert_eq!(r.end_object(), Err(Error::FrameMismatch));
    // The data error channel is untouched; the array still closes.
    r.end_array().unwrap();
}

#[test]
fn wrong_delimiter_is_a_mismatch() {
    let mut r = JsonReader::new(SliceReader::new(b"[1]"));
    assert_eq!(r.begin_object("root"), Err(Error::Mismatch));
}

#[test]
fn reordered_fields_are_not_tolerated() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"y": 2, "x": 1}"#));
    r.begin_object("root").unwrap();
    assert_eq!(r.read_i32("x"), Err(Error::Mismatch));
}

#[test]
fn whitespace_between_tokens_is_tolerated() {
    let text = b" {\r\n\t\"n\" :\n 4 , \"ok\" : true \n} ";
    let mut r = JsonReader::new(SliceReader::new(text));
    r.begin_object("root").unwrap();
    assert_eq!(r.read_u32("n").unwrap(), 4);
    assert_eq!(r.read_bool("ok").unwrap(), true);
    r.end_object().unwrap();
    assert!(r.peek_end_of_data());
}

#[test]
fn member_label_is_byte_exact() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"alpha": 1, "beta": 2}"#));
    r.begin_object("root").unwrap();
    r.read_member_label("alpha").unwrap();
    // The label and colon are consumed; the cursor sits on the value.
    assert!(!r.peek_array_end());
    assert!(!r.peek_end_of_data());
}

#[test]
fn member_label_case_mismatch_fails() {
    let mut r = JsonReader::new(SliceReader::new(br#"{"alpha": 1}"#));
    r.begin_object("root").unwrap();
    assert_eq!(r.read_member_label("Alpha"), Err(Error::Mismatch));
}

#[test]
fn peek_array_end_does_not_consume() {
    let mut r = JsonReader::new(SliceReader::new(b"[]"));
    r.begin_array("root").unwrap();
    assert!(r.peek_array_end());
    assert!(r.peek_array_end());
    r.end_array().unwrap();
}

// Lookahead must not silently consume the peeked byte when the
// backend cannot take it back.
#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "pushback")]
fn peek_surfaces_broken_pushback_backend() {
    let mut r = JsonReader::new(NoPushback(SliceReader::new(b"[1]")));
    r.begin_array("root").unwrap();
    let _ = r.peek_array_end();
}

#[test]
fn depth_limit_is_enforced() {
    let text: Vec<u8> = core::iter::repeat(b'[').take(40).collect();
    let mut r = JsonReader::new(SliceReader::new(&text));
    let mut result = Ok(());
    for _ in 0..40 {
        result = r.begin_array("deep");
        if result.is_err() {
            break;
        }
    }
    assert_eq!(result, Err(Error::DepthExceeded));
}
