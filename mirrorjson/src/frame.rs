// SPDX-License-Identifier: Apache-2.0

//! Nesting-context tracking: one [`Frame`] per open object or array.
//!
//! The stack is a fixed inline array, no heap. Slot 0 is a permanent
//! root frame with array semantics, so a bare top-level object or
//! array round-trips without label handling at depth 0.

use crate::Error;

/// Maximum nesting depth above the implicit root frame.
pub const MAX_DEPTH: usize = 32;

/// One open aggregate: how many members it has seen, and whether it
/// uses array semantics (bare values) or object semantics
/// (`"label": value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    pub count: usize,
    pub is_array: bool,
}

#[derive(Debug)]
pub(crate) struct FrameStack {
    frames: [Frame; MAX_DEPTH + 1],
    depth: usize,
}

impl FrameStack {
    pub fn new() -> Self {
        Self {
            frames: [Frame { count: 0, is_array: true }; MAX_DEPTH + 1],
            depth: 0,
        }
    }

    /// Nesting depth; 0 means only the root frame is open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn at_root(&self) -> bool {
        self.depth == 0
    }

    pub fn top(&self) -> &Frame {
        &self.frames[self.depth]
    }

    /// Records one more member in the current frame.
    pub fn bump(&mut self) {
        self.frames[self.depth].count += 1;
    }

    pub fn push(&mut self, is_array: bool) -> Result<(), Error> {
        if self.depth == MAX_DEPTH {
            return Err(Error::DepthExceeded);
        }
        self.depth += 1;
        self.frames[self.depth] = Frame { count: 0, is_array };
        Ok(())
    }

    /// Closes the current frame, checking it matches the aggregate
    /// kind the caller claims to be ending. A mismatch means the
    /// caller's read/write path disagrees with itself.
    pub fn pop(&mut self, is_array: bool) -> Result<Frame, Error> {
        if self.depth == 0 || self.frames[self.depth].is_array != is_array {
            return Err(Error::FrameMismatch);
        }
        let frame = self.frames[self.depth];
        self.depth -= 1;
        Ok(frame)
    }
}
