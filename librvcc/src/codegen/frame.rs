// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `frame` module tracks the stack frame layout of the function being emitted.

use std::collections::HashMap;

/// The fixed stack frame size reserved by every prologue.
pub const FRAME_SIZE: i64 = 64;

/// Stack slot assignment for named variables, relative to the frame pointer `s0`.
///
/// The first local occupies `-16(s0)` (below the saved `ra` and `s0`) and each
/// subsequent one sits 8 bytes lower. Slots are allocated for previously-unseen names
/// appearing as `store` or `param` destinations.
pub struct StackFrame {
    offsets: HashMap<String, i64>,
    cursor: i64,
}

impl StackFrame {
    /// Creates an empty frame with the slot cursor just below the saved registers.
    pub fn new() -> Self {
        Self { offsets: HashMap::new(), cursor: -16 }
    }

    /// The slot offset of a variable, or `None` if it has no slot yet.
    pub fn offset_of(&self, name: &str) -> Option<i64> {
        self.offsets.get(name).copied()
    }

    /// The slot offset of a variable, allocating the next 8-byte slot on first sight.
    pub fn offset_of_or_allocate(&mut self, name: &str) -> i64 {
        if let Some(offset) = self.offset_of(name) {
            return offset;
        }

        let offset = self.cursor;
        self.offsets.insert(name.to_string(), offset);
        self.cursor -= 8;
        offset
    }
}

impl Default for StackFrame {
    fn default() -> Self {
        Self::new()
    }
}
