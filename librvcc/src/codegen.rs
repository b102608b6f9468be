// Copyright 2025-2026 Neil Henderson
//
//! The `codegen` module lowers the TAC stream into RV64 assembly text.

mod emitter;
mod frame;
mod registers;
mod writer;


pub use emitter::{emit, emit_to_string};
