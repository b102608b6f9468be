// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `writer` module provides functionality to write RV64 assembly text to any
//! `io::Write` sink.

use std::io::{BufWriter, Result, Write};

const INDENT: &str = "    ";

/// A buffered assembly writer.
///
/// Directives and instructions are indented; labels sit in the first column.
pub struct AsmWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> AsmWriter<W> {
    /// Creates a new writer over the given sink.
    pub fn new(sink: W) -> Self {
        Self { writer: BufWriter::new(sink) }
    }

    /// Writes an assembler directive, e.g. `.globl main`.
    pub fn write_directive(&mut self, directive: &str) -> Result<()> {
        writeln!(self.writer, "{directive}")
    }

    /// Writes a label definition.
    ///
    /// The `label` argument should _NOT_ include the `:` character.
    pub fn write_label(&mut self, label: &str) -> Result<()> {
        debug_assert!(!label.contains(':'));
        writeln!(self.writer, "{label}:")
    }

    /// Writes an instruction with no operands.
    pub fn write_instruction(&mut self, mnemonic: &str) -> Result<()> {
        writeln!(self.writer, "{INDENT}{mnemonic}")
    }

    /// Writes an instruction with its comma-separated operands.
    pub fn write_instruction_with_operands(&mut self, mnemonic: &str, operands: &[&str]) -> Result<()> {
        writeln!(self.writer, "{INDENT}{mnemonic} {}", operands.join(", "))
    }

    /// Flushes the output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}
