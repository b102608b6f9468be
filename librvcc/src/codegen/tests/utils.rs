// Copyright 2025 Neil Henderson, Blue Tarp Media.

use crate::codegen;
use crate::ir;
use crate::lexer::tokenize;
use crate::parser;
use crate::sema;

/// Runs the full pipeline over the source and returns the emitted assembly text.
pub fn assemble_source(source: &str) -> String {
    let program = parser::parse(tokenize(source)).expect("program should parse");
    sema::resolve(&program).expect("program should resolve");
    let instructions = ir::lower(&program).expect("program should lower");
    codegen::emit_to_string(&instructions)
}

/// The lines of the emitted assembly, trimmed of indentation.
pub fn assembly_lines(source: &str) -> Vec<String> {
    assemble_source(source).lines().map(|line| line.trim().to_string()).collect()
}
