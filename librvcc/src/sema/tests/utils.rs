// Copyright 2025 Neil Henderson, Blue Tarp Media.

use crate::compiler_driver::Diagnostic;
use crate::lexer::tokenize;
use crate::parser;
use crate::sema;

pub fn resolve_source(source: &str) {
    let program = parser::parse(tokenize(source)).expect("program should parse");
    sema::resolve(&program).expect("program should resolve");
}

pub fn resolve_error(source: &str) -> Diagnostic {
    let program = parser::parse(tokenize(source)).expect("program should parse");
    sema::resolve(&program).expect_err("resolution should fail")
}
