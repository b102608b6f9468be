// Copyright 2025-2026 Neil Henderson

//! Integration tests for programs the compiler must reject. Each stage's failures
//! surface as a distinct driver error, and the first error aborts the run.

use librvcc::compiler_driver::{Driver, DriverError, DriverOptions};

use super::utils::compile_error_with_driver;

#[test]
fn unknown_character_fails_the_parse() {
    let error = compile_error_with_driver("int main(void) { return 1 $ 2; }");
    assert!(matches!(error, DriverError::ParserFailed));
}

#[test]
fn missing_semicolon_fails_the_parse() {
    let error = compile_error_with_driver("int main(void) { return 1 }");
    assert!(matches!(error, DriverError::ParserFailed));
}

#[test]
fn empty_for_clauses_fail_the_parse() {
    let error = compile_error_with_driver("int main(void) { for (;;) ; return 0; }");
    assert!(matches!(error, DriverError::ParserFailed));
}

#[test]
fn undeclared_variable_fails_validation() {
    let error = compile_error_with_driver("int main(void) { return x; }");
    assert!(matches!(error, DriverError::SemaFailed));
}

#[test]
fn redeclared_variable_fails_validation() {
    let error = compile_error_with_driver("int main(void) { int x = 1; int x = 2; return x; }");
    assert!(matches!(error, DriverError::SemaFailed));
}

#[test]
fn call_arity_mismatch_fails_validation() {
    let source = "int add(int a, int b) { return a + b; } int main(void) { return add(1, 2, 3); }";
    let error = compile_error_with_driver(source);
    assert!(matches!(error, DriverError::SemaFailed));
}

#[test]
fn redeclared_function_fails_validation() {
    let source = "int f(void) { return 1; } int f(void) { return 2; } int main(void) { return f(); }";
    let error = compile_error_with_driver(source);
    assert!(matches!(error, DriverError::SemaFailed));
}

#[test]
fn break_outside_a_loop_fails_lowering() {
    let error = compile_error_with_driver("int main(void) { break; return 0; }");
    assert!(matches!(error, DriverError::LoweringFailed));
}

#[test]
fn continue_outside_a_loop_fails_lowering() {
    let error = compile_error_with_driver("int main(void) { continue; return 0; }");
    assert!(matches!(error, DriverError::LoweringFailed));
}

#[test]
fn missing_input_file_is_an_io_error() {
    let driver = Driver::new("does-not-exist.c", DriverOptions::default());
    let error = driver.run().expect_err("run should fail");
    assert!(matches!(error, DriverError::Io(_)));
}
