// Copyright 2025-2026 Neil Henderson

use crate::lexer::tokenize;
use crate::parser;
use crate::sema;
use crate::sema::tests::utils::{resolve_error, resolve_source};

#[test]
fn straight_line_program_resolves() {
    resolve_source("int main(void) { int x = 5; x += 3; return x; }");
}

#[test]
fn undeclared_variable_is_rejected() {
    let diagnostic = resolve_error("int main(void) { return x; }");
    assert!(diagnostic.message().contains("undeclared variable 'x'"));
}

#[test]
fn redeclaration_in_same_scope_is_rejected() {
    let diagnostic = resolve_error("int main(void) { int x = 1; int x = 2; return x; }");
    assert!(diagnostic.message().contains("redeclaration of variable 'x'"));
}

#[test]
fn shadowing_in_inner_scope_is_allowed() {
    resolve_source("int main(void) { int x = 1; { int x = 2; return x; } }");
}

#[test]
fn names_do_not_escape_their_block() {
    let diagnostic = resolve_error("int main(void) { { int y = 1; } return y; }");
    assert!(diagnostic.message().contains("undeclared variable 'y'"));
}

#[test]
fn initializer_may_reference_the_declared_name() {
    // The name is in scope from the point of declaration; the value is indeterminate.
    resolve_source("int main(void) { int x = x; return 0; }");
}

#[test]
fn initializer_may_reference_earlier_declarations() {
    resolve_source("int main(void) { int x = 2; int y = x * x; return y; }");
}

#[test]
fn for_initializer_scope_covers_condition_step_and_body() {
    resolve_source("int main(void) { int s = 0; for (int i = 1; i <= 3; i = i + 1) s = s + i; return s; }");
}

#[test]
fn for_initializer_scope_ends_with_the_loop() {
    let diagnostic =
        resolve_error("int main(void) { for (int i = 0; i < 3; i = i + 1) ; return i; }");
    assert!(diagnostic.message().contains("undeclared variable 'i'"));
}

#[test]
fn loop_bodies_open_their_own_scope() {
    resolve_source("int main(void) { int x = 3; while (x) { int x = 1; x = 0; } return x; }");
}

#[test]
fn function_parameters_resolve_in_the_body() {
    resolve_source("int add(int a, int b) { return a + b; } int main(void) { return add(20, 22); }");
}

#[test]
fn duplicate_parameter_is_rejected() {
    let diagnostic = resolve_error("int f(int a, int a) { return a; }");
    assert!(diagnostic.message().contains("duplicate parameter 'a'"));
}

#[test]
fn parameter_conflicting_with_function_name_is_rejected() {
    let diagnostic = resolve_error("int f(int f) { return f; }");
    assert!(diagnostic.message().contains("conflicts with the name of function 'f'"));
}

#[test]
fn call_to_undeclared_function_is_rejected() {
    let diagnostic = resolve_error("int main(void) { return add(1, 2); }");
    assert!(diagnostic.message().contains("call to undeclared function 'add'"));
}

#[test]
fn call_arity_must_match() {
    let diagnostic =
        resolve_error("int add(int a, int b) { return a + b; } int main(void) { return add(1); }");
    assert!(diagnostic.message().contains("expects 2 argument(s) but 1 were supplied"));
}

#[test]
fn function_redeclaration_is_rejected() {
    let diagnostic =
        resolve_error("int f(void) { return 1; } int f(void) { return 2; } int main(void) { return f(); }");
    assert!(diagnostic.message().contains("redeclaration of function 'f'"));
}

#[test]
fn prototype_followed_by_definition_is_rejected() {
    // A function may not be redeclared globally, even to complete a prototype.
    let diagnostic = resolve_error("int f(void); int f(void) { return 1; }");
    assert!(diagnostic.message().contains("redeclaration of function 'f'"));
}

#[test]
fn prototype_allows_calls_without_a_definition() {
    resolve_source("int getchar(void); int main(void) { return getchar(); }");
}

#[test]
fn local_prototype_allows_calls() {
    resolve_source("int main(void) { int getchar(void); return getchar(); }");
}

#[test]
fn switch_case_bodies_resolve_against_outer_scope() {
    resolve_source("int main(void) { int x = 3; switch (x) { case 1: return x; default: return 0; } }");
}

#[test]
fn resolution_is_idempotent() {
    let program = parser::parse(tokenize("int main(void) { int x = 5; { int y = x; } return x; }"))
        .expect("program should parse");

    assert!(sema::resolve(&program).is_ok());
    assert!(sema::resolve(&program).is_ok());
}

#[test]
fn resolution_is_invariant_under_renaming_of_locals() {
    // Consistently renaming a local that does not collide with an enclosing name must
    // not change the outcome.
    resolve_source("int main(void) { int a = 1; { int b = a; a = b; } return a; }");
    resolve_source("int main(void) { int a = 1; { int z = a; a = z; } return a; }");

    let diagnostic = resolve_error("int main(void) { int a = 1; { int b = a; a = c; } return a; }");
    assert!(diagnostic.message().contains("undeclared variable 'c'"));
}
