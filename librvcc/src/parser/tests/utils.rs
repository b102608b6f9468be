// Copyright 2025 Neil Henderson, Blue Tarp Media.

use crate::compiler_driver::Diagnostic;
use crate::lexer::tokenize;
use crate::parser::{self, *};

pub fn parse_source(source: &str) -> Program {
    parser::parse(tokenize(source)).expect("program should parse")
}

pub fn parse_error(source: &str) -> Diagnostic {
    parser::parse(tokenize(source)).expect_err("parse should fail")
}

/// Wraps the given block items in `int main(void) { ... }`, parses the program, and
/// returns the items of main's body.
pub fn parse_main_body(body: &str) -> Vec<BlockItem> {
    let Program(mut functions) = parse_source(&format!("int main(void) {{ {body} }}"));
    assert_eq!(functions.len(), 1);
    functions.remove(0).body.expect("main should have a body").0
}

/// Parses `return <expr>;` inside main and returns the parsed expression.
pub fn parse_expr(source_expr: &str) -> Expression {
    let mut items = parse_main_body(&format!("return {source_expr};"));
    assert_eq!(items.len(), 1);

    match items.remove(0) {
        BlockItem::Statement(Statement::Return(expr)) => expr,
        other => panic!("expected a return statement, got {other:?}"),
    }
}

/// Parses a single statement inside main and returns it.
pub fn parse_stmt(source_stmt: &str) -> Statement {
    let mut items = parse_main_body(source_stmt);
    assert_eq!(items.len(), 1);

    match items.remove(0) {
        BlockItem::Statement(stmt) => stmt,
        other => panic!("expected a statement, got {other:?}"),
    }
}

// Construction helpers for expected trees.

pub fn int(value: i64) -> Expression {
    Expression::IntLiteral(value)
}

pub fn var(name: &str) -> Expression {
    Expression::Variable(name.to_string())
}

pub fn unary(op: UnaryOp, expr: Expression) -> Expression {
    Expression::Unary { op, expr: Box::new(expr) }
}

pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Expression {
    Expression::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
}

pub fn assign(target: Expression, value: Expression) -> Expression {
    Expression::Assignment { target: Box::new(target), value: Box::new(value) }
}

pub fn compound_assign(op: BinaryOp, target: Expression, value: Expression) -> Expression {
    Expression::CompoundAssignment { op, target: Box::new(target), value: Box::new(value) }
}

pub fn conditional(condition: Expression, then_expr: Expression, else_expr: Expression) -> Expression {
    Expression::Conditional {
        condition: Box::new(condition),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
    }
}
