// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `expr` module defines the expression parsing functions.
//!
//! Expressions are parsed with precedence climbing (either left- or right-associative
//! depending on the operator).

use super::ast::{BinaryOp, Expression, UnaryOp};
use super::{ParseResult, Parser};

use crate::ICE;
use crate::compiler_driver::Diagnostic;
use crate::lexer::TokenType;

/// The precedence of the prefix unary operators, which bind tighter than any binary
/// operator.
const UNARY_PRECEDENCE: i32 = 14;

/// Parses a tree of (sub)expression(s).
///
/// ```markdown
/// <expr> ::= <unary-expr> | <expr> <binary-op> <expr> | <lhs> <assign-op> <rhs>
///          | <expr> "?" <expr> ":" <expr>
/// ```
pub(super) fn parse_expression(parser: &mut Parser) -> ParseResult<Expression> {
    parse_expression_with_precedence(parser, 0)
}

/// Assignment requires right-associative precedence climbing:  a = b = c    --->  a = (b = c)
/// Remember compound assignment too:                           a += b /= c  --->  a += (b /= c)
/// But everything else is left-associative:                    a + b + c    --->  (a + b) + c
fn parse_expression_with_precedence(parser: &mut Parser, min_precedence: i32) -> ParseResult<Expression> {
    // At the moment this is just a single unary expression, but we name it `left` in case
    // we're about to parse an assignment/ternary/binary operation, in which case it
    // becomes the left-hand-side expression for what follows.
    let mut left = parse_unary_expression(parser)?;

    while is_climbable_operator(&parser.peek().token_type)
        && operator_precedence(&parser.peek().token_type) >= min_precedence
    {
        let token = parser.advance();
        let precedence = operator_precedence(&token.token_type);

        left = match &token.token_type {
            // Assignment (including compound assignment) is right-associative, so the
            // right-hand side is parsed at the operator's own precedence level.
            TokenType::Assignment => {
                let value = parse_expression_with_precedence(parser, precedence)?;
                Expression::Assignment { target: Box::new(left), value: Box::new(value) }
            }

            tt if tt.is_compound_assignment() => {
                let op = translate_compound_assignment(tt);
                let value = parse_expression_with_precedence(parser, precedence)?;
                Expression::CompoundAssignment { op, target: Box::new(left), value: Box::new(value) }
            }

            // Conditional expression
            //      We parse conditional expressions with a trick that lets us interpret
            //      them as binary operations: the three tokens `? <consequent> :` act as
            //      the operator. Both branches are parsed as full expressions, which
            //      also makes the operator right-associative.
            TokenType::Ternary => {
                let then_expr = parse_expression(parser)?;
                parser.expect(&TokenType::Colon)?;
                let else_expr = parse_expression(parser)?;

                Expression::Conditional {
                    condition: Box::new(left),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                }
            }

            // Binary expression
            tt => {
                let op = translate_binary_operator(tt);
                let right = parse_expression_with_precedence(parser, precedence + 1)?;
                Expression::Binary { op, lhs: Box::new(left), rhs: Box::new(right) }
            }
        };
    }

    Ok(left)
}

/// Parses a unary expression: a factor with zero or more prefix unary operators applied.
fn parse_unary_expression(parser: &mut Parser) -> ParseResult<Expression> {
    match parser.peek().token_type {
        TokenType::Minus | TokenType::BitwiseNot | TokenType::LogicalNot => {
            let token = parser.advance();
            let op = translate_unary_operator(&token.token_type);

            // The operand excludes every binary operator.
            let operand = parse_expression_with_precedence(parser, UNARY_PRECEDENCE + 1)?;

            Ok(Expression::Unary { op, expr: Box::new(operand) })
        }

        _ => parse_factor(parser),
    }
}

/// Parses a factor: an integer literal, a parenthesised expression, a variable reference,
/// or a function call.
fn parse_factor(parser: &mut Parser) -> ParseResult<Expression> {
    match &parser.peek().token_type {
        TokenType::IntegerLiteral(_) => {
            let token = parser.advance();
            let TokenType::IntegerLiteral(lexeme) = token.token_type else {
                ICE!("Peeked token should be an integer literal");
            };

            let Ok(value) = lexeme.parse::<i64>() else {
                return Err(Diagnostic::error_on_line(
                    format!("integer literal '{lexeme}' is out of range"),
                    token.line,
                ));
            };

            Ok(Expression::IntLiteral(value))
        }

        TokenType::OpenParen => {
            parser.advance();
            let expr = parse_expression(parser)?;
            parser.expect(&TokenType::CloseParen)?;
            Ok(expr)
        }

        TokenType::Identifier(_) => {
            let name = parser.expect_identifier()?;

            // A function call is an identifier followed immediately by '('.
            if parser.peek().has_type(&TokenType::OpenParen) {
                let args = parse_call_arguments(parser)?;
                return Ok(Expression::FunctionCall { name, args });
            }

            Ok(Expression::Variable(name))
        }

        _ => Err(parser.error_unexpected()),
    }
}

/// Parses the parenthesised, comma-separated argument list of a function call.
fn parse_call_arguments(parser: &mut Parser) -> ParseResult<Vec<Expression>> {
    parser.expect(&TokenType::OpenParen)?;

    let mut args = Vec::new();

    if !parser.peek().has_type(&TokenType::CloseParen) {
        loop {
            args.push(parse_expression(parser)?);
            if !parser.try_consume(&TokenType::Comma) {
                break;
            }
        }
    }

    parser.expect(&TokenType::CloseParen)?;

    Ok(args)
}

/// Is the token an operator the precedence climbing loop can consume?
#[rustfmt::skip]
fn is_climbable_operator(token_type: &TokenType) -> bool {
    matches!(token_type,
        TokenType::Plus                   |
        TokenType::Minus                  |
        TokenType::Multiply               |
        TokenType::Divide                 |
        TokenType::Remainder              |
        TokenType::BitwiseAnd             |
        TokenType::BitwiseXor             |
        TokenType::BitwiseOr              |
        TokenType::LeftShift              |
        TokenType::RightShift             |
        TokenType::LogicalAnd             |
        TokenType::LogicalOr              |
        TokenType::EqualTo                |
        TokenType::NotEqualTo             |
        TokenType::LessThan               |
        TokenType::GreaterThan            |
        TokenType::LessThanOrEqualTo      |
        TokenType::GreaterThanOrEqualTo   |

        // We parse conditional expressions with a trick that lets
        // them appear to be binary operations.
        TokenType::Ternary
    ) || token_type.is_assignment()
}

/// Returns the precedence integer value for the given token type. Higher binds tighter.
#[rustfmt::skip]
fn operator_precedence(token_type: &TokenType) -> i32 {
    match token_type {
        TokenType::Multiply               => 13,
        TokenType::Divide                 => 13,
        TokenType::Remainder              => 13,

        TokenType::Plus                   => 12,
        TokenType::Minus                  => 12,

        TokenType::LeftShift              => 11,
        TokenType::RightShift             => 11,

        TokenType::LessThan               => 10,
        TokenType::LessThanOrEqualTo      => 10,
        TokenType::GreaterThan            => 10,
        TokenType::GreaterThanOrEqualTo   => 10,

        TokenType::EqualTo                => 9,
        TokenType::NotEqualTo             => 9,

        TokenType::BitwiseAnd             => 8,
        TokenType::BitwiseXor             => 7,
        TokenType::BitwiseOr              => 6,
        TokenType::LogicalAnd             => 5,
        TokenType::LogicalOr              => 4,

        TokenType::Ternary                => 3,

        tt if tt.is_assignment()          => 2,

        _ => { ICE!("No precedence for token '{token_type}'") }
    }
}

/// Translates a token into an AST binary operator.
#[rustfmt::skip]
fn translate_binary_operator(token_type: &TokenType) -> BinaryOp {
    match token_type {
        TokenType::Plus                   => BinaryOp::Add,
        TokenType::Minus                  => BinaryOp::Subtract,
        TokenType::Multiply               => BinaryOp::Multiply,
        TokenType::Divide                 => BinaryOp::Divide,
        TokenType::Remainder              => BinaryOp::Remainder,
        TokenType::BitwiseAnd             => BinaryOp::BitwiseAnd,
        TokenType::BitwiseXor             => BinaryOp::BitwiseXor,
        TokenType::BitwiseOr              => BinaryOp::BitwiseOr,
        TokenType::LeftShift              => BinaryOp::LeftShift,
        TokenType::RightShift             => BinaryOp::RightShift,
        TokenType::LogicalAnd             => BinaryOp::LogicalAnd,
        TokenType::LogicalOr              => BinaryOp::LogicalOr,
        TokenType::EqualTo                => BinaryOp::EqualTo,
        TokenType::NotEqualTo             => BinaryOp::NotEqualTo,
        TokenType::LessThan               => BinaryOp::LessThan,
        TokenType::GreaterThan            => BinaryOp::GreaterThan,
        TokenType::LessThanOrEqualTo      => BinaryOp::LessThanOrEqualTo,
        TokenType::GreaterThanOrEqualTo   => BinaryOp::GreaterThanOrEqualTo,
        _ => { ICE!("Token '{token_type}' is not a binary operator") }
    }
}

/// Translates a compound assignment token into the binary operator it applies.
#[rustfmt::skip]
fn translate_compound_assignment(token_type: &TokenType) -> BinaryOp {
    match token_type {
        TokenType::AdditionAssignment     => BinaryOp::Add,
        TokenType::SubtractionAssignment  => BinaryOp::Subtract,
        TokenType::MultiplyAssignment     => BinaryOp::Multiply,
        TokenType::DivideAssignment       => BinaryOp::Divide,
        TokenType::RemainderAssignment    => BinaryOp::Remainder,
        TokenType::BitwiseAndAssignment   => BinaryOp::BitwiseAnd,
        TokenType::BitwiseOrAssignment    => BinaryOp::BitwiseOr,
        TokenType::BitwiseXorAssignment   => BinaryOp::BitwiseXor,
        TokenType::LeftShiftAssignment    => BinaryOp::LeftShift,
        TokenType::RightShiftAssignment   => BinaryOp::RightShift,
        _ => { ICE!("Token '{token_type}' is not a compound assignment operator") }
    }
}

/// Translates a token into an AST unary operator.
fn translate_unary_operator(token_type: &TokenType) -> UnaryOp {
    match token_type {
        TokenType::Minus => UnaryOp::Negate,
        TokenType::BitwiseNot => UnaryOp::BitwiseNot,
        TokenType::LogicalNot => UnaryOp::LogicalNot,
        _ => ICE!("Token '{token_type}' is not a unary operator"),
    }
}
