// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `decl` module defines the parsing functions for programs and declarations.

use super::ast::{Declaration, FunctionDeclaration, Program, VarDeclaration};
use super::{ParseResult, Parser, expr, stmt};

use crate::lexer::TokenType;

/// Parses a program: one or more function declarations.
pub(super) fn parse_program(parser: &mut Parser) -> ParseResult<Program> {
    let mut functions = Vec::new();

    loop {
        functions.push(parse_function_declaration(parser)?);
        if parser.peek().has_type(&TokenType::Eoi) {
            break;
        }
    }

    Ok(Program(functions))
}

/// Parses a top-level function declaration: the signature followed by either `;` for a
/// prototype or a block for a definition.
fn parse_function_declaration(parser: &mut Parser) -> ParseResult<FunctionDeclaration> {
    parser.expect(&TokenType::Int)?;
    let name = parser.expect_identifier()?;
    let params = parse_parameter_list(parser)?;

    if parser.try_consume(&TokenType::Semicolon) {
        return Ok(FunctionDeclaration { name, params, body: None });
    }

    let body = stmt::parse_block(parser)?;

    Ok(FunctionDeclaration { name, params, body: Some(body) })
}

/// Parses a declaration appearing as a block item.
///
/// Both variable and function declarations start with `int <id>`; the token after the
/// identifier decides which. A function declaration inside a block must be a prototype,
/// so a `{` after the parameter list is rejected by the `;` expectation.
pub(super) fn parse_declaration(parser: &mut Parser) -> ParseResult<Declaration> {
    parser.expect(&TokenType::Int)?;
    let name = parser.expect_identifier()?;

    if parser.peek().has_type(&TokenType::OpenParen) {
        let params = parse_parameter_list(parser)?;
        parser.expect(&TokenType::Semicolon)?;
        return Ok(Declaration::Function(FunctionDeclaration { name, params, body: None }));
    }

    Ok(Declaration::Variable(parse_variable_declaration_tail(parser, name)?))
}

/// Parses a variable declaration: `int <id> [ = expr ] ;`.
pub(super) fn parse_variable_declaration(parser: &mut Parser) -> ParseResult<VarDeclaration> {
    parser.expect(&TokenType::Int)?;
    let name = parser.expect_identifier()?;
    parse_variable_declaration_tail(parser, name)
}

/// Parses the optional initializer and terminating `;` of a variable declaration.
fn parse_variable_declaration_tail(parser: &mut Parser, name: String) -> ParseResult<VarDeclaration> {
    let initializer = if parser.try_consume(&TokenType::Assignment) {
        Some(expr::parse_expression(parser)?)
    } else {
        None
    };

    parser.expect(&TokenType::Semicolon)?;

    Ok(VarDeclaration { name, initializer })
}

/// Parses a parenthesised parameter list: `void`, empty, or `int <id>` separated by
/// commas.
fn parse_parameter_list(parser: &mut Parser) -> ParseResult<Vec<String>> {
    parser.expect(&TokenType::OpenParen)?;

    let mut params = Vec::new();

    match parser.peek().token_type {
        TokenType::Void => {
            parser.advance();
        }

        TokenType::CloseParen => {}

        _ => loop {
            parser.expect(&TokenType::Int)?;
            params.push(parser.expect_identifier()?);
            if !parser.try_consume(&TokenType::Comma) {
                break;
            }
        },
    }

    parser.expect(&TokenType::CloseParen)?;

    Ok(params)
}
