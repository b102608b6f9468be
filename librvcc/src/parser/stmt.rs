// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `stmt` module defines the statement and block parsing functions.

use super::ast::{Block, BlockItem, ForInit, Statement, SwitchCase};
use super::{ParseResult, Parser, decl, expr};

use crate::compiler_driver::Diagnostic;
use crate::lexer::TokenType;

/// Parses a statement, dispatching on its leading token.
pub(super) fn parse_statement(parser: &mut Parser) -> ParseResult<Statement> {
    match parser.peek().token_type {
        TokenType::Return => {
            parser.advance();
            let expr = expr::parse_expression(parser)?;
            parser.expect(&TokenType::Semicolon)?;
            Ok(Statement::Return(expr))
        }

        TokenType::If => parse_if_statement(parser),
        TokenType::While => parse_while_statement(parser),
        TokenType::Do => parse_do_while_statement(parser),
        TokenType::For => parse_for_statement(parser),
        TokenType::Switch => parse_switch_statement(parser),

        TokenType::Break => {
            parser.advance();
            parser.expect(&TokenType::Semicolon)?;
            Ok(Statement::Break)
        }

        TokenType::Continue => {
            parser.advance();
            parser.expect(&TokenType::Semicolon)?;
            Ok(Statement::Continue)
        }

        TokenType::OpenBrace => Ok(Statement::Compound(parse_block(parser)?)),

        TokenType::Semicolon => {
            parser.advance();
            Ok(Statement::Null)
        }

        _ => {
            let expr = expr::parse_expression(parser)?;
            parser.expect(&TokenType::Semicolon)?;
            Ok(Statement::Expression(expr))
        }
    }
}

/// Parses a brace-delimited block of block items.
pub(super) fn parse_block(parser: &mut Parser) -> ParseResult<Block> {
    parser.expect(&TokenType::OpenBrace)?;

    let mut items = Vec::new();
    while !parser.peek().has_type(&TokenType::CloseBrace) {
        if parser.peek().has_type(&TokenType::Eoi) {
            break; // The expect below diagnoses the unclosed block.
        }
        items.push(parse_block_item(parser)?);
    }

    parser.expect(&TokenType::CloseBrace)?;

    Ok(Block(items))
}

/// Parses a block item: a declaration (leading `int`) or a statement.
fn parse_block_item(parser: &mut Parser) -> ParseResult<BlockItem> {
    if parser.peek().has_type(&TokenType::Int) {
        Ok(BlockItem::Declaration(decl::parse_declaration(parser)?))
    } else {
        Ok(BlockItem::Statement(parse_statement(parser)?))
    }
}

fn parse_if_statement(parser: &mut Parser) -> ParseResult<Statement> {
    parser.advance();
    parser.expect(&TokenType::OpenParen)?;
    let condition = expr::parse_expression(parser)?;
    parser.expect(&TokenType::CloseParen)?;

    let then_stmt = Box::new(parse_statement(parser)?);

    // `else` binds to the nearest unmatched `if`.
    let else_stmt = if parser.try_consume(&TokenType::Else) {
        Some(Box::new(parse_statement(parser)?))
    } else {
        None
    };

    Ok(Statement::If { condition, then_stmt, else_stmt })
}

fn parse_while_statement(parser: &mut Parser) -> ParseResult<Statement> {
    parser.advance();
    parser.expect(&TokenType::OpenParen)?;
    let condition = expr::parse_expression(parser)?;
    parser.expect(&TokenType::CloseParen)?;

    let body = Box::new(parse_statement(parser)?);

    Ok(Statement::While { condition, body })
}

fn parse_do_while_statement(parser: &mut Parser) -> ParseResult<Statement> {
    parser.advance();
    let body = Box::new(parse_statement(parser)?);

    parser.expect(&TokenType::While)?;
    parser.expect(&TokenType::OpenParen)?;
    let condition = expr::parse_expression(parser)?;
    parser.expect(&TokenType::CloseParen)?;
    parser.expect(&TokenType::Semicolon)?;

    Ok(Statement::DoWhile { body, condition })
}

/// Parses a `for` statement. All three clauses must be present; the initializer may be a
/// variable declaration or an expression.
fn parse_for_statement(parser: &mut Parser) -> ParseResult<Statement> {
    parser.advance();
    parser.expect(&TokenType::OpenParen)?;

    let init = if parser.peek().has_type(&TokenType::Int) {
        ForInit::Declaration(decl::parse_variable_declaration(parser)?)
    } else {
        let expr = expr::parse_expression(parser)?;
        parser.expect(&TokenType::Semicolon)?;
        ForInit::Expression(expr)
    };

    let condition = expr::parse_expression(parser)?;
    parser.expect(&TokenType::Semicolon)?;

    let step = expr::parse_expression(parser)?;
    parser.expect(&TokenType::CloseParen)?;

    let body = Box::new(parse_statement(parser)?);

    Ok(Statement::For { init, condition, step, body })
}

/// Parses a `switch` statement: the scrutinee, then a braced sequence of `case` labels
/// and at most one `default` label.
fn parse_switch_statement(parser: &mut Parser) -> ParseResult<Statement> {
    parser.advance();
    parser.expect(&TokenType::OpenParen)?;
    let scrutinee = expr::parse_expression(parser)?;
    parser.expect(&TokenType::CloseParen)?;
    parser.expect(&TokenType::OpenBrace)?;

    let mut cases = Vec::new();
    let mut default = None;

    loop {
        match parser.peek().token_type {
            TokenType::Case => {
                parser.advance();
                let value = expr::parse_expression(parser)?;
                parser.expect(&TokenType::Colon)?;
                let body = parse_case_body(parser)?;
                cases.push(SwitchCase { value, body });
            }

            TokenType::Default => {
                let token = parser.advance();
                if default.is_some() {
                    return Err(Diagnostic::error_on_line(
                        "multiple 'default' labels in one switch",
                        token.line,
                    ));
                }
                parser.expect(&TokenType::Colon)?;
                default = Some(parse_case_body(parser)?);
            }

            TokenType::CloseBrace => break,

            _ => return Err(parser.error_unexpected()),
        }
    }

    parser.expect(&TokenType::CloseBrace)?;

    Ok(Statement::Switch { scrutinee, cases, default })
}

/// Parses the statements following a `case` or `default` label, up to the next label or
/// the end of the switch body.
fn parse_case_body(parser: &mut Parser) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();

    loop {
        match parser.peek().token_type {
            TokenType::Case | TokenType::Default | TokenType::CloseBrace | TokenType::Eoi => break,
            _ => statements.push(parse_statement(parser)?),
        }
    }

    Ok(statements)
}
