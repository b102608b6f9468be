// Copyright 2025 Neil Henderson, Blue Tarp Media.

use crate::lexer::*;

pub fn compare_token_types(actual: &[Token], expected: &[Token]) {
    assert_eq!(actual.len(), expected.len(), "token streams differ in length");
    for (act, exp) in actual.iter().zip(expected.iter()) {
        assert_eq!(act.token_type, exp.token_type);
    }
}

/// Tokenizes the source and strips the trailing `Eoi` token.
pub fn tokenize_without_eoi(source: &str) -> Vec<Token> {
    let mut tokens = tokenize(source);
    assert_eq!(tokens.last().map(|t| t.token_type.clone()), Some(TokenType::Eoi));
    tokens.pop();
    tokens
}
