// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `lexer` module handles the lexical analysis of the source code and produces the
//! stream of tokens consumed by the parser.

mod scanner;
mod tokens;


pub use scanner::Lexer;
pub use tokens::{Token, TokenType};

/// Performs lexical analysis of the whole source buffer and returns the token stream.
///
/// The returned vector always ends with a single `Eoi` token. Characters the scanner does
/// not recognise become `Unknown` tokens; the parser is responsible for rejecting them.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let at_end = token.token_type == TokenType::Eoi;
        tokens.push(token);

        if at_end {
            break;
        }
    }

    tokens
}
