// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `scanner` module defines the [Lexer], a cursor over the source buffer which
//! produces one token at a time.

use super::{Token, TokenType};

/// The lexer scans the source buffer and produces tokens on demand.
///
/// The lexer does not buffer tokens; the parser holds its own lookahead. Once the end of
/// the buffer is reached, `next_token` returns an `Eoi` token repeatedly.
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize, // 1-based
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self { src: source.as_bytes(), pos: 0, line: 1 }
    }

    /// Advances past whitespace and comments and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let Some(ch) = self.peek() else {
            return self.make_token(TokenType::Eoi);
        };

        if ch.is_ascii_alphabetic() {
            return self.scan_identifier_or_keyword();
        }

        if ch.is_ascii_digit() {
            return self.scan_integer_literal();
        }

        self.scan_operator_or_punctuation()
    }

    /// Skips whitespace and `//` and `/* */` comments, counting newlines as they pass.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }

                Some(ch) if ch.is_ascii_whitespace() => self.pos += 1,

                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(ch) = self.peek() {
                        if ch == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }

                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    self.pos += 2;

                    // An unterminated block comment swallows the rest of the input; the
                    // parser then diagnoses whatever construct was left open.
                    while let Some(ch) = self.peek() {
                        if ch == b'*' && self.peek_at(1) == Some(b'/') {
                            self.pos += 2;
                            break;
                        }
                        if ch == b'\n' {
                            self.line += 1;
                        }
                        self.pos += 1;
                    }
                }

                _ => break,
            }
        }
    }

    /// Scans an identifier matching `[A-Za-z][A-Za-z0-9]*`, rewriting keywords to their
    /// dedicated token types.
    fn scan_identifier_or_keyword(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_alphanumeric() {
                break;
            }
            self.pos += 1;
        }

        let lexeme = self.lexeme(start);

        match TokenType::keyword(&lexeme) {
            Some(keyword) => self.make_token(keyword),
            None => self.make_token(TokenType::Identifier(lexeme)),
        }
    }

    /// Scans an integer literal matching `[0-9]+`. The lexeme is retained for the parser
    /// to interpret as a signed 64-bit value.
    fn scan_integer_literal(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.pos += 1;
        }

        self.make_token(TokenType::IntegerLiteral(self.lexeme(start)))
    }

    /// Scans an operator or punctuation token, disambiguating multi-character operators
    /// with single-character lookahead (two characters for `<<=` and `>>=`).
    fn scan_operator_or_punctuation(&mut self) -> Token {
        let first = self.src[self.pos];

        let token_type = match first {
            b'(' => self.take(1, TokenType::OpenParen),
            b')' => self.take(1, TokenType::CloseParen),
            b'{' => self.take(1, TokenType::OpenBrace),
            b'}' => self.take(1, TokenType::CloseBrace),
            b';' => self.take(1, TokenType::Semicolon),
            b':' => self.take(1, TokenType::Colon),
            b',' => self.take(1, TokenType::Comma),
            b'?' => self.take(1, TokenType::Ternary),
            b'~' => self.take(1, TokenType::BitwiseNot),

            b'+' => match self.peek_at(1) {
                Some(b'+') => self.take(2, TokenType::Increment),
                Some(b'=') => self.take(2, TokenType::AdditionAssignment),
                _ => self.take(1, TokenType::Plus),
            },

            b'-' => match self.peek_at(1) {
                Some(b'-') => self.take(2, TokenType::Decrement),
                Some(b'=') => self.take(2, TokenType::SubtractionAssignment),
                _ => self.take(1, TokenType::Minus),
            },

            b'*' => match self.peek_at(1) {
                Some(b'=') => self.take(2, TokenType::MultiplyAssignment),
                _ => self.take(1, TokenType::Multiply),
            },

            b'/' => match self.peek_at(1) {
                Some(b'=') => self.take(2, TokenType::DivideAssignment),
                _ => self.take(1, TokenType::Divide),
            },

            b'%' => match self.peek_at(1) {
                Some(b'=') => self.take(2, TokenType::RemainderAssignment),
                _ => self.take(1, TokenType::Remainder),
            },

            b'&' => match self.peek_at(1) {
                Some(b'&') => self.take(2, TokenType::LogicalAnd),
                Some(b'=') => self.take(2, TokenType::BitwiseAndAssignment),
                _ => self.take(1, TokenType::BitwiseAnd),
            },

            b'|' => match self.peek_at(1) {
                Some(b'|') => self.take(2, TokenType::LogicalOr),
                Some(b'=') => self.take(2, TokenType::BitwiseOrAssignment),
                _ => self.take(1, TokenType::BitwiseOr),
            },

            b'^' => match self.peek_at(1) {
                Some(b'=') => self.take(2, TokenType::BitwiseXorAssignment),
                _ => self.take(1, TokenType::BitwiseXor),
            },

            b'!' => match self.peek_at(1) {
                Some(b'=') => self.take(2, TokenType::NotEqualTo),
                _ => self.take(1, TokenType::LogicalNot),
            },

            b'=' => match self.peek_at(1) {
                Some(b'=') => self.take(2, TokenType::EqualTo),
                _ => self.take(1, TokenType::Assignment),
            },

            b'<' => match (self.peek_at(1), self.peek_at(2)) {
                (Some(b'<'), Some(b'=')) => self.take(3, TokenType::LeftShiftAssignment),
                (Some(b'<'), _) => self.take(2, TokenType::LeftShift),
                (Some(b'='), _) => self.take(2, TokenType::LessThanOrEqualTo),
                _ => self.take(1, TokenType::LessThan),
            },

            b'>' => match (self.peek_at(1), self.peek_at(2)) {
                (Some(b'>'), Some(b'=')) => self.take(3, TokenType::RightShiftAssignment),
                (Some(b'>'), _) => self.take(2, TokenType::RightShift),
                (Some(b'='), _) => self.take(2, TokenType::GreaterThanOrEqualTo),
                _ => self.take(1, TokenType::GreaterThan),
            },

            _ => {
                let start = self.pos;
                self.pos += 1;
                TokenType::Unknown(self.lexeme(start))
            }
        };

        self.make_token(token_type)
    }

    fn take(&mut self, len: usize, token_type: TokenType) -> TokenType {
        self.pos += len;
        token_type
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn lexeme(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token { token_type, line: self.line }
    }
}
