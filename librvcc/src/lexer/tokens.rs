// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The tokens module defines the tokens that the lexer produces.

use std::fmt;

/// Types of tokens produced by lexical analysis.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenType {
    /// End of input. Returned repeatedly once the scanner runs off the end of the buffer.
    Eoi,

    // Single character tokens
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Colon,
    Comma,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    LogicalNot,
    Assignment,
    LessThan,
    GreaterThan,
    Ternary, // Aka conditional

    // Multi-character tokens
    LogicalAnd,
    LogicalOr,
    EqualTo,
    NotEqualTo,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
    LeftShift,
    RightShift,
    Increment,
    Decrement,
    AdditionAssignment,
    SubtractionAssignment,
    MultiplyAssignment,
    DivideAssignment,
    RemainderAssignment,
    BitwiseAndAssignment,
    BitwiseOrAssignment,
    BitwiseXorAssignment,
    LeftShiftAssignment,
    RightShiftAssignment,

    // Keywords
    Int,
    Void,
    Return,
    If,
    Else,
    While,
    For,
    Do,
    Break,
    Continue,
    Switch,
    Case,
    Default,

    // Identifiers and literals
    Identifier(String),

    // The literal is retained as its lexeme and parsed as a signed 64-bit value later.
    IntegerLiteral(String),

    // A character the scanner does not recognise. Never skipped silently; the parser
    // rejects it with a diagnostic.
    Unknown(String),
}

impl TokenType {
    /// Makes an identifier token type with the given name.
    pub fn new_identifier(id: &str) -> TokenType {
        TokenType::Identifier(id.to_string())
    }

    /// Makes an integer literal token type. The given string should only contain digits.
    pub fn new_int_literal(lit: &str) -> TokenType {
        TokenType::IntegerLiteral(lit.to_string())
    }

    /// Looks up the keyword token type for an identifier-shaped lexeme, if it is a keyword.
    #[rustfmt::skip]
    pub fn keyword(lexeme: &str) -> Option<TokenType> {
        match lexeme {
            "int"      => Some(TokenType::Int),
            "void"     => Some(TokenType::Void),
            "return"   => Some(TokenType::Return),
            "if"       => Some(TokenType::If),
            "else"     => Some(TokenType::Else),
            "while"    => Some(TokenType::While),
            "for"      => Some(TokenType::For),
            "do"       => Some(TokenType::Do),
            "break"    => Some(TokenType::Break),
            "continue" => Some(TokenType::Continue),
            "switch"   => Some(TokenType::Switch),
            "case"     => Some(TokenType::Case),
            "default"  => Some(TokenType::Default),
            _ => None,
        }
    }

    /// Does the token type denote one of the assignment operators, `=` included?
    pub fn is_assignment(&self) -> bool {
        self == &TokenType::Assignment || self.is_compound_assignment()
    }

    /// Does the token type denote one of the compound assignment operators, e.g. `+=`?
    pub fn is_compound_assignment(&self) -> bool {
        matches!(
            self,
            TokenType::AdditionAssignment
                | TokenType::SubtractionAssignment
                | TokenType::MultiplyAssignment
                | TokenType::DivideAssignment
                | TokenType::RemainderAssignment
                | TokenType::BitwiseAndAssignment
                | TokenType::BitwiseOrAssignment
                | TokenType::BitwiseXorAssignment
                | TokenType::LeftShiftAssignment
                | TokenType::RightShiftAssignment
        )
    }
}

impl fmt::Display for TokenType {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::Eoi                      => write!(f, "end of input"),

            TokenType::OpenParen                => write!(f, "("),
            TokenType::CloseParen               => write!(f, ")"),
            TokenType::OpenBrace                => write!(f, "{{"),
            TokenType::CloseBrace               => write!(f, "}}"),
            TokenType::Semicolon                => write!(f, ";"),
            TokenType::Colon                    => write!(f, ":"),
            TokenType::Comma                    => write!(f, ","),
            TokenType::Plus                     => write!(f, "+"),
            TokenType::Minus                    => write!(f, "-"),
            TokenType::Multiply                 => write!(f, "*"),
            TokenType::Divide                   => write!(f, "/"),
            TokenType::Remainder                => write!(f, "%"),
            TokenType::BitwiseAnd               => write!(f, "&"),
            TokenType::BitwiseOr                => write!(f, "|"),
            TokenType::BitwiseXor               => write!(f, "^"),
            TokenType::BitwiseNot               => write!(f, "~"),
            TokenType::LogicalNot               => write!(f, "!"),
            TokenType::Assignment               => write!(f, "="),
            TokenType::LessThan                 => write!(f, "<"),
            TokenType::GreaterThan              => write!(f, ">"),
            TokenType::Ternary                  => write!(f, "?"),

            TokenType::LogicalAnd               => write!(f, "&&"),
            TokenType::LogicalOr                => write!(f, "||"),
            TokenType::EqualTo                  => write!(f, "=="),
            TokenType::NotEqualTo               => write!(f, "!="),
            TokenType::LessThanOrEqualTo        => write!(f, "<="),
            TokenType::GreaterThanOrEqualTo     => write!(f, ">="),
            TokenType::LeftShift                => write!(f, "<<"),
            TokenType::RightShift               => write!(f, ">>"),
            TokenType::Increment                => write!(f, "++"),
            TokenType::Decrement                => write!(f, "--"),
            TokenType::AdditionAssignment       => write!(f, "+="),
            TokenType::SubtractionAssignment    => write!(f, "-="),
            TokenType::MultiplyAssignment       => write!(f, "*="),
            TokenType::DivideAssignment         => write!(f, "/="),
            TokenType::RemainderAssignment      => write!(f, "%="),
            TokenType::BitwiseAndAssignment     => write!(f, "&="),
            TokenType::BitwiseOrAssignment      => write!(f, "|="),
            TokenType::BitwiseXorAssignment     => write!(f, "^="),
            TokenType::LeftShiftAssignment      => write!(f, "<<="),
            TokenType::RightShiftAssignment     => write!(f, ">>="),

            TokenType::Int                      => write!(f, "int"),
            TokenType::Void                     => write!(f, "void"),
            TokenType::Return                   => write!(f, "return"),
            TokenType::If                       => write!(f, "if"),
            TokenType::Else                     => write!(f, "else"),
            TokenType::While                    => write!(f, "while"),
            TokenType::For                      => write!(f, "for"),
            TokenType::Do                       => write!(f, "do"),
            TokenType::Break                    => write!(f, "break"),
            TokenType::Continue                 => write!(f, "continue"),
            TokenType::Switch                   => write!(f, "switch"),
            TokenType::Case                     => write!(f, "case"),
            TokenType::Default                  => write!(f, "default"),

            TokenType::Identifier(id)           => write!(f, "{id}"),
            TokenType::IntegerLiteral(lit)      => write!(f, "{lit}"),
            TokenType::Unknown(lexeme)          => write!(f, "{lexeme}"),
        }
    }
}

/// A token produced by lexical analysis.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub line: usize, // 1-based
}

impl Token {
    /// Is the token an identifier?
    pub fn is_identifier(&self) -> bool {
        matches!(self.token_type, TokenType::Identifier(_))
    }

    /// If the token is an identifier, returns its string. Otherwise returns `None`.
    pub fn get_identifier(&self) -> Option<&String> {
        let TokenType::Identifier(ref id) = self.token_type else {
            return None;
        };

        Some(id)
    }

    /// Does the token have the given type?
    pub fn has_type(&self, expected_type: &TokenType) -> bool {
        &self.token_type == expected_type
    }
}

#[cfg(test)]
impl Token {
    /// Creates a Token with a TokenType but a default line number.
    pub fn without_line(token_type: TokenType) -> Self {
        Self { token_type, line: 1 }
    }
}
