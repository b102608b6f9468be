// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `diagnostics` module defines the errors emitted by the compiler stages.

use std::fmt;

/// A fatal diagnostic produced by a compiler stage.
///
/// There is no recovery and no diagnostic list: the first error at any stage aborts the
/// compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    line: Option<usize>, // 1-based
}

impl Diagnostic {
    /// Creates an error diagnostic with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), line: None }
    }

    /// Creates an error diagnostic with the given message and source line number.
    pub fn error_on_line(message: impl Into<String>, line: usize) -> Self {
        Self { message: message.into(), line: Some(line) }
    }

    /// The diagnostic message, without the "error:" prefix or location.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The 1-based source line the diagnostic points at, if known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "error: {} on line {}", self.message, line),
            None => write!(f, "error: {}", self.message),
        }
    }
}
