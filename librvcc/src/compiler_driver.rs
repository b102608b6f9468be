// Copyright 2025-2026 Neil Henderson
//
//! The `compiler_driver` module defines the driver that runs the compiler pipeline, plus
//! its options and diagnostics.

pub mod diagnostics;

mod driver;
mod options;

pub use diagnostics::Diagnostic;
pub use driver::Driver;
pub use options::DriverOptions;

use thiserror::Error;

use crate::codegen;
use crate::ir;
use crate::lexer;
use crate::parser;
use crate::sema;

/// The error returned by the compiler driver. The diagnostic behind a failed stage has
/// already been printed to the error stream by the time this is returned.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("parsing failed")]
    ParserFailed,

    #[error("semantic analysis failed")]
    SemaFailed,

    #[error("lowering failed")]
    LoweringFailed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Runs the full pipeline over in-memory source text and returns the assembly text.
///
/// This is the pure core of the driver; it performs no I/O and is what the test suites
/// drive.
pub fn compile_to_assembly(source: &str) -> Result<String, Diagnostic> {
    let tokens = lexer::tokenize(source);
    tracing::debug!(tokens = tokens.len(), "lexical analysis complete");

    let program = parser::parse(tokens)?;
    tracing::debug!(functions = program.0.len(), "parsing complete");

    sema::resolve(&program)?;
    tracing::debug!("semantic analysis complete");

    let instructions = ir::lower(&program)?;
    tracing::debug!(instructions = instructions.len(), "lowering complete");

    Ok(codegen::emit_to_string(&instructions))
}
