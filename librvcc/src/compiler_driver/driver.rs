// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `driver` module defines `Driver`, which is the rvcc compiler driver type.

use std::fs::File;

use super::diagnostics::Diagnostic;
use super::options::DriverOptions;
use super::DriverError;

use crate::codegen;
use crate::ir;
use crate::lexer;
use crate::parser;
use crate::sema;

/// The rvcc compiler driver.
///
/// The driver owns the file handling around the pipeline: it reads the source file, runs
/// the stages the options ask for, and writes the assembly file. Each diagnosable error
/// is printed to the error stream and aborts the run.
pub struct Driver {
    source_filename: String,
    asm_filename: String,
    options: DriverOptions,
}

impl Driver {
    /// Creates a new compiler driver configured to compile the given source file.
    pub fn new(source_filename: &str, options: DriverOptions) -> Self {
        let asm_filename =
            options.output_filename.clone().unwrap_or_else(|| "aprog.S".to_string());

        Self { source_filename: source_filename.to_string(), asm_filename, options }
    }

    /// The path of the assembly file the driver writes.
    pub fn asm_filename(&self) -> &str {
        &self.asm_filename
    }

    /// Runs the compiler pipeline, honouring the stage-stop and print options.
    pub fn run(&self) -> Result<(), DriverError> {
        let source = std::fs::read_to_string(&self.source_filename).map_err(|e| {
            eprintln!("cannot open '{}': {e}", self.source_filename);
            DriverError::Io(e)
        })?;

        let tokens = lexer::tokenize(&source);
        tracing::debug!(tokens = tokens.len(), "lexical analysis complete");
        if self.options.lex {
            return Ok(());
        }

        let program = parser::parse(tokens).map_err(|d| report(d, DriverError::ParserFailed))?;
        tracing::debug!(functions = program.0.len(), "parsing complete");
        if self.options.print_ast {
            println!("{program:#?}");
        }
        if self.options.parse {
            return Ok(());
        }

        sema::resolve(&program).map_err(|d| report(d, DriverError::SemaFailed))?;
        tracing::debug!("semantic analysis complete");
        if self.options.validate {
            return Ok(());
        }

        let instructions = ir::lower(&program).map_err(|d| report(d, DriverError::LoweringFailed))?;
        tracing::debug!(instructions = instructions.len(), "lowering complete");
        if self.options.print_tac {
            for tac in &instructions {
                println!("{tac}");
            }
        }
        if self.options.tac {
            return Ok(());
        }

        let asm_file = File::create(&self.asm_filename)?;
        codegen::emit(&instructions, asm_file)?;
        tracing::debug!(asm_file = %self.asm_filename, "assembly written");

        Ok(())
    }
}

/// Prints the diagnostic to the error stream and returns the stage error.
fn report(diagnostic: Diagnostic, error: DriverError) -> DriverError {
    eprintln!("{diagnostic}");
    error
}
