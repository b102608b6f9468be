// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `options` module defines the options that control the compiler driver.

/// Options that control how much of the pipeline the driver runs and what it prints.
#[derive(Debug, Default, Clone)]
pub struct DriverOptions {
    /// Stop after lexical analysis.
    pub lex: bool,

    /// Stop after parsing.
    pub parse: bool,

    /// Stop after semantic analysis.
    pub validate: bool,

    /// Stop after lowering to TAC.
    pub tac: bool,

    /// Print the parsed AST to stdout.
    pub print_ast: bool,

    /// Print the TAC stream to stdout.
    pub print_tac: bool,

    /// Path of the generated assembly file. Defaults to `aprog.S` in the working
    /// directory.
    pub output_filename: Option<String>,
}
