// Copyright 2025-2026 Neil Henderson

//! main entry point for the rvcc compiler executable.

use std::process::ExitCode;

use clap::Parser;

use librvcc::compiler_driver::{Driver, DriverOptions};

#[derive(Parser, Debug)]
#[command(name = "rvcc", version, about = "A C-subset compiler targeting RV64")]
struct AppArgs {
    /// Path to the source file to compile.
    input: String,

    /// Path of the generated assembly file.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Stop after lexical analysis.
    #[arg(long)]
    lex: bool,

    /// Stop after parsing.
    #[arg(long)]
    parse: bool,

    /// Stop after semantic analysis.
    #[arg(long)]
    validate: bool,

    /// Stop after lowering to three-address code.
    #[arg(long)]
    tac: bool,

    /// Print the parsed AST to stdout.
    #[arg(long)]
    print_ast: bool,

    /// Print the three-address code to stdout.
    #[arg(long)]
    print_tac: bool,
}

/// Initialises the tracing subscriber from the `RVCC_LOG` environment variable. Logging
/// stays disabled when the variable is absent.
fn init_tracing() {
    let Ok(filter) = std::env::var("RVCC_LOG") else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let args = AppArgs::parse();

    let options = DriverOptions {
        lex: args.lex,
        parse: args.parse,
        validate: args.validate,
        tac: args.tac,
        print_ast: args.print_ast,
        print_tac: args.print_tac,
        output_filename: args.output,
    };

    let driver = Driver::new(&args.input, options);

    match driver.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("rvcc: {error}");
            ExitCode::FAILURE
        }
    }
}
