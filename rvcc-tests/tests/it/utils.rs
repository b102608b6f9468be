// Copyright 2025 Neil Henderson, Blue Tarp Media.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use librvcc::compiler_driver::{Driver, DriverError, DriverOptions};

/// Writes the source text into a scratch file, runs the driver over it, and returns the
/// emitted assembly text.
pub fn compile_with_driver(source: &str) -> String {
    let dir = tempfile::tempdir().expect("failed to create scratch directory");

    let source_path = dir.path().join("program.c");
    let mut source_file = std::fs::File::create(&source_path).expect("failed to create source file");
    source_file.write_all(source.as_bytes()).expect("failed to write source file");

    let asm_path = dir.path().join("program.S");
    let driver = make_driver(&source_path, &asm_path);

    driver.run().expect("compilation should succeed");

    std::fs::read_to_string(&asm_path).expect("assembly file should exist")
}

/// Runs the driver over the source and returns the error it fails with.
pub fn compile_error_with_driver(source: &str) -> DriverError {
    let dir = tempfile::tempdir().expect("failed to create scratch directory");

    let source_path = dir.path().join("program.c");
    let mut source_file = std::fs::File::create(&source_path).expect("failed to create source file");
    source_file.write_all(source.as_bytes()).expect("failed to write source file");

    let asm_path = dir.path().join("program.S");
    let driver = make_driver(&source_path, &asm_path);

    driver.run().expect_err("compilation should fail")
}

fn make_driver(source_path: &Path, asm_path: &Path) -> Driver {
    let options = DriverOptions {
        output_filename: Some(asm_path.to_string_lossy().into_owned()),
        ..DriverOptions::default()
    };

    Driver::new(&source_path.to_string_lossy(), options)
}

/// Checks the structural invariants of an emitted assembly file: every branch target is
/// defined as a label, and prologues pair with at least one epilogue per function.
pub fn assert_assembly_is_well_formed(assembly: &str) {
    let lines: Vec<&str> = assembly.lines().map(str::trim).collect();

    let labels: HashSet<&str> =
        lines.iter().filter(|line| line.ends_with(':')).map(|line| line.trim_end_matches(':')).collect();

    for line in &lines {
        let target = if let Some(rest) = line.strip_prefix("j ") {
            Some(rest.trim())
        } else if line.starts_with("beqz ")
            || line.starts_with("bnez ")
            || line.starts_with("beq ")
            || line.starts_with("bne ")
            || line.starts_with("blt ")
            || line.starts_with("bge ")
        {
            line.rsplit(", ").next()
        } else {
            None
        };

        if let Some(target) = target {
            assert!(labels.contains(target), "branch to undefined label '{target}' in: {line}");
        }
    }

    let prologues = assembly.matches("addi sp, sp, -64").count();
    let epilogues = assembly.matches("addi sp, sp, 64").count();
    assert!(prologues > 0, "no function prologue emitted");
    assert!(epilogues >= prologues, "fewer epilogues than prologues");
}
