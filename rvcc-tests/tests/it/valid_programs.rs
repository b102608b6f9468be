// Copyright 2025-2026 Neil Henderson

//! Integration tests that compile complete programs through the driver and verify the
//! emitted assembly.

use librvcc::compiler_driver::{self, Driver, DriverOptions};

use super::utils::{assert_assembly_is_well_formed, compile_with_driver};

#[test]
fn constant_arithmetic_program() {
    let assembly = compile_with_driver("int main(void) { return 2 + 3 * 4; }");

    assert!(assembly.starts_with(".text\n.globl main\n.type main, @function\n"));
    assert!(assembly.contains("main:"));
    assert!(assembly.contains("mul t3, t1, t2"));
    assert!(assembly.contains("add t4, t0, t3"));
    assert_assembly_is_well_formed(&assembly);
}

#[test]
fn compound_assignment_program() {
    let assembly = compile_with_driver("int main(void) { int x = 5; x += 3; return x; }");

    // x lives in the first local slot and is updated in place.
    assert!(assembly.contains("sd t0, -16(s0)"));
    assert!(assembly.contains("add t3, t1, t2"));
    assert!(assembly.contains("sd t3, -16(s0)"));
    assert_assembly_is_well_formed(&assembly);
}

#[test]
fn for_loop_summation_program() {
    let source =
        "int main(void) { int n = 10; int s = 0; for (int i = 1; i <= n; i = i + 1) s = s + i; return s; }";
    let assembly = compile_with_driver(source);

    // Three named locals: n, s, i.
    assert!(assembly.contains("-16(s0)"));
    assert!(assembly.contains("-24(s0)"));
    assert!(assembly.contains("-32(s0)"));

    // The condition uses the inverted slt form for `<=`.
    assert!(assembly.contains("xori"));
    assert_assembly_is_well_formed(&assembly);
}

#[test]
fn short_circuit_program() {
    let assembly =
        compile_with_driver("int main(void) { int a = 1; int b = 0; return a && b || 1; }");

    // Both short-circuit forms appear.
    assert!(assembly.contains("beqz "));
    assert!(assembly.contains("bnez "));
    assert_assembly_is_well_formed(&assembly);
}

#[test]
fn function_call_program() {
    let source = "int add(int a, int b) { return a + b; } int main(void) { return add(20, 22); }";
    let assembly = compile_with_driver(source);

    // Parameters are spilled from a0/a1; the call marshals into the same registers.
    assert!(assembly.contains("add:"));
    assert!(assembly.contains("sd a0, -16(s0)"));
    assert!(assembly.contains("sd a1, -24(s0)"));
    assert!(assembly.contains("mv a0, t0"));
    assert!(assembly.contains("mv a1, t1"));
    assert!(assembly.contains("call add"));
    assert_assembly_is_well_formed(&assembly);
}

#[test]
fn switch_program() {
    let source = "int main(void) { int x = 3; switch (x) { case 1: return 10; case 3: return 30; default: return 0; } }";
    let assembly = compile_with_driver(source);

    // One comparison branch per case, then the default jump.
    assert_eq!(assembly.matches("beq ").count(), 2);
    assert!(assembly.contains("li t4, 10"));
    assert!(assembly.contains("li t5, 30"));
    assert_assembly_is_well_formed(&assembly);
}

#[test]
fn deeply_nested_conditionals_allocate_unique_labels() {
    let source = "
        int f(int a) {
            if (a > 0) {
                if (a > 1) {
                    if (a > 2) {
                        if (a > 3) return 4;
                        else return 3;
                    } else return 2;
                } else return 1;
            } else return 0;
            return -1;
        }
        int main(void) { return f(3); }";
    let assembly = compile_with_driver(source);

    assert_assembly_is_well_formed(&assembly);
}

#[test]
fn compilation_is_deterministic() {
    let source = "int main(void) { int s = 0; for (int i = 1; i <= 10; i += 1) s += i; return s ? s : 1; }";

    let first = compiler_driver::compile_to_assembly(source).expect("should compile");
    let second = compiler_driver::compile_to_assembly(source).expect("should compile");

    assert_eq!(first, second);
}

#[test]
fn library_entry_point_matches_the_driver_output() {
    let source = "int main(void) { return 42; }";

    let from_library = compiler_driver::compile_to_assembly(source).expect("should compile");
    let from_driver = compile_with_driver(source);

    assert_eq!(from_library, from_driver);
}

#[test]
fn default_assembly_filename_is_aprog() {
    let driver = Driver::new("program.c", DriverOptions::default());
    assert_eq!(driver.asm_filename(), "aprog.S");
}

#[test]
fn stage_stop_options_write_no_assembly_file() {
    let dir = tempfile::tempdir().expect("failed to create scratch directory");
    let source_path = dir.path().join("program.c");
    std::fs::write(&source_path, "int main(void) { return 0; }").expect("failed to write source");

    let asm_path = dir.path().join("program.S");
    let options = DriverOptions {
        validate: true,
        output_filename: Some(asm_path.to_string_lossy().into_owned()),
        ..DriverOptions::default()
    };

    let driver = Driver::new(&source_path.to_string_lossy(), options);
    driver.run().expect("validation should succeed");

    assert!(!asm_path.exists());
}
