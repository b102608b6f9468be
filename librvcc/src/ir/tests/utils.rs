// Copyright 2025 Neil Henderson, Blue Tarp Media.

use std::collections::HashSet;

use crate::compiler_driver::Diagnostic;
use crate::ir::{self, Tac, TacOp};
use crate::lexer::tokenize;
use crate::parser;
use crate::sema;

pub fn lower_source(source: &str) -> Vec<Tac> {
    let program = parser::parse(tokenize(source)).expect("program should parse");
    sema::resolve(&program).expect("program should resolve");
    ir::lower(&program).expect("program should lower")
}

pub fn lower_error(source: &str) -> Diagnostic {
    let program = parser::parse(tokenize(source)).expect("program should parse");
    sema::resolve(&program).expect("program should resolve");
    ir::lower(&program).expect_err("lowering should fail")
}

/// Every branch or jump in the stream must target a label that the stream defines.
pub fn assert_branch_targets_are_defined(instructions: &[Tac]) {
    let labels: HashSet<&str> = instructions
        .iter()
        .filter(|tac| tac.op == TacOp::Label)
        .map(|tac| tac.arg1.as_str())
        .collect();

    for tac in instructions {
        if let Some(target) = tac.branch_target() {
            assert!(labels.contains(target), "branch to undefined label '{target}': {tac:?}");
        }
    }
}

/// Label definitions must be unique within one compilation unit.
pub fn assert_labels_are_unique(instructions: &[Tac]) {
    let mut seen = HashSet::new();
    for tac in instructions {
        if tac.op == TacOp::Label {
            assert!(seen.insert(tac.arg1.clone()), "label '{}' defined twice", tac.arg1);
        }
    }
}

/// Every temporary that is read must have been written by an earlier quadruple.
pub fn assert_temporaries_written_before_read(instructions: &[Tac]) {
    let mut written = HashSet::new();

    for tac in instructions {
        for read in temporary_reads(tac) {
            assert!(written.contains(read), "temporary '{read}' read before written: {tac:?}");
        }

        if writes_temporary_result(tac.op) && is_temporary(&tac.result) {
            written.insert(tac.result.clone());
        }
    }
}

fn is_temporary(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('t') && chars.clone().next().is_some() && chars.all(|c| c.is_ascii_digit())
}

/// The operands of the quadruple that read a temporary value.
fn temporary_reads(tac: &Tac) -> Vec<&str> {
    let mut reads = Vec::new();

    match tac.op {
        // These carry a name, a constant, or nothing in arg1.
        TacOp::LoadImmediate
        | TacOp::Load
        | TacOp::Label
        | TacOp::Function
        | TacOp::Param
        | TacOp::Call
        | TacOp::Jump => {}

        TacOp::Return => {
            if !tac.arg1.is_empty() {
                reads.push(tac.arg1.as_str());
            }
        }

        _ => {
            reads.push(tac.arg1.as_str());
            if !tac.arg2.is_empty() && is_temporary(&tac.arg2) {
                reads.push(tac.arg2.as_str());
            }
        }
    }

    reads.retain(|name| is_temporary(name));
    reads
}

fn writes_temporary_result(op: TacOp) -> bool {
    !matches!(
        op,
        TacOp::Store
            | TacOp::Jump
            | TacOp::Label
            | TacOp::Function
            | TacOp::Param
            | TacOp::Arg
            | TacOp::Return
            | TacOp::Discard
            | TacOp::BranchEqual
            | TacOp::BranchNotEqual
            | TacOp::BranchEqualZero
            | TacOp::BranchNotEqualZero
            | TacOp::BranchLessThan
            | TacOp::BranchGreaterThan
            | TacOp::BranchLessOrEqual
            | TacOp::BranchGreaterOrEqual
    )
}

/// Finds the position of a label definition in the stream.
pub fn position_of_label(instructions: &[Tac], label: &str) -> usize {
    instructions
        .iter()
        .position(|tac| tac.op == TacOp::Label && tac.arg1 == label)
        .unwrap_or_else(|| panic!("label '{label}' is not defined"))
}
