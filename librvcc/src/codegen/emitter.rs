// Copyright 2025-2026 Neil Henderson
//
//! The `emitter` module walks the TAC stream and emits one RV64 instruction template per
//! opcode.

use std::io::{Result, Write};

use super::frame::{FRAME_SIZE, StackFrame};
use super::registers::RegisterAllocator;
use super::writer::AsmWriter;

use crate::ir::{Tac, TacOp};

/// Emits the assembly for the given TAC stream into the given sink.
pub fn emit<W: Write>(instructions: &[Tac], sink: W) -> Result<()> {
    let mut emitter = AsmEmitter::new(sink);
    emitter.emit_program(instructions)
}

/// Emits the assembly for the given TAC stream into a string.
///
/// Writing into an in-memory buffer cannot fail, so this is the convenient form for the
/// library entry point and for tests.
pub fn emit_to_string(instructions: &[Tac]) -> String {
    let mut buffer = Vec::new();
    emit(instructions, &mut buffer).expect("writing assembly to an in-memory buffer cannot fail");
    String::from_utf8(buffer).expect("emitted assembly is always valid UTF-8")
}

/// The emitter holds the per-function state: register assignments and the stack frame.
///
/// Both are reset on every `function` pseudo-op; nothing else carries across functions.
struct AsmEmitter<W: Write> {
    writer: AsmWriter<W>,
    registers: RegisterAllocator,
    frame: StackFrame,
}

impl<W: Write> AsmEmitter<W> {
    fn new(sink: W) -> Self {
        Self { writer: AsmWriter::new(sink), registers: RegisterAllocator::new(), frame: StackFrame::new() }
    }

    fn emit_program(&mut self, instructions: &[Tac]) -> Result<()> {
        self.writer.write_directive(".text")?;
        self.writer.write_directive(".globl main")?;
        self.writer.write_directive(".type main, @function")?;

        for tac in instructions {
            self.emit_instruction(tac)?;
        }

        self.writer.flush()
    }

    fn emit_instruction(&mut self, tac: &Tac) -> Result<()> {
        match tac.op {
            TacOp::Function => {
                self.registers = RegisterAllocator::new();
                self.frame = StackFrame::new();

                self.writer.write_label(&tac.arg1)?;
                self.emit_prologue()
            }

            TacOp::Return => {
                if !tac.arg1.is_empty() {
                    let src = self.registers.register_for(&tac.arg1);
                    self.writer.write_instruction_with_operands("mv", &["a0", &src])?;
                }
                self.emit_epilogue()
            }

            TacOp::LoadImmediate => {
                let dst = self.registers.register_for(&tac.result);
                self.writer.write_instruction_with_operands("li", &[&dst, &tac.arg1])
            }

            TacOp::Load => {
                // A name with no slot has never been stored or passed as a parameter;
                // reading it is undefined and emits nothing.
                let Some(offset) = self.frame.offset_of(&tac.arg1) else {
                    return Ok(());
                };

                let dst = self.registers.register_for(&tac.result);
                self.writer.write_instruction_with_operands("ld", &[&dst, &format!("{offset}(s0)")])
            }

            TacOp::Store => {
                let offset = self.frame.offset_of_or_allocate(&tac.result);
                let src = self.registers.register_for(&tac.arg1);
                self.writer.write_instruction_with_operands("sd", &[&src, &format!("{offset}(s0)")])
            }

            TacOp::Move => {
                let src = self.registers.register_for(&tac.arg1);
                let dst = self.registers.register_for(&tac.result);
                self.writer.write_instruction_with_operands("mv", &[&dst, &src])
            }

            TacOp::Add => self.emit_binary("add", tac),
            TacOp::Subtract => self.emit_binary("sub", tac),
            TacOp::Multiply => self.emit_binary("mul", tac),
            TacOp::Divide => self.emit_binary("div", tac),
            TacOp::Remainder => self.emit_binary("rem", tac),
            TacOp::BitwiseAnd => self.emit_binary("and", tac),
            TacOp::BitwiseOr => self.emit_binary("or", tac),
            TacOp::BitwiseXor => self.emit_binary("xor", tac),
            TacOp::LeftShift => self.emit_binary("sll", tac),
            TacOp::RightShift => self.emit_binary("srl", tac),

            // RV64 has no three-operand set-if-equal, so equality subtracts and tests
            // the difference against zero in place.
            TacOp::EqualTo => self.emit_compare_to_zero("seqz", tac),
            TacOp::NotEqualTo => self.emit_compare_to_zero("snez", tac),

            TacOp::LessThan => {
                let (lhs, rhs, dst) = self.binary_registers(tac);
                self.writer.write_instruction_with_operands("slt", &[&dst, &lhs, &rhs])
            }

            TacOp::GreaterThan => {
                let (lhs, rhs, dst) = self.binary_registers(tac);
                self.writer.write_instruction_with_operands("slt", &[&dst, &rhs, &lhs])
            }

            // `a <= b` is `!(b < a)`.
            TacOp::LessThanOrEqualTo => {
                let (lhs, rhs, dst) = self.binary_registers(tac);
                self.writer.write_instruction_with_operands("slt", &[&dst, &rhs, &lhs])?;
                self.writer.write_instruction_with_operands("xori", &[&dst, &dst, "1"])
            }

            // `a >= b` is `!(a < b)`.
            TacOp::GreaterThanOrEqualTo => {
                let (lhs, rhs, dst) = self.binary_registers(tac);
                self.writer.write_instruction_with_operands("slt", &[&dst, &lhs, &rhs])?;
                self.writer.write_instruction_with_operands("xori", &[&dst, &dst, "1"])
            }

            TacOp::Negate => self.emit_unary("neg", tac),
            TacOp::BitwiseNot => self.emit_unary("not", tac),
            TacOp::SetEqualZero => self.emit_unary("seqz", tac),

            TacOp::BranchEqualZero => {
                let src = self.registers.register_for(&tac.arg1);
                self.writer.write_instruction_with_operands("beqz", &[&src, &tac.arg2])
            }

            TacOp::BranchNotEqualZero => {
                let src = self.registers.register_for(&tac.arg1);
                self.writer.write_instruction_with_operands("bnez", &[&src, &tac.arg2])
            }

            TacOp::BranchEqual => self.emit_branch("beq", tac, false),
            TacOp::BranchNotEqual => self.emit_branch("bne", tac, false),
            TacOp::BranchLessThan => self.emit_branch("blt", tac, false),
            TacOp::BranchGreaterOrEqual => self.emit_branch("bge", tac, false),

            // `bgt`/`ble` are pseudo-ops; swap the operands of their mirror branches.
            TacOp::BranchGreaterThan => self.emit_branch("blt", tac, true),
            TacOp::BranchLessOrEqual => self.emit_branch("bge", tac, true),

            TacOp::Jump => self.writer.write_instruction_with_operands("j", &[&tac.result]),

            TacOp::Label => self.writer.write_label(&tac.arg1),

            TacOp::Call => {
                self.writer.write_instruction_with_operands("call", &[&tac.arg1])?;

                if !tac.result.is_empty() {
                    let dst = self.registers.register_for(&tac.result);
                    self.writer.write_instruction_with_operands("mv", &[&dst, "a0"])?;
                }

                Ok(())
            }

            TacOp::Arg => {
                let src = self.registers.register_for(&tac.arg1);
                let arg_register = self.registers.next_arg_register();
                self.writer.write_instruction_with_operands("mv", &[&arg_register, &src])
            }

            TacOp::Param => {
                let offset = self.frame.offset_of_or_allocate(&tac.arg1);
                let src = self.registers.arg_register_for(&tac.arg1);
                self.writer.write_instruction_with_operands("sd", &[&src, &format!("{offset}(s0)")])
            }

            TacOp::Discard => Ok(()),
        }
    }

    fn emit_prologue(&mut self) -> Result<()> {
        self.writer.write_instruction_with_operands("addi", &["sp", "sp", &format!("-{FRAME_SIZE}")])?;
        self.writer.write_instruction_with_operands("sd", &["ra", &format!("{}(sp)", FRAME_SIZE - 8)])?;
        self.writer.write_instruction_with_operands("sd", &["s0", &format!("{}(sp)", FRAME_SIZE - 16)])?;
        self.writer.write_instruction_with_operands("addi", &["s0", "sp", &FRAME_SIZE.to_string()])
    }

    fn emit_epilogue(&mut self) -> Result<()> {
        self.writer.write_instruction_with_operands("ld", &["ra", &format!("{}(sp)", FRAME_SIZE - 8)])?;
        self.writer.write_instruction_with_operands("ld", &["s0", &format!("{}(sp)", FRAME_SIZE - 16)])?;
        self.writer.write_instruction_with_operands("addi", &["sp", "sp", &FRAME_SIZE.to_string()])?;
        self.writer.write_instruction("ret")
    }

    /// Maps the operands of a three-operand quadruple to registers, sources first.
    fn binary_registers(&mut self, tac: &Tac) -> (String, String, String) {
        let lhs = self.registers.register_for(&tac.arg1);
        let rhs = self.registers.register_for(&tac.arg2);
        let dst = self.registers.register_for(&tac.result);
        (lhs, rhs, dst)
    }

    fn emit_binary(&mut self, mnemonic: &str, tac: &Tac) -> Result<()> {
        let (lhs, rhs, dst) = self.binary_registers(tac);
        self.writer.write_instruction_with_operands(mnemonic, &[&dst, &lhs, &rhs])
    }

    /// Subtracts the operands and sets the destination from a zero test of the
    /// difference.
    fn emit_compare_to_zero(&mut self, set_mnemonic: &str, tac: &Tac) -> Result<()> {
        let (lhs, rhs, dst) = self.binary_registers(tac);
        self.writer.write_instruction_with_operands("sub", &[&dst, &lhs, &rhs])?;
        self.writer.write_instruction_with_operands(set_mnemonic, &[&dst, &dst])
    }

    fn emit_unary(&mut self, mnemonic: &str, tac: &Tac) -> Result<()> {
        let src = self.registers.register_for(&tac.arg1);
        let dst = self.registers.register_for(&tac.result);
        self.writer.write_instruction_with_operands(mnemonic, &[&dst, &src])
    }

    fn emit_branch(&mut self, mnemonic: &str, tac: &Tac, swap_operands: bool) -> Result<()> {
        let lhs = self.registers.register_for(&tac.arg1);
        let rhs = self.registers.register_for(&tac.arg2);

        if swap_operands {
            self.writer.write_instruction_with_operands(mnemonic, &[&rhs, &lhs, &tac.result])
        } else {
            self.writer.write_instruction_with_operands(mnemonic, &[&lhs, &rhs, &tac.result])
        }
    }
}
