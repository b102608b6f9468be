// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `tac` module defines the TAC quadruple type and its opcode set.

use std::fmt;

/// A single three-address code quadruple.
///
/// Operands are plain strings: temporary names follow `t<N>`, label names follow `L<N>`,
/// and named variables keep their source spelling. Unused operands are empty strings.
///
/// Operand conventions worth knowing:
/// - `store` carries the value in `arg1` and the destination *name* in `result`.
/// - `beqz`/`bnez` carry their branch target in `arg2`; the two-register branches and
///   `jmp` carry it in `result`; `label` carries its name in `arg1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tac {
    pub op: TacOp,
    pub arg1: String,
    pub arg2: String,
    pub result: String,
}

impl Tac {
    /// Creates a quadruple.
    pub fn new(op: TacOp, arg1: &str, arg2: &str, result: &str) -> Self {
        Self { op, arg1: arg1.to_string(), arg2: arg2.to_string(), result: result.to_string() }
    }
}

/// The closed set of TAC opcodes.
///
/// Each pass matches on these exhaustively; the `Display` impl gives the conventional
/// spelling used by the TAC printer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TacOp {
    // Values
    LoadImmediate, // li
    Load,
    Store,
    Move,

    // Binary operations, spelled as their source operators
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    EqualTo,
    NotEqualTo,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,

    // Unary operations
    Negate,      // NEG
    BitwiseNot,  // ~
    SetEqualZero, // seq

    // Control transfer
    BranchEqual,        // beq
    BranchNotEqual,     // bne
    BranchEqualZero,    // beqz
    BranchNotEqualZero, // bnez
    BranchLessThan,     // blt
    BranchGreaterThan,  // bgt
    BranchLessOrEqual,  // ble
    BranchGreaterOrEqual, // bge
    Jump,               // jmp
    Label,

    // Function structure
    Function,
    Param,
    Arg,
    Call,
    Return, // RETURN

    // Statement glue
    Discard, // EXPR: evaluate and discard
}

impl fmt::Display for TacOp {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TacOp::LoadImmediate          => write!(f, "li"),
            TacOp::Load                   => write!(f, "load"),
            TacOp::Store                  => write!(f, "store"),
            TacOp::Move                   => write!(f, "move"),

            TacOp::Add                    => write!(f, "+"),
            TacOp::Subtract               => write!(f, "-"),
            TacOp::Multiply               => write!(f, "*"),
            TacOp::Divide                 => write!(f, "/"),
            TacOp::Remainder              => write!(f, "%"),
            TacOp::BitwiseAnd             => write!(f, "&"),
            TacOp::BitwiseOr              => write!(f, "|"),
            TacOp::BitwiseXor             => write!(f, "^"),
            TacOp::LeftShift              => write!(f, "<<"),
            TacOp::RightShift             => write!(f, ">>"),
            TacOp::EqualTo                => write!(f, "=="),
            TacOp::NotEqualTo             => write!(f, "!="),
            TacOp::LessThan               => write!(f, "<"),
            TacOp::GreaterThan            => write!(f, ">"),
            TacOp::LessThanOrEqualTo      => write!(f, "<="),
            TacOp::GreaterThanOrEqualTo   => write!(f, ">="),

            TacOp::Negate                 => write!(f, "NEG"),
            TacOp::BitwiseNot             => write!(f, "~"),
            TacOp::SetEqualZero           => write!(f, "seq"),

            TacOp::BranchEqual            => write!(f, "beq"),
            TacOp::BranchNotEqual         => write!(f, "bne"),
            TacOp::BranchEqualZero        => write!(f, "beqz"),
            TacOp::BranchNotEqualZero     => write!(f, "bnez"),
            TacOp::BranchLessThan         => write!(f, "blt"),
            TacOp::BranchGreaterThan      => write!(f, "bgt"),
            TacOp::BranchLessOrEqual      => write!(f, "ble"),
            TacOp::BranchGreaterOrEqual   => write!(f, "bge"),
            TacOp::Jump                   => write!(f, "jmp"),
            TacOp::Label                  => write!(f, "label"),

            TacOp::Function               => write!(f, "function"),
            TacOp::Param                  => write!(f, "param"),
            TacOp::Arg                    => write!(f, "arg"),
            TacOp::Call                   => write!(f, "call"),
            TacOp::Return                 => write!(f, "RETURN"),

            TacOp::Discard                => write!(f, "EXPR"),
        }
    }
}

impl TacOp {
    /// Does the opcode transfer control to a label?
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            TacOp::BranchEqual
                | TacOp::BranchNotEqual
                | TacOp::BranchEqualZero
                | TacOp::BranchNotEqualZero
                | TacOp::BranchLessThan
                | TacOp::BranchGreaterThan
                | TacOp::BranchLessOrEqual
                | TacOp::BranchGreaterOrEqual
                | TacOp::Jump
        )
    }
}

impl Tac {
    /// The label this quadruple targets, if it transfers control.
    pub fn branch_target(&self) -> Option<&str> {
        match self.op {
            TacOp::BranchEqualZero | TacOp::BranchNotEqualZero => Some(&self.arg2),

            TacOp::BranchEqual
            | TacOp::BranchNotEqual
            | TacOp::BranchLessThan
            | TacOp::BranchGreaterThan
            | TacOp::BranchLessOrEqual
            | TacOp::BranchGreaterOrEqual
            | TacOp::Jump => Some(&self.result),

            _ => None,
        }
    }
}

impl fmt::Display for Tac {
    /// Prints the quadruple in the conventional `result = arg1 op arg2` shape used by
    /// the TAC dump.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arg2.is_empty() {
            write!(f, "{} = {} {}", self.result, self.op, self.arg1)
        } else {
            write!(f, "{} = {} {} {}", self.result, self.arg1, self.op, self.arg2)
        }
    }
}
