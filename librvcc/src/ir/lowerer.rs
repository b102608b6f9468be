// Copyright 2025-2026 Neil Henderson
//
//! The `lowerer` module translates the AST into a flat sequence of TAC quadruples.
//!
//! Fresh temporaries (`t<N>`) and labels (`L<N>`) come from two counters on the lowering
//! context, shared across the whole compilation unit. Loop and switch label stacks give
//! `break` and `continue` their targets while bodies are being lowered.

use super::tac::{Tac, TacOp};

use crate::ICE;
use crate::compiler_driver::Diagnostic;
use crate::parser::{
    BinaryOp, Block, BlockItem, Declaration, Expression, ForInit, FunctionDeclaration, Program,
    Statement, SwitchCase, UnaryOp, VarDeclaration,
};

/// The result type returned by lowering functions. The first error aborts lowering.
pub type LowerResult<T> = Result<T, Diagnostic>;

/// The continue/break targets of an enclosing loop.
struct LoopLabels {
    continue_label: String,
    break_label: String,
}

/// The lowerer manages state for translation from the AST into TAC.
pub struct Lowerer {
    instructions: Vec<Tac>,
    next_temporary: usize,
    next_label: usize,
    loop_labels: Vec<LoopLabels>,
    switch_break_labels: Vec<String>,
}

/// Lowers the program into a flat TAC stream.
pub fn lower(program: &Program) -> LowerResult<Vec<Tac>> {
    let mut lowerer = Lowerer::new();

    for function in &program.0 {
        lowerer.lower_function(function)?;
    }

    Ok(lowerer.instructions)
}

impl Lowerer {
    fn new() -> Self {
        Self {
            instructions: Vec::new(),
            next_temporary: 0,
            next_label: 0,
            loop_labels: Vec::new(),
            switch_break_labels: Vec::new(),
        }
    }

    /// Allocates a fresh temporary name.
    fn make_temporary(&mut self) -> String {
        let id = self.next_temporary;
        self.next_temporary += 1;
        format!("t{id}")
    }

    /// Allocates a fresh label name.
    fn make_label(&mut self) -> String {
        let id = self.next_label;
        self.next_label += 1;
        format!("L{id}")
    }

    fn emit(&mut self, tac: Tac) {
        self.instructions.push(tac);
    }

    /// Runs the given closure with the loop's labels pushed, restoring the stack even if
    /// lowering bails out early.
    fn with_loop_labels<F>(&mut self, labels: LoopLabels, f: F) -> LowerResult<()>
    where
        F: FnOnce(&mut Self) -> LowerResult<()>,
    {
        self.loop_labels.push(labels);
        let result = f(self);
        self.loop_labels.pop();
        result
    }

    /// Runs the given closure with the switch's break label pushed, restoring the stack
    /// even if lowering bails out early.
    fn with_switch_break_label<F>(&mut self, label: String, f: F) -> LowerResult<()>
    where
        F: FnOnce(&mut Self) -> LowerResult<()>,
    {
        self.switch_break_labels.push(label);
        let result = f(self);
        self.switch_break_labels.pop();
        result
    }

    fn lower_function(&mut self, function: &FunctionDeclaration) -> LowerResult<()> {
        let Some(body) = &function.body else {
            return Ok(()); // Prototypes produce no code.
        };

        self.emit(Tac::new(TacOp::Function, &function.name, "", ""));

        // One `param` per parameter, in order, so the emitter copies each argument
        // register into a stack slot.
        for param in &function.params {
            self.emit(Tac::new(TacOp::Param, param, "", ""));
        }

        self.lower_block(body)?;

        // A body that does not end by returning still needs an epilogue; `a0` is left
        // unset.
        if !matches!(self.instructions.last(), Some(Tac { op: TacOp::Return, .. })) {
            self.emit(Tac::new(TacOp::Return, "", "", ""));
        }

        Ok(())
    }

    fn lower_block(&mut self, block: &Block) -> LowerResult<()> {
        for item in &block.0 {
            match item {
                BlockItem::Declaration(decl) => self.lower_declaration(decl)?,
                BlockItem::Statement(stmt) => self.lower_statement(stmt)?,
            }
        }
        Ok(())
    }

    fn lower_declaration(&mut self, declaration: &Declaration) -> LowerResult<()> {
        match declaration {
            Declaration::Variable(var_decl) => self.lower_variable_declaration(var_decl),
            Declaration::Function(_) => Ok(()), // Local prototypes produce no code.
        }
    }

    fn lower_variable_declaration(&mut self, decl: &VarDeclaration) -> LowerResult<()> {
        if let Some(initializer) = &decl.initializer {
            let value_temp = self.lower_expression(initializer)?;
            self.emit(Tac::new(TacOp::Store, &value_temp, "", &decl.name));
        }
        Ok(())
    }

    fn lower_statement(&mut self, statement: &Statement) -> LowerResult<()> {
        match statement {
            Statement::Expression(expr) => {
                let temp = self.lower_expression(expr)?;
                self.emit(Tac::new(TacOp::Discard, &temp, "", ""));
                Ok(())
            }

            Statement::Return(expr) => {
                let temp = self.lower_expression(expr)?;
                self.emit(Tac::new(TacOp::Return, &temp, "", ""));
                Ok(())
            }

            Statement::Null => Ok(()),

            Statement::Compound(block) => self.lower_block(block),

            Statement::If { condition, then_stmt, else_stmt } => {
                self.lower_if_statement(condition, then_stmt, else_stmt.as_deref())
            }

            Statement::While { condition, body } => self.lower_while_statement(condition, body),

            Statement::DoWhile { body, condition } => {
                self.lower_do_while_statement(body, condition)
            }

            Statement::For { init, condition, step, body } => {
                self.lower_for_statement(init, condition, step, body)
            }

            Statement::Break => {
                // A loop takes precedence over an enclosing switch.
                let target = if let Some(labels) = self.loop_labels.last() {
                    labels.break_label.clone()
                } else if let Some(label) = self.switch_break_labels.last() {
                    label.clone()
                } else {
                    return Err(Diagnostic::error("'break' outside of a loop or switch"));
                };

                self.emit(Tac::new(TacOp::Jump, "", "", &target));
                Ok(())
            }

            Statement::Continue => {
                let Some(labels) = self.loop_labels.last() else {
                    return Err(Diagnostic::error("'continue' outside of a loop"));
                };

                let target = labels.continue_label.clone();
                self.emit(Tac::new(TacOp::Jump, "", "", &target));
                Ok(())
            }

            Statement::Switch { scrutinee, cases, default } => {
                self.lower_switch_statement(scrutinee, cases, default.as_deref())
            }
        }
    }

    fn lower_if_statement(
        &mut self,
        condition: &Expression,
        then_stmt: &Statement,
        else_stmt: Option<&Statement>,
    ) -> LowerResult<()> {
        let condition_temp = self.lower_expression(condition)?;

        match else_stmt {
            Some(else_stmt) => {
                let else_label = self.make_label();
                let end_label = self.make_label();

                self.emit(Tac::new(TacOp::BranchEqualZero, &condition_temp, &else_label, ""));
                self.lower_statement(then_stmt)?;
                self.emit(Tac::new(TacOp::Jump, "", "", &end_label));
                self.emit(Tac::new(TacOp::Label, &else_label, "", ""));
                self.lower_statement(else_stmt)?;
                self.emit(Tac::new(TacOp::Label, &end_label, "", ""));
            }

            None => {
                let end_label = self.make_label();

                self.emit(Tac::new(TacOp::BranchEqualZero, &condition_temp, &end_label, ""));
                self.lower_statement(then_stmt)?;
                self.emit(Tac::new(TacOp::Label, &end_label, "", ""));
            }
        }

        Ok(())
    }

    fn lower_while_statement(&mut self, condition: &Expression, body: &Statement) -> LowerResult<()> {
        let start_label = self.make_label();
        let end_label = self.make_label();

        self.emit(Tac::new(TacOp::Label, &start_label, "", ""));
        let condition_temp = self.lower_expression(condition)?;
        self.emit(Tac::new(TacOp::BranchEqualZero, &condition_temp, &end_label, ""));

        let labels =
            LoopLabels { continue_label: start_label.clone(), break_label: end_label.clone() };
        self.with_loop_labels(labels, |lowerer| lowerer.lower_statement(body))?;

        self.emit(Tac::new(TacOp::Jump, "", "", &start_label));
        self.emit(Tac::new(TacOp::Label, &end_label, "", ""));

        Ok(())
    }

    fn lower_do_while_statement(&mut self, body: &Statement, condition: &Expression) -> LowerResult<()> {
        let start_label = self.make_label();
        let condition_label = self.make_label();
        let end_label = self.make_label();

        self.emit(Tac::new(TacOp::Label, &start_label, "", ""));

        let labels =
            LoopLabels { continue_label: condition_label.clone(), break_label: end_label.clone() };
        self.with_loop_labels(labels, |lowerer| lowerer.lower_statement(body))?;

        self.emit(Tac::new(TacOp::Label, &condition_label, "", ""));
        let condition_temp = self.lower_expression(condition)?;
        self.emit(Tac::new(TacOp::BranchNotEqualZero, &condition_temp, &start_label, ""));
        self.emit(Tac::new(TacOp::Label, &end_label, "", ""));

        Ok(())
    }

    fn lower_for_statement(
        &mut self,
        init: &ForInit,
        condition: &Expression,
        step: &Expression,
        body: &Statement,
    ) -> LowerResult<()> {
        let start_label = self.make_label();
        let step_label = self.make_label();
        let end_label = self.make_label();

        match init {
            ForInit::Declaration(decl) => self.lower_variable_declaration(decl)?,
            ForInit::Expression(expr) => {
                self.lower_expression(expr)?;
            }
        }

        self.emit(Tac::new(TacOp::Label, &start_label, "", ""));
        let condition_temp = self.lower_expression(condition)?;
        self.emit(Tac::new(TacOp::BranchEqualZero, &condition_temp, &end_label, ""));

        // `continue` re-enters at the step expression, not the condition.
        let labels =
            LoopLabels { continue_label: step_label.clone(), break_label: end_label.clone() };
        self.with_loop_labels(labels, |lowerer| lowerer.lower_statement(body))?;

        self.emit(Tac::new(TacOp::Label, &step_label, "", ""));
        self.lower_expression(step)?;
        self.emit(Tac::new(TacOp::Jump, "", "", &start_label));
        self.emit(Tac::new(TacOp::Label, &end_label, "", ""));

        Ok(())
    }

    fn lower_switch_statement(
        &mut self,
        scrutinee: &Expression,
        cases: &[SwitchCase],
        default: Option<&[Statement]>,
    ) -> LowerResult<()> {
        let scrutinee_temp = self.lower_expression(scrutinee)?;
        let end_label = self.make_label();

        // Comparisons first: one conditional branch per case label.
        let mut case_labels = Vec::with_capacity(cases.len());
        for case in cases {
            let value_temp = self.lower_expression(&case.value)?;
            let case_label = self.make_label();
            self.emit(Tac::new(TacOp::BranchEqual, &scrutinee_temp, &value_temp, &case_label));
            case_labels.push(case_label);
        }

        let default_label = default.map(|_| self.make_label());
        let fallback = default_label.clone().unwrap_or_else(|| end_label.clone());
        self.emit(Tac::new(TacOp::Jump, "", "", &fallback));

        // Case bodies are concatenated without a jump between them: fall-through is
        // intentional.
        self.with_switch_break_label(end_label.clone(), |lowerer| {
            for (case, case_label) in cases.iter().zip(&case_labels) {
                lowerer.emit(Tac::new(TacOp::Label, case_label, "", ""));
                for stmt in &case.body {
                    lowerer.lower_statement(stmt)?;
                }
            }

            if let (Some(default_body), Some(default_label)) = (default, &default_label) {
                lowerer.emit(Tac::new(TacOp::Label, default_label, "", ""));
                for stmt in default_body {
                    lowerer.lower_statement(stmt)?;
                }
            }

            Ok(())
        })?;

        self.emit(Tac::new(TacOp::Label, &end_label, "", ""));

        Ok(())
    }

    fn lower_expression(&mut self, expression: &Expression) -> LowerResult<String> {
        match expression {
            Expression::IntLiteral(value) => {
                let temp = self.make_temporary();
                self.emit(Tac::new(TacOp::LoadImmediate, &value.to_string(), "", &temp));
                Ok(temp)
            }

            Expression::Variable(name) => {
                let temp = self.make_temporary();
                self.emit(Tac::new(TacOp::Load, name, "", &temp));
                Ok(temp)
            }

            Expression::Unary { op, expr } => {
                let operand = self.lower_expression(expr)?;
                let temp = self.make_temporary();

                match op {
                    UnaryOp::Negate => self.emit(Tac::new(TacOp::Negate, &operand, "", &temp)),
                    UnaryOp::BitwiseNot => {
                        self.emit(Tac::new(TacOp::BitwiseNot, &operand, "", &temp))
                    }
                    // Logical not is "set if equal to zero".
                    UnaryOp::LogicalNot => {
                        self.emit(Tac::new(TacOp::SetEqualZero, &operand, "0", &temp))
                    }
                }

                Ok(temp)
            }

            Expression::Binary { op: BinaryOp::LogicalAnd, lhs, rhs } => {
                self.lower_logical_and(lhs, rhs)
            }

            Expression::Binary { op: BinaryOp::LogicalOr, lhs, rhs } => {
                self.lower_logical_or(lhs, rhs)
            }

            Expression::Binary { op, lhs, rhs } => {
                let left = self.lower_expression(lhs)?;
                let right = self.lower_expression(rhs)?;
                let temp = self.make_temporary();
                self.emit(Tac::new(binary_opcode(*op), &left, &right, &temp));
                Ok(temp)
            }

            Expression::Assignment { target, value } => {
                let name = assignment_target_name(target)?;
                let value_temp = self.lower_expression(value)?;
                self.emit(Tac::new(TacOp::Store, &value_temp, "", name));
                Ok(value_temp)
            }

            Expression::CompoundAssignment { op, target, value } => {
                let name = assignment_target_name(target)?;

                let old_temp = self.make_temporary();
                self.emit(Tac::new(TacOp::Load, name, "", &old_temp));

                let value_temp = self.lower_expression(value)?;
                let result_temp = self.make_temporary();
                self.emit(Tac::new(binary_opcode(*op), &old_temp, &value_temp, &result_temp));
                self.emit(Tac::new(TacOp::Store, &result_temp, "", name));

                Ok(result_temp)
            }

            Expression::Conditional { condition, then_expr, else_expr } => {
                let condition_temp = self.lower_expression(condition)?;
                let else_label = self.make_label();
                let end_label = self.make_label();
                let result = self.make_temporary();

                self.emit(Tac::new(TacOp::BranchEqualZero, &condition_temp, &else_label, ""));

                let then_temp = self.lower_expression(then_expr)?;
                self.emit(Tac::new(TacOp::Move, &then_temp, "", &result));
                self.emit(Tac::new(TacOp::Jump, "", "", &end_label));

                self.emit(Tac::new(TacOp::Label, &else_label, "", ""));
                let else_temp = self.lower_expression(else_expr)?;
                self.emit(Tac::new(TacOp::Move, &else_temp, "", &result));

                self.emit(Tac::new(TacOp::Label, &end_label, "", ""));

                Ok(result)
            }

            Expression::FunctionCall { name, args } => {
                // Arguments are evaluated first; only then are they marshalled into
                // argument registers.
                let mut arg_temps = Vec::with_capacity(args.len());
                for arg in args {
                    arg_temps.push(self.lower_expression(arg)?);
                }

                for arg_temp in &arg_temps {
                    self.emit(Tac::new(TacOp::Arg, arg_temp, "", ""));
                }

                let temp = self.make_temporary();
                self.emit(Tac::new(TacOp::Call, name, "", &temp));
                Ok(temp)
            }
        }
    }

    /// `a && b` evaluates `b` only when `a` is non-zero.
    ///
    /// The skeleton keeps symmetric false/true arms; for `&&` the true arm is emitted
    /// but never targeted. When the right side is evaluated, its value (not a
    /// normalised 0/1) becomes the result.
    fn lower_logical_and(&mut self, lhs: &Expression, rhs: &Expression) -> LowerResult<String> {
        let left = self.lower_expression(lhs)?;

        let false_label = self.make_label();
        let true_label = self.make_label();
        let end_label = self.make_label();
        let result = self.make_temporary();

        self.emit(Tac::new(TacOp::BranchEqualZero, &left, &false_label, ""));

        let right = self.lower_expression(rhs)?;
        self.emit(Tac::new(TacOp::Move, &right, "", &result));
        self.emit(Tac::new(TacOp::Jump, "", "", &end_label));

        self.emit(Tac::new(TacOp::Label, &false_label, "", ""));
        self.emit(Tac::new(TacOp::LoadImmediate, "0", "", &result));
        self.emit(Tac::new(TacOp::Jump, "", "", &end_label));

        self.emit(Tac::new(TacOp::Label, &true_label, "", ""));
        self.emit(Tac::new(TacOp::LoadImmediate, "1", "", &result));

        self.emit(Tac::new(TacOp::Label, &end_label, "", ""));

        Ok(result)
    }

    /// `a || b` evaluates `b` only when `a` is zero; the false arm is the one that is
    /// never targeted here.
    fn lower_logical_or(&mut self, lhs: &Expression, rhs: &Expression) -> LowerResult<String> {
        let left = self.lower_expression(lhs)?;

        let false_label = self.make_label();
        let true_label = self.make_label();
        let end_label = self.make_label();
        let result = self.make_temporary();

        self.emit(Tac::new(TacOp::BranchNotEqualZero, &left, &true_label, ""));

        let right = self.lower_expression(rhs)?;
        self.emit(Tac::new(TacOp::Move, &right, "", &result));
        self.emit(Tac::new(TacOp::Jump, "", "", &end_label));

        self.emit(Tac::new(TacOp::Label, &false_label, "", ""));
        self.emit(Tac::new(TacOp::LoadImmediate, "0", "", &result));
        self.emit(Tac::new(TacOp::Jump, "", "", &end_label));

        self.emit(Tac::new(TacOp::Label, &true_label, "", ""));
        self.emit(Tac::new(TacOp::LoadImmediate, "1", "", &result));

        self.emit(Tac::new(TacOp::Label, &end_label, "", ""));

        Ok(result)
    }
}

/// The destination name of an assignment, which must be a variable reference.
fn assignment_target_name(target: &Expression) -> Result<&str, Diagnostic> {
    match target {
        Expression::Variable(name) => Ok(name),
        _ => Err(Diagnostic::error("the target of an assignment must be a variable")),
    }
}

/// Maps an AST binary operator to its TAC opcode.
#[rustfmt::skip]
fn binary_opcode(op: BinaryOp) -> TacOp {
    match op {
        BinaryOp::Add                   => TacOp::Add,
        BinaryOp::Subtract              => TacOp::Subtract,
        BinaryOp::Multiply              => TacOp::Multiply,
        BinaryOp::Divide                => TacOp::Divide,
        BinaryOp::Remainder             => TacOp::Remainder,
        BinaryOp::BitwiseAnd            => TacOp::BitwiseAnd,
        BinaryOp::BitwiseOr             => TacOp::BitwiseOr,
        BinaryOp::BitwiseXor            => TacOp::BitwiseXor,
        BinaryOp::LeftShift             => TacOp::LeftShift,
        BinaryOp::RightShift            => TacOp::RightShift,
        BinaryOp::EqualTo               => TacOp::EqualTo,
        BinaryOp::NotEqualTo            => TacOp::NotEqualTo,
        BinaryOp::LessThan              => TacOp::LessThan,
        BinaryOp::GreaterThan           => TacOp::GreaterThan,
        BinaryOp::LessThanOrEqualTo     => TacOp::LessThanOrEqualTo,
        BinaryOp::GreaterThanOrEqualTo  => TacOp::GreaterThanOrEqualTo,

        BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
            ICE!("Logical operators are lowered with short-circuit control flow")
        }
    }
}
