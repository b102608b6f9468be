// Copyright 2025-2026 Neil Henderson
//
//! The `resolver` module walks the AST top-down, validating declarations and uses.
//!
//! The walk is read-only: the AST is not annotated or rewritten, so resolving the same
//! tree twice is a no-op. The symbol table is discarded when resolution finishes.

use super::symbol_table::{Symbol, SymbolTable};

use crate::compiler_driver::Diagnostic;
use crate::parser::{
    Block, BlockItem, Declaration, Expression, ForInit, FunctionDeclaration, Program, Statement,
    SwitchCase, VarDeclaration,
};

/// The result type returned by resolution functions. The first error aborts resolution.
pub type ResolveResult = Result<(), Diagnostic>;

/// Resolves every name in the program and checks function arity.
pub fn resolve(program: &Program) -> ResolveResult {
    let mut symbols = SymbolTable::new();

    for function in &program.0 {
        resolve_function(function, &mut symbols)?;
    }

    Ok(())
}

fn resolve_function(function: &FunctionDeclaration, symbols: &mut SymbolTable) -> ResolveResult {
    if symbols.declare_function(&function.name, &function.params).is_err() {
        return Err(Diagnostic::error(format!("redeclaration of function '{}'", function.name)));
    }

    let Some(body) = &function.body else {
        return Ok(());
    };

    // Parameters live in a scope that encloses the function body.
    symbols.enter_scope();

    for param in &function.params {
        if param == &function.name {
            return Err(Diagnostic::error(format!(
                "parameter '{param}' conflicts with the name of function '{}'",
                function.name
            )));
        }

        if symbols.declare(param, Symbol::Variable).is_err() {
            return Err(Diagnostic::error(format!(
                "duplicate parameter '{param}' in function '{}'",
                function.name
            )));
        }
    }

    resolve_block(body, symbols)?;

    symbols.exit_scope();

    Ok(())
}

fn resolve_block(block: &Block, symbols: &mut SymbolTable) -> ResolveResult {
    symbols.enter_scope();

    for item in &block.0 {
        match item {
            BlockItem::Declaration(decl) => resolve_declaration(decl, symbols)?,
            BlockItem::Statement(stmt) => resolve_statement(stmt, symbols)?,
        }
    }

    symbols.exit_scope();

    Ok(())
}

fn resolve_declaration(declaration: &Declaration, symbols: &mut SymbolTable) -> ResolveResult {
    match declaration {
        Declaration::Variable(var_decl) => resolve_variable_declaration(var_decl, symbols),

        // A local prototype enters both the current scope and the global function map.
        Declaration::Function(func_decl) => {
            if symbols
                .declare(&func_decl.name, Symbol::Function { params: func_decl.params.clone() })
                .is_err()
            {
                return Err(Diagnostic::error(format!(
                    "redeclaration of '{}' in the same scope",
                    func_decl.name
                )));
            }

            if symbols.declare_function(&func_decl.name, &func_decl.params).is_err() {
                return Err(Diagnostic::error(format!(
                    "redeclaration of function '{}'",
                    func_decl.name
                )));
            }

            Ok(())
        }
    }
}

fn resolve_variable_declaration(decl: &VarDeclaration, symbols: &mut SymbolTable) -> ResolveResult {
    if symbols.declare(&decl.name, Symbol::Variable).is_err() {
        return Err(Diagnostic::error(format!("redeclaration of variable '{}'", decl.name)));
    }

    // The name is in scope from the point of declaration, so `int x = x;` resolves. The
    // value it reads is indeterminate.
    if let Some(initializer) = &decl.initializer {
        resolve_expression(initializer, symbols)?;
    }

    Ok(())
}

fn resolve_statement(statement: &Statement, symbols: &mut SymbolTable) -> ResolveResult {
    match statement {
        Statement::Expression(expr) | Statement::Return(expr) => resolve_expression(expr, symbols),

        Statement::Null | Statement::Break | Statement::Continue => Ok(()),

        Statement::Compound(block) => resolve_block(block, symbols),

        Statement::If { condition, then_stmt, else_stmt } => {
            resolve_expression(condition, symbols)?;
            resolve_enclosed_statement(then_stmt, symbols)?;
            if let Some(else_stmt) = else_stmt {
                resolve_enclosed_statement(else_stmt, symbols)?;
            }
            Ok(())
        }

        Statement::While { condition, body } => {
            resolve_expression(condition, symbols)?;
            resolve_enclosed_statement(body, symbols)
        }

        Statement::DoWhile { body, condition } => {
            resolve_enclosed_statement(body, symbols)?;
            resolve_expression(condition, symbols)
        }

        // The outer scope covers all three clauses as well as the body, so a variable
        // declared in the initializer is visible to the condition, step, and body.
        Statement::For { init, condition, step, body } => {
            symbols.enter_scope();

            match init {
                ForInit::Declaration(decl) => resolve_variable_declaration(decl, symbols)?,
                ForInit::Expression(expr) => resolve_expression(expr, symbols)?,
            }

            resolve_expression(condition, symbols)?;
            resolve_expression(step, symbols)?;
            resolve_enclosed_statement(body, symbols)?;

            symbols.exit_scope();
            Ok(())
        }

        Statement::Switch { scrutinee, cases, default } => {
            resolve_expression(scrutinee, symbols)?;

            symbols.enter_scope();
            for SwitchCase { value, body } in cases {
                resolve_expression(value, symbols)?;
                for stmt in body {
                    resolve_statement(stmt, symbols)?;
                }
            }
            if let Some(default_body) = default {
                for stmt in default_body {
                    resolve_statement(stmt, symbols)?;
                }
            }
            symbols.exit_scope();

            Ok(())
        }
    }
}

/// Resolves the body of a control statement inside its own scope.
fn resolve_enclosed_statement(statement: &Statement, symbols: &mut SymbolTable) -> ResolveResult {
    symbols.enter_scope();
    resolve_statement(statement, symbols)?;
    symbols.exit_scope();
    Ok(())
}

fn resolve_expression(expression: &Expression, symbols: &mut SymbolTable) -> ResolveResult {
    match expression {
        Expression::IntLiteral(_) => Ok(()),

        Expression::Variable(name) => {
            if symbols.resolve(name).is_none() {
                return Err(Diagnostic::error(format!("undeclared variable '{name}'")));
            }
            Ok(())
        }

        Expression::Unary { expr, .. } => resolve_expression(expr, symbols),

        Expression::Binary { lhs, rhs, .. } => {
            resolve_expression(lhs, symbols)?;
            resolve_expression(rhs, symbols)
        }

        Expression::Assignment { target, value }
        | Expression::CompoundAssignment { target, value, .. } => {
            resolve_expression(target, symbols)?;
            resolve_expression(value, symbols)
        }

        Expression::Conditional { condition, then_expr, else_expr } => {
            resolve_expression(condition, symbols)?;
            resolve_expression(then_expr, symbols)?;
            resolve_expression(else_expr, symbols)
        }

        Expression::FunctionCall { name, args } => {
            let Some(params) = symbols.function_params(name) else {
                return Err(Diagnostic::error(format!("call to undeclared function '{name}'")));
            };

            if params.len() != args.len() {
                return Err(Diagnostic::error(format!(
                    "function '{name}' expects {} argument(s) but {} were supplied",
                    params.len(),
                    args.len()
                )));
            }

            for arg in args {
                resolve_expression(arg, symbols)?;
            }

            Ok(())
        }
    }
}
