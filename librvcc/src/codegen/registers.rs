// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `registers` module assigns hardware registers to TAC operands.

use std::collections::HashMap;

/// Round-robin register assignment for TAC temporaries and argument values.
///
/// Temporaries cycle through `t0..t6` and argument values through `a0..a6`, both modulo
/// seven. Once a name is mapped it keeps its assignment for the rest of the function.
/// The policy is deliberately naive: two live temporaries seven allocations apart share
/// a register, so complex expressions can clobber their own intermediates. Liveness is
/// not tracked.
pub struct RegisterAllocator {
    temp_counter: usize,
    arg_counter: usize,
    assignments: HashMap<String, String>,
}

impl RegisterAllocator {
    /// Creates an allocator with all counters at zero and no assignments.
    pub fn new() -> Self {
        Self { temp_counter: 0, arg_counter: 0, assignments: HashMap::new() }
    }

    /// The register holding the given TAC operand, assigning the next temporary register
    /// on first sight.
    pub fn register_for(&mut self, name: &str) -> String {
        if let Some(register) = self.assignments.get(name) {
            return register.clone();
        }

        let register = self.next_temp_register();
        self.assignments.insert(name.to_string(), register.clone());
        register
    }

    /// The register holding the given TAC operand, assigning the next *argument*
    /// register on first sight. Used for `param` destinations.
    pub fn arg_register_for(&mut self, name: &str) -> String {
        if let Some(register) = self.assignments.get(name) {
            return register.clone();
        }

        let register = self.next_arg_register();
        self.assignments.insert(name.to_string(), register.clone());
        register
    }

    /// The next argument register in sequence, for marshalling a call argument.
    ///
    /// `param` and `arg` share this counter, per function.
    pub fn next_arg_register(&mut self) -> String {
        let register = format!("a{}", self.arg_counter % 7);
        self.arg_counter += 1;
        register
    }

    fn next_temp_register(&mut self) -> String {
        let register = format!("t{}", self.temp_counter % 7);
        self.temp_counter += 1;
        register
    }
}

impl Default for RegisterAllocator {
    fn default() -> Self {
        Self::new()
    }
}
