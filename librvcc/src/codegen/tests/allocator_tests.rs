// Copyright 2025-2026 Neil Henderson

use crate::codegen::frame::StackFrame;
use crate::codegen::registers::RegisterAllocator;

#[test]
fn temporaries_cycle_through_t0_to_t6() {
    let mut registers = RegisterAllocator::new();

    for i in 0..7 {
        assert_eq!(registers.register_for(&format!("t{i}")), format!("t{i}"));
    }

    // The eighth allocation wraps around.
    assert_eq!(registers.register_for("t7"), "t0");
    assert_eq!(registers.register_for("t8"), "t1");
}

#[test]
fn a_mapped_name_keeps_its_assignment() {
    let mut registers = RegisterAllocator::new();

    assert_eq!(registers.register_for("t0"), "t0");
    assert_eq!(registers.register_for("t1"), "t1");
    assert_eq!(registers.register_for("t0"), "t0");
}

#[test]
fn param_and_arg_values_share_the_argument_counter() {
    let mut registers = RegisterAllocator::new();

    assert_eq!(registers.arg_register_for("a"), "a0");
    assert_eq!(registers.arg_register_for("b"), "a1");
    assert_eq!(registers.arg_register_for("a"), "a0"); // memoized

    // A subsequent call argument continues the same sequence.
    assert_eq!(registers.next_arg_register(), "a2");
}

#[test]
fn argument_registers_wrap_modulo_seven() {
    let mut registers = RegisterAllocator::new();

    for i in 0..7 {
        assert_eq!(registers.next_arg_register(), format!("a{i}"));
    }
    assert_eq!(registers.next_arg_register(), "a0");
}

#[test]
fn frame_slots_descend_in_8_byte_steps() {
    let mut frame = StackFrame::new();

    assert_eq!(frame.offset_of("x"), None);
    assert_eq!(frame.offset_of_or_allocate("x"), -16);
    assert_eq!(frame.offset_of_or_allocate("y"), -24);
    assert_eq!(frame.offset_of_or_allocate("z"), -32);

    // Repeated sightings keep the original slot.
    assert_eq!(frame.offset_of_or_allocate("x"), -16);
    assert_eq!(frame.offset_of("y"), Some(-24));
}
