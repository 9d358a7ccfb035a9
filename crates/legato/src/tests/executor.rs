use sym::SymbolicBitVec;
use test_log::test;
use word_ops::WordOps;

use super::*;
use crate::emulator::Instruction;
use crate::executor::*;
use crate::program::{Assembler, Program};
use crate::state::*;

/// Counts X down to zero.
fn countdown() -> Program<SymbolicBitVec> {
    Assembler::new()
        .label("loop")
        .dex()
        .bne("loop")
        .halt()
        .assemble()
        .expect("countdown should assemble")
}

fn state_with_x(x: SymbolicBitVec) -> MachineState<SymbolicBitVec> {
    MachineState::uninitialized(MemoryStrategy::Dense, byte(0)).with_register(Register::X, x)
}

#[test]
fn countdown_from_one() -> Result<()> {
    let execution = Executor::new(1000).run(&countdown(), state_with_x(byte(1)))?;
    assert_eq!(execution.trace().count(0), 1);
    assert_eq!(execution.trace().count(2), 1);
    assert_eq!(execution.trace().forks(), 0);
    assert_eq!(execution.state().register(Register::X).known(), Some(0));
    Ok(())
}

#[test]
fn countdown_from_zero_wraps() -> Result<()> {
    let execution = Executor::new(1000).run(&countdown(), state_with_x(byte(0)))?;
    assert_eq!(execution.trace().count(0), 256);
    assert_eq!(execution.trace().steps(), 513);
    assert_eq!(execution.state().register(Register::X).known(), Some(0));
    Ok(())
}

#[test]
fn step_limit() {
    let result = Executor::new(100).run(&countdown(), state_with_x(byte(0)));
    assert_eq!(result.err(), Some(Error::StepLimitExceeded { limit: 100 }));
}

#[test]
fn unbounded_symbolic_loop_hits_step_limit() {
    let result = Executor::new(64).run(&countdown(), state_with_x(symbolic_byte()));
    assert_eq!(result.err(), Some(Error::StepLimitExceeded { limit: 64 }));
}

#[test]
fn running_off_the_end() {
    let program = Program::new(vec![Instruction::ClearCarry]).expect("program is valid");
    let result = Executor::new(10).run(&program, state_with_x(byte(0)));
    assert_eq!(
        result.err(),
        Some(Error::ProgramCounterOutOfRange { pc: 1, len: 1 })
    );
}

#[test]
fn fork_and_merge() -> Result<()> {
    // Load X with 1 or 2 depending on the carry
    let program = Assembler::new()
        .bcc("clear")
        .ldx(1)
        .clc()
        .bcc("done")
        .label("clear")
        .ldx(2)
        .label("done")
        .halt()
        .assemble()
        .expect("program should assemble");

    let carry = symbolic_bit();
    let state = state_with_x(byte(0)).with_flag(Flag::Carry, carry.clone());
    let execution = Executor::new(100).run(&program, state)?;

    assert_eq!(execution.trace().forks(), 1);
    assert_eq!(execution.trace().merges(), 1);
    assert_eq!(execution.trace().count(5), 1);

    let mut assignments = Default::default();
    assign_bit(&mut assignments, &carry, true);
    assert_eq!(evaluate(execution.state().register(Register::X), &assignments), Some(1));
    assert_eq!(evaluate_bit(execution.predicate(), &assignments), Some(true));

    assign_bit(&mut assignments, &carry, false);
    assert_eq!(evaluate(execution.state().register(Register::X), &assignments), Some(2));
    assert_eq!(evaluate_bit(execution.predicate(), &assignments), Some(true));

    Ok(())
}

#[test]
fn multiple_halts_are_merged() -> Result<()> {
    let program = Assembler::new()
        .bcc("other")
        .ldx(1)
        .halt()
        .label("other")
        .ldx(2)
        .halt()
        .assemble()
        .expect("program should assemble");

    let carry = symbolic_bit();
    let state = state_with_x(byte(0)).with_flag(Flag::Carry, carry.clone());
    let execution = Executor::new(100).run(&program, state)?;

    assert_eq!(execution.trace().forks(), 1);
    assert_eq!(execution.trace().merges(), 1);

    let mut assignments = Default::default();
    for (taken, expected) in [(true, 1), (false, 2)] {
        assign_bit(&mut assignments, &carry, taken);
        assert_eq!(
            evaluate(execution.state().register(Register::X), &assignments),
            Some(expected)
        );
    }

    Ok(())
}
