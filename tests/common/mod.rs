#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sym::{Evaluator, SymbolicBit, SymbolicBitVec, VariableAssignments};
use symbolic_legato::verify::{Factor, InitialValues, Input, VerificationInputs};

/// Inputs with every value known. The factors and output live at distinct addresses.
pub fn concrete_inputs(f1: u8, f2: u8) -> VerificationInputs<SymbolicBitVec> {
    VerificationInputs {
        memory_base: 0u8.into(),
        factor1: Factor::constant(0x2000, f1),
        factor2: Factor::constant(0x2001, f2),
        low: 0x2002u32.into(),
        initial: InitialValues::constant(0, 0, 0, false, false),
    }
}

/// Assign each free input of `inputs` a value drawn from a generator seeded with `seed`.
pub fn random_assignments(
    inputs: &VerificationInputs<SymbolicBitVec>,
    seed: u64,
) -> VariableAssignments {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut assignments = VariableAssignments::default();
    for (_, input) in inputs.named_inputs() {
        match input {
            Input::Word(word) => {
                let value = rng.random::<u64>();
                assignments.extend(VariableAssignments::from_value(word, value).iter());
            }
            Input::Bit(bit) => {
                if let Some(id) = bit.maybe_variable() {
                    assignments.insert(id, rng.random::<bool>());
                }
            }
        }
    }

    assignments
}

pub fn evaluate(value: &SymbolicBitVec, assignments: &VariableAssignments) -> Option<u64> {
    Evaluator::new(assignments.clone()).evaluate_vec(value)
}

pub fn evaluate_bit(bit: &SymbolicBit, assignments: &VariableAssignments) -> Option<bool> {
    Evaluator::new(assignments.clone()).evaluate(bit)
}
