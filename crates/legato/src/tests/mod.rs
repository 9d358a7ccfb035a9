mod executor;
mod verify;

use sym::{Evaluator, SymbolicBit, SymbolicBitVec, VariableAssignments};

use crate::mem::MemoryStrategy;
use crate::state::{ADDRESS_BITS, WORD_BITS};

pub const STRATEGIES: [MemoryStrategy; 2] = [MemoryStrategy::Dense, MemoryStrategy::Array];

pub fn byte(value: u8) -> SymbolicBitVec {
    value.into()
}

pub fn address(value: u32) -> SymbolicBitVec {
    value.into()
}

pub fn symbolic_byte() -> SymbolicBitVec {
    SymbolicBitVec::with_size(WORD_BITS)
}

pub fn symbolic_address() -> SymbolicBitVec {
    SymbolicBitVec::with_size(ADDRESS_BITS)
}

pub fn symbolic_bit() -> SymbolicBit {
    SymbolicBitVec::with_size(1)[0].clone()
}

/// Assign each vector of variables the paired value.
pub fn assign(values: &[(&SymbolicBitVec, u64)]) -> VariableAssignments {
    values
        .iter()
        .flat_map(|(variables, value)| {
            VariableAssignments::from_value(variables, *value)
                .iter()
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn assign_bit(assignments: &mut VariableAssignments, bit: &SymbolicBit, value: bool) {
    let id = bit.maybe_variable().expect("bit should be a variable");
    assignments.insert(id, value);
}

pub fn evaluate(value: &SymbolicBitVec, assignments: &VariableAssignments) -> Option<u64> {
    Evaluator::new(assignments.clone()).evaluate_vec(value)
}

pub fn evaluate_bit(bit: &SymbolicBit, assignments: &VariableAssignments) -> Option<bool> {
    Evaluator::new(assignments.clone()).evaluate(bit)
}
