use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::{SymbolicBit, SymbolicBitVec};

/// Evaluates [SymbolicBit]s given fixed [VariableAssignments]. Evaluations of shared subterms are
/// cached since the assignments cannot change for a given evaluator.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    assignments: VariableAssignments,

    /// Cached evaluations keyed on the address of a shared subterm. The [Rc] is retained so the
    /// address cannot be reused by another term while the entry exists.
    cache: HashMap<*const SymbolicBit, (Rc<SymbolicBit>, Option<bool>)>,
}

impl Evaluator {
    /// Create a new instance using the given [VariableAssignments]. The assignments are fixed for
    /// the lifetime of this evaluator.
    pub fn new(assignments: impl Into<VariableAssignments>) -> Self {
        Self {
            assignments: assignments.into(),
            cache: Default::default(),
        }
    }

    /// Evaluate the bit. Returns `None` if the value depends on a variable without an assignment.
    pub fn evaluate(&mut self, bit: &SymbolicBit) -> Option<bool> {
        match bit {
            SymbolicBit::Literal(x) => Some(*x),
            SymbolicBit::Variable(id) => self.assignments.get(*id),
            SymbolicBit::Not(x) => self.evaluate_shared(x).map(|x| !x),
            SymbolicBit::And(lhs, rhs) => {
                let lhs = self.evaluate_shared(lhs);
                if lhs == Some(false) {
                    return lhs;
                }

                // Even if LHS is unknown a false RHS decides the conjunction
                match (lhs, self.evaluate_shared(rhs)) {
                    (_, Some(false)) => Some(false),
                    (Some(true), Some(true)) => Some(true),
                    _ => None,
                }
            }
        }
    }

    /// Evaluate each bit of the vector and assemble the little-endian value. Returns `None` if any
    /// bit cannot be evaluated or the vector is wider than 64 bits.
    pub fn evaluate_vec(&mut self, bits: &SymbolicBitVec) -> Option<u64> {
        if bits.len() > u64::BITS as usize {
            return None;
        }

        bits.iter()
            .enumerate()
            .try_fold(0u64, |value, (i, bit)| {
                self.evaluate(bit).map(|b| value | (u64::from(b) << i))
            })
    }

    fn evaluate_shared(&mut self, bit: &Rc<SymbolicBit>) -> Option<bool> {
        let key = Rc::as_ptr(bit);
        if let Some((_, response)) = self.cache.get(&key) {
            return *response;
        }

        let response = self.evaluate(bit);
        self.cache.insert(key, (Rc::clone(bit), response));
        response
    }
}

/// Mapping [SymbolicBit::Variable] identifiers to [SymbolicBit::Literal] values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableAssignments {
    assignments: BTreeMap<usize, bool>,
}

impl VariableAssignments {
    /// Create variable assignments given a [SymbolicBitVec] containing only [SymbolicBit::Variable]
    /// variants and another [SymbolicBitVec] containing only [SymbolicBit::Literal] variants.
    /// Incorrect variants in either will be ignored.
    ///
    /// Both bit vectors should have the same length. In the event they are not equal, the shorter
    /// length will be used for both.
    pub fn from_bitvecs(variables: &SymbolicBitVec, literals: &SymbolicBitVec) -> Self {
        let iter =
            std::iter::zip(variables.iter(), literals.iter()).filter_map(|(variable, literal)| {
                if let SymbolicBit::Variable(variable) = variable
                    && let SymbolicBit::Literal(literal) = literal
                {
                    return Some((*variable, *literal));
                }

                None
            });
        Self::from_iter(iter)
    }

    /// Assign each variable bit of `variables` the corresponding bit of `value`.
    pub fn from_value(variables: &SymbolicBitVec, value: u64) -> Self {
        let literals = SymbolicBitVec::constant(value, variables.len());
        Self::from_bitvecs(variables, &literals)
    }

    pub fn get(&self, variable_id: usize) -> Option<bool> {
        self.assignments.get(&variable_id).copied()
    }

    pub fn insert(&mut self, variable_id: usize, value: bool) {
        self.assignments.insert(variable_id, value);
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.assignments.iter().map(|(&id, &value)| (id, value))
    }
}

impl<I: IntoIterator<Item = (usize, bool)>> From<I> for VariableAssignments {
    fn from(iter: I) -> Self {
        iter.into_iter().collect()
    }
}

impl FromIterator<(usize, bool)> for VariableAssignments {
    fn from_iter<T: IntoIterator<Item = (usize, bool)>>(iter: T) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

impl Extend<(usize, bool)> for VariableAssignments {
    fn extend<T: IntoIterator<Item = (usize, bool)>>(&mut self, iter: T) {
        self.assignments.extend(iter);
    }
}
