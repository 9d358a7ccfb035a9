//! Symbolic representation of fixed-width binary data. Values are built from [SymbolicBit]s, a
//! small and-inverter circuit over variables and literals. Operations on fully literal values fold
//! to literals, so the same code path serves known and partially constrained data.

mod bit;
mod convert;
mod eval;
mod vec;
mod word;

pub use crate::bit::*;
pub use crate::convert::ConcretizationError;
pub use crate::eval::*;
pub use crate::vec::SymbolicBitVec;
