//! Symbolic execution of an 8-bit accumulator machine, used to prove a shift-and-add multiplier
//! correct for every input.
//!
//! Machine values are abstract over [word_ops::WordOps] so the same instruction semantics run on
//! fully symbolic or fully known words. The [verify::Verifier] seeds a [state::MachineState] from
//! free inputs, runs the multiplier through the [executor::Executor], and builds an
//! [verify::Obligation] that a [oracle::SolverOracle] decides.
//!
//! ### Memory
//!
//! Memory is backed by one of two strategies selected through [config::VerifierConfig]. Both give
//! identical answers. [mem::DenseMemory] resolves reads eagerly into selections over address
//! equality while [mem::ArrayMemory] keeps store and if-then-else terms in the shape of the theory
//! of arrays.

/// Environment driven configuration.
pub mod config;

/// Instruction set and single instruction semantics.
pub mod emulator;

/// Module for tracking execution of a program across paths. Paths fork when a branch condition
/// cannot be evaluated to a boolean value and are merged again where they meet.
pub mod executor;

/// Module for storing symbolic values at symbolic addresses.
pub mod mem;

/// Boundary to the decision procedure that discharges obligations.
pub mod oracle;

/// Program representation, assembler, and the multiplier under verification.
pub mod program;

pub mod state;
pub mod vectors;
pub mod verify;

#[cfg(feature = "z3")]
mod z3_oracle;

#[cfg(feature = "z3")]
pub use z3_oracle::Z3Oracle;

#[cfg(test)]
mod tests;
