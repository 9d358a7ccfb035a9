//! Capabilities required of the values a symbolic machine model computes with. The machine model
//! is written against these traits and not against any particular constraint engine.

mod ops;

pub use ops::*;
