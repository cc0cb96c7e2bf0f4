//! Mathematical primitives for the planetary interior solver.

pub mod eos;
pub mod invert;
