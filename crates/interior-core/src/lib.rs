//! Self-consistent density and pressure profiles of layered planets.
//!
//! Couples per-material equations of state with the Adams-Williamson
//! hydrostatic integral and iterates to a fixed point.

pub mod hydrostatic;
pub mod materials;
pub mod solver;
