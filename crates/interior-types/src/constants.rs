// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
pub const G_NEWTON: f64 = 6.6743015e-11;

/// Earth radius used to scale planet sizes (m).
/// NOTE: layer construction uses 6370 km, not the IUGG mean radius.
pub const R_EARTH: f64 = 6.37e6;

/// One gigapascal (Pa).
pub const GPA: f64 = 1.0e9;

/// Initial density guess for the iron-alloy core (kg/m³).
pub const CORE_DENSITY_GUESS: f64 = 7678.0;

/// Initial density guess for the silicate mantle (kg/m³).
pub const MANTLE_DENSITY_GUESS: f64 = 3000.0;

/// Initial density guess for the ice shell (kg/m³).
pub const ICE_DENSITY_GUESS: f64 = 930.0;

/// Mass fraction of the SiO₂ polymorph in the equimolar rock mixture.
/// Molar masses: SiO₂ 60.083 g, Mg₂SiO₄ 140.69 g.
pub const ROCK_SIO2_FRACTION: f64 = 0.299;

/// Mass fraction of the Mg₂SiO₄ polymorph in the equimolar rock mixture.
pub const ROCK_MG2SIO4_FRACTION: f64 = 0.701;

/// Maximum solver iterations before reporting non-convergence.
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;

/// Largest per-shell density change accepted as converged (kg/m³).
pub const DEFAULT_DENSITY_THRESHOLD: f64 = 10.0;

/// Pressure tolerance of the density-from-pressure inverter (Pa).
pub const DEFAULT_PRESSURE_TOLERANCE: f64 = 0.01;

/// Allowed pressure discrepancy for bounded BM3 inversion (Pa).
pub const BM3_BOUNDED_DISCREPANCY: f64 = 0.05e5;

/// Allowed pressure discrepancy for bounded Vinet/Holzapfel inversion (Pa).
pub const VINET_BOUNDED_DISCREPANCY: f64 = 0.05e9;
