// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Equations of State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Isothermal equations of state: pressure as a closed-form function of density.
//!
//! All forms take the density ρ, the reference (zero-pressure) density ρ₀,
//! the zero-pressure bulk modulus B₀ and its pressure derivative B₁, in SI
//! units. Each returns exactly zero at ρ = ρ₀ and increases monotonically
//! with ρ for B₀ > 0. Densities ρ ≤ 0 are outside the domain; use
//! [`checked_pressure`] where the caller cannot guarantee positivity.

use interior_types::error::{InteriorError, InteriorResult};
use interior_types::material::{EosForm, EosParams};

/// Murnaghan: P = (B₀/B₁)·((ρ₀/ρ)^(−B₁) − 1).
pub fn murnaghan(rho: f64, rho0: f64, b0: f64, b1: f64) -> f64 {
    (b0 / b1) * ((rho0 / rho).powf(-b1) - 1.0)
}

/// Third-order Birch-Murnaghan, with x = ρ/ρ₀:
/// P = 1.5·B₀·(x^(7/3) − x^(5/3))·(1 + 0.75·(B₁ − 4)·(x^(2/3) − 1)).
pub fn bm3(rho: f64, rho0: f64, b0: f64, b1: f64) -> f64 {
    let x = rho / rho0;
    1.5 * b0
        * (x.powf(7.0 / 3.0) - x.powf(5.0 / 3.0))
        * (1.0 + 0.75 * (b1 - 4.0) * (x.powf(2.0 / 3.0) - 1.0))
}

/// Vinet, with η = (ρ₀/ρ)^(1/3):
/// P = 3·B₀·((1 − η)/η²)·exp(1.5·(B₁ − 1)·(1 − η)).
pub fn vinet(rho: f64, rho0: f64, b0: f64, b1: f64) -> f64 {
    let eta = (rho0 / rho).cbrt();
    3.0 * b0 * ((1.0 - eta) / (eta * eta)) * (1.5 * (b1 - 1.0) * (1.0 - eta)).exp()
}

/// Evaluate the form named by `params` at density `rho`.
pub fn pressure(params: &EosParams, rho: f64) -> f64 {
    let EosParams { rho0, b0, b1, form } = *params;
    match form {
        EosForm::Murnaghan => murnaghan(rho, rho0, b0, b1),
        EosForm::Bm3 => bm3(rho, rho0, b0, b1),
        EosForm::Vinet => vinet(rho, rho0, b0, b1),
    }
}

/// [`pressure`] with the density domain enforced.
pub fn checked_pressure(params: &EosParams, rho: f64) -> InteriorResult<f64> {
    if !rho.is_finite() || rho <= 0.0 {
        return Err(InteriorError::NumericDomain(format!(
            "{} EoS evaluated at non-positive density {rho}",
            params.form
        )));
    }
    Ok(pressure(params, rho))
}

/// Evaluate a form given by name (`"murnaghan"`, `"bm3"`, `"vinet"`, any case).
pub fn pressure_by_name(form: &str, rho: f64, rho0: f64, b0: f64, b1: f64) -> InteriorResult<f64> {
    let form: EosForm = form.parse()?;
    checked_pressure(&EosParams::new(rho0, b0, b1, form), rho)
}

// Holzapfel iron coefficients. Fixed; the form takes only a density.
const HOLZAPFEL_RHO0: f64 = 13029.22476;
const HOLZAPFEL_P0: f64 = 234.4e9;
const HOLZAPFEL_K: f64 = 1145.7e9;
const HOLZAPFEL_C0: f64 = 3.19;
const HOLZAPFEL_C2: f64 = 2.4;

/// Fixed-coefficient Holzapfel-type pressure for iron, used to cross-check
/// core densities. With y = (ρ₀/ρ)^(1/3):
/// P = P₀ + 3K·(1 − y)·(1 − c₂·y²)·exp(c₀·(1 − y)) / y⁵.
///
/// Equals P₀ (234.4 GPa) at ρ₀ = 13029.22 kg/m³ and decreases with density
/// around ρ₀, so it is only invertible with a direction-aware bracket such
/// as [`crate::invert::invert_bounded`].
pub fn holzapfel_iron(rho: f64) -> f64 {
    let y = (HOLZAPFEL_RHO0 / rho).cbrt();
    HOLZAPFEL_P0
        + 3.0 * HOLZAPFEL_K * (1.0 - y) * (1.0 - HOLZAPFEL_C2 * y * y)
            * (HOLZAPFEL_C0 * (1.0 - y)).exp()
            / y.powi(5)
}

/// Reference density of [`holzapfel_iron`] (kg/m³).
pub fn holzapfel_reference_density() -> f64 {
    HOLZAPFEL_RHO0
}
