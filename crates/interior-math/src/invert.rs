// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Density Inversion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Density from pressure by bracketing and bisection.
//!
//! Two inverters:
//! - [`density_from_pressure`]: open-ended. Starts from the bracket
//!   [0.9·ρ₀, 2·ρ₀], grows the upper bound linearly by ρ₀ until the target
//!   is enclosed, then bisects until |P(ρ) − P_target| < tolerance.
//! - [`invert_bounded`]: caller-supplied bracket and allowed discrepancy,
//!   for any monotone pressure function (increasing or decreasing).
//!
//! Linear growth of the upper bound is slow for very high pressures
//! (one EoS evaluation per ρ₀ of compression) but keeps the bracket tight.

use interior_types::constants::DEFAULT_PRESSURE_TOLERANCE;
use interior_types::error::{InteriorError, InteriorResult};
use interior_types::material::EosParams;
use serde::{Deserialize, Serialize};

use crate::eos::pressure;

/// Initial lower bound as a fraction of ρ₀ (below ρ₀ so P = 0 is enclosed).
const LOWER_BOUND_FACTOR: f64 = 0.9;

/// Initial upper bound as a multiple of ρ₀.
const UPPER_BOUND_FACTOR: f64 = 2.0;

/// Factor applied to the lower bound when the target lies below P(lower).
const LOWER_SHRINK_FACTOR: f64 = 0.5;

/// Smallest lower bound, as a fraction of ρ₀, before giving up.
const MIN_LOWER_FRACTION: f64 = 1e-6;

/// Upper bound on bracket adjustments.
const DEFAULT_MAX_EXPANSIONS: usize = 100_000;

/// Configuration of the open-ended inverter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct InversionConfig {
    /// Accept ρ once |P(ρ) − P_target| < tolerance (Pa). Default: 0.01
    pub tolerance: f64,
    /// Maximum bracket adjustments before reporting a domain error. Default: 100000
    pub max_expansions: usize,
}

impl Default for InversionConfig {
    fn default() -> Self {
        InversionConfig {
            tolerance: DEFAULT_PRESSURE_TOLERANCE,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Result of a density inversion.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Inversion {
    /// Density found (kg/m³).
    pub density: f64,
    /// Pressure at that density (Pa).
    pub pressure: f64,
    /// Pressure evaluations spent bisecting.
    pub evals: u64,
}

/// Density at which `params` produces `target` Pa, within `tolerance` Pa.
pub fn density_from_pressure(target: f64, params: &EosParams, tolerance: f64) -> InteriorResult<f64> {
    let config = InversionConfig {
        tolerance,
        ..InversionConfig::default()
    };
    density_from_pressure_with(target, params, &config).map(|inv| inv.density)
}

/// Same as [`density_from_pressure`], with the form given by name.
pub fn density_from_pressure_named(
    target: f64,
    rho0: f64,
    b0: f64,
    b1: f64,
    form: &str,
    tolerance: f64,
) -> InteriorResult<f64> {
    let params = EosParams::new(rho0, b0, b1, form.parse()?);
    density_from_pressure(target, &params, tolerance)
}

/// Full open-ended inversion, returning the achieved pressure and effort.
pub fn density_from_pressure_with(
    target: f64,
    params: &EosParams,
    config: &InversionConfig,
) -> InteriorResult<Inversion> {
    if !target.is_finite() {
        return Err(InteriorError::NumericDomain(format!(
            "target pressure must be finite, got {target}"
        )));
    }
    params.validate()?;

    let rho0 = params.rho0;
    let eos = |rho: f64| pressure(params, rho);

    let mut lower = LOWER_BOUND_FACTOR * rho0;
    let mut upper = UPPER_BOUND_FACTOR * rho0;
    let mut p_lower = eos(lower);
    let mut p_upper = eos(upper);
    let mut expansions = 0;

    loop {
        if target >= p_upper {
            // Highest density too low
            lower = upper;
            p_lower = p_upper;
            upper += rho0;
            p_upper = eos(upper);
        } else if target <= p_lower {
            // Lowest density too high
            upper = lower;
            p_upper = p_lower;
            lower *= LOWER_SHRINK_FACTOR;
            if lower < MIN_LOWER_FRACTION * rho0 {
                return Err(InteriorError::NumericDomain(format!(
                    "{target} Pa is below every pressure {} can reach",
                    params.form
                )));
            }
            p_lower = eos(lower);
        } else {
            break;
        }

        expansions += 1;
        if expansions > config.max_expansions || !p_upper.is_finite() || !p_lower.is_finite() {
            return Err(InteriorError::NumericDomain(format!(
                "could not bracket {target} Pa with {} after {expansions} adjustments \
                 (bracket [{lower}, {upper}] kg/m^3)",
                params.form
            )));
        }
    }

    if expansions > 0 {
        tracing::trace!(target, lower, upper, expansions, "density bracket expanded");
    }

    let mut evals = 0_u64;
    loop {
        let guess = 0.5 * (lower + upper);
        let p_guess = eos(guess);
        evals += 1;

        if (target - p_guess).abs() < config.tolerance {
            return Ok(Inversion {
                density: guess,
                pressure: p_guess,
                evals,
            });
        }

        // Bracket at floating-point resolution: nothing closer is representable.
        if guess <= lower || guess >= upper {
            tracing::trace!(target, guess, p_guess, "bisection bracket collapsed");
            return Ok(Inversion {
                density: guess,
                pressure: p_guess,
                evals,
            });
        }

        if p_guess > target {
            upper = guess;
        } else {
            lower = guess;
        }
    }
}

/// Fixed bracket for [`invert_bounded`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DensityBracket {
    /// Lower density bound (kg/m³).
    pub rho_min: f64,
    /// Upper density bound (kg/m³).
    pub rho_max: f64,
    /// Accept ρ once |P(ρ) − P_target| < allowed_discrepancy (Pa).
    pub allowed_discrepancy: f64,
}

/// Bisect `f` on a fixed bracket until it is within the allowed discrepancy
/// of `target`. `f` must be monotone on the bracket; its direction is taken
/// from the endpoint values.
pub fn invert_bounded<F: Fn(f64) -> f64>(
    target: f64,
    bracket: &DensityBracket,
    f: F,
) -> InteriorResult<Inversion> {
    let DensityBracket {
        rho_min,
        rho_max,
        allowed_discrepancy,
    } = *bracket;

    if !(rho_min > 0.0 && rho_max > rho_min && rho_max.is_finite()) {
        return Err(InteriorError::NumericDomain(format!(
            "invalid density bracket [{rho_min}, {rho_max}]"
        )));
    }
    if allowed_discrepancy.is_nan() || allowed_discrepancy <= 0.0 {
        return Err(InteriorError::NumericDomain(format!(
            "allowed discrepancy must be positive, got {allowed_discrepancy}"
        )));
    }

    let p_min = f(rho_min);
    let p_max = f(rho_max);
    let (p_lo, p_hi) = (p_min.min(p_max), p_min.max(p_max));
    if !(target >= p_lo - allowed_discrepancy && target <= p_hi + allowed_discrepancy) {
        return Err(InteriorError::NumericDomain(format!(
            "{target} Pa outside [{p_lo}, {p_hi}] Pa spanned by [{rho_min}, {rho_max}] kg/m^3"
        )));
    }
    let increasing = p_max >= p_min;

    let mut lower = rho_min;
    let mut upper = rho_max;
    let mut evals = 0_u64;
    loop {
        let guess = 0.5 * (lower + upper);
        let p_guess = f(guess);
        evals += 1;

        if (p_guess - target).abs() < allowed_discrepancy || guess <= lower || guess >= upper {
            return Ok(Inversion {
                density: guess,
                pressure: p_guess,
                evals,
            });
        }

        if (p_guess > target) == increasing {
            upper = guess;
        } else {
            lower = guess;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::{bm3, holzapfel_iron, holzapfel_reference_density, vinet};
    use interior_types::constants::{BM3_BOUNDED_DISCREPANCY, VINET_BOUNDED_DISCREPANCY};
    use interior_types::material::EosForm;

    const ICE_VII: EosParams = EosParams::new(1456.0, 14.9e9, 5.4, EosForm::Bm3);
    const FE93SI7: EosParams = EosParams::new(7678.0, 136.2e9, 5.97, EosForm::Vinet);
    const ICE_IH: EosParams = EosParams::new(930.0, 9.85e9, 6.6, EosForm::Murnaghan);

    #[test]
    fn test_zero_pressure_returns_reference_density() {
        for p in [ICE_VII, FE93SI7, ICE_IH] {
            let inv = density_from_pressure_with(0.0, &p, &InversionConfig::default()).unwrap();
            assert!(inv.pressure.abs() < 0.01);
            assert!((inv.density - p.rho0).abs() / p.rho0 < 1e-9, "{}", inv.density);
        }
    }

    #[test]
    fn test_high_pressure_expands_bracket() {
        // 360 GPa needs more than twice the reference density for ice VII.
        let target = 360e9;
        let inv = density_from_pressure_with(target, &ICE_VII, &InversionConfig::default()).unwrap();
        assert!(inv.density > 2.0 * ICE_VII.rho0);
        assert!((inv.pressure - target).abs() < 0.01);
    }

    #[test]
    fn test_negative_target_lowers_bracket() {
        let target = -1.0e9;
        let inv = density_from_pressure_with(target, &FE93SI7, &InversionConfig::default()).unwrap();
        assert!(inv.density < FE93SI7.rho0);
        assert!((inv.pressure - target).abs() < 0.01);
    }

    #[test]
    fn test_unreachable_tension_is_domain_error() {
        // Murnaghan tension is bounded below by −B0/B1.
        let target = -2.0 * ICE_IH.b0 / ICE_IH.b1;
        let err = density_from_pressure(target, &ICE_IH, 0.01).unwrap_err();
        assert!(matches!(err, InteriorError::NumericDomain(_)));
    }

    #[test]
    fn test_non_finite_target_rejected() {
        assert!(density_from_pressure(f64::NAN, &ICE_IH, 0.01).is_err());
        assert!(density_from_pressure(f64::INFINITY, &ICE_IH, 0.01).is_err());
    }

    #[test]
    fn test_expansion_cap() {
        let config = InversionConfig {
            tolerance: 0.01,
            max_expansions: 2,
        };
        assert!(density_from_pressure_with(1e15, &ICE_IH, &config).is_err());
    }

    #[test]
    fn test_named_form() {
        let rho = density_from_pressure_named(5e9, 7678.0, 136.2e9, 5.97, "VINET", 0.01).unwrap();
        assert!((vinet(rho, 7678.0, 136.2e9, 5.97) - 5e9).abs() < 0.01);
        assert!(matches!(
            density_from_pressure_named(5e9, 7678.0, 136.2e9, 5.97, "holzapfel", 0.01),
            Err(InteriorError::UnsupportedForm(_))
        ));
    }

    #[test]
    fn test_bounded_bm3() {
        let target = 100e9;
        let bracket = DensityBracket {
            rho_min: 1487.0,
            rho_max: 14870.0,
            allowed_discrepancy: BM3_BOUNDED_DISCREPANCY,
        };
        let inv = invert_bounded(target, &bracket, |rho| bm3(rho, 1487.0, 14.9e9, 6.2)).unwrap();
        assert!((inv.pressure - target).abs() < BM3_BOUNDED_DISCREPANCY);
        assert!(inv.density > 1487.0 && inv.density < 14870.0);
    }

    #[test]
    fn test_bounded_target_outside_bracket() {
        let bracket = DensityBracket {
            rho_min: 2143.5,
            rho_max: 21435.0,
            allowed_discrepancy: VINET_BOUNDED_DISCREPANCY,
        };
        let f = |rho| vinet(rho, 2143.5, 309.9e9, 4.59);
        assert!(invert_bounded(-1e9, &bracket, f).is_err());
        assert!(invert_bounded(50.47e9, &bracket, f).is_ok());
    }

    #[test]
    fn test_bounded_holzapfel_decreasing() {
        let rho0 = holzapfel_reference_density();
        let target = holzapfel_iron(1.2 * rho0);
        let bracket = DensityBracket {
            rho_min: rho0,
            rho_max: 1.5 * rho0,
            allowed_discrepancy: VINET_BOUNDED_DISCREPANCY,
        };
        let inv = invert_bounded(target, &bracket, holzapfel_iron).unwrap();
        assert!((inv.pressure - target).abs() < VINET_BOUNDED_DISCREPANCY);
    }

    #[test]
    fn test_bounded_invalid_bracket() {
        let bracket = DensityBracket {
            rho_min: 10.0,
            rho_max: 5.0,
            allowed_discrepancy: 1.0,
        };
        assert!(invert_bounded(0.0, &bracket, |rho| rho).is_err());
    }
}
