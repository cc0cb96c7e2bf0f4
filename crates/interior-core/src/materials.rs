// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Phase tables and pressure-driven phase selection for ice, rock and the
//! iron-silicon core alloy.
//!
//! Each material owns an ascending list of half-open pressure intervals
//! `[lower, upper)`; the last interval is unbounded above. Below 23 GPa the
//! rock is an equimolar mixture of an SiO₂ polymorph and an Mg₂SiO₄
//! polymorph, blended by mass fraction 0.299 : 0.701. Above it the rock is
//! single-phase bridgmanite, then post-perovskite from 120 GPa.
//!
//! Sources: ice Ih/VI/VII and silicate polymorph parameters as tabulated
//! in the mineral-physics literature; Fe93Si7 from Wicks et al. (2018).

use std::borrow::Cow;

use serde::Serialize;

use interior_math::eos::pressure;
use interior_math::invert::density_from_pressure;
use interior_types::constants::{
    DEFAULT_PRESSURE_TOLERANCE, GPA, ROCK_MG2SIO4_FRACTION, ROCK_SIO2_FRACTION,
};
use interior_types::error::{InteriorError, InteriorResult};
use interior_types::material::{EosForm, EosParams, Material};

/// A named phase and its EoS parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub name: &'static str,
    pub params: EosParams,
}

impl Phase {
    const fn new(name: &'static str, rho0: f64, b0: f64, b1: f64, form: EosForm) -> Self {
        Phase {
            name,
            params: EosParams::new(rho0, b0, b1, form),
        }
    }
}

pub const ICE_IH: Phase = Phase::new("ice Ih", 930.0, 9.85 * GPA, 6.6, EosForm::Murnaghan);
pub const ICE_VI: Phase = Phase::new("ice VI", 1271.0, 14.05 * GPA, 4.0, EosForm::Bm3);
pub const ICE_VII: Phase = Phase::new("ice VII", 1456.0, 14.9 * GPA, 5.4, EosForm::Bm3);

pub const FORSTERITE: Phase = Phase::new("forsterite", 3221.0, 125.0 * GPA, 4.0, EosForm::Bm3);
pub const WADSLEYITE: Phase = Phase::new("wadsleyite", 3491.0, 160.0 * GPA, 4.0, EosForm::Bm3);
pub const RINGWOODITE: Phase = Phase::new("ringwoodite", 3548.0, 182.0 * GPA, 4.2, EosForm::Bm3);
pub const QUARTZ: Phase = Phase::new("quartz", 2648.0, 37.4 * GPA, 6.2, EosForm::Bm3);
pub const COESITE: Phase = Phase::new("coesite", 2921.0, 96.0 * GPA, 8.4, EosForm::Bm3);
pub const STISHOVITE: Phase = Phase::new("stishovite", 4290.0, 309.9 * GPA, 4.59, EosForm::Bm3);
pub const BRIDGMANITE: Phase = Phase::new("bridgmanite", 4101.0, 256.0 * GPA, 4.0, EosForm::Bm3);
pub const POST_PEROVSKITE: Phase =
    Phase::new("post-perovskite", 4058.0, 221.0 * GPA, 4.2, EosForm::Vinet);

pub const FE93SI7: Phase = Phase::new("Fe93Si7", 7678.0, 136.2 * GPA, 5.97, EosForm::Vinet);

/// What fills one pressure interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseComposition {
    Single(Phase),
    /// SiO₂ polymorph and Mg₂SiO₄ polymorph, mixed by mass fraction.
    Blend { sio2: Phase, mg2sio4: Phase },
}

/// Half-open pressure interval `[lower, upper)` (Pa); `upper = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseInterval {
    pub lower: f64,
    pub upper: Option<f64>,
    pub label: &'static str,
    pub composition: PhaseComposition,
}

impl PhaseInterval {
    pub fn contains(&self, p: f64) -> bool {
        p >= self.lower && self.upper.is_none_or(|u| p < u)
    }
}

const fn single(lower: f64, upper: Option<f64>, phase: Phase) -> PhaseInterval {
    PhaseInterval {
        lower,
        upper,
        label: phase.name,
        composition: PhaseComposition::Single(phase),
    }
}

const fn blend(
    lower: f64,
    upper: f64,
    label: &'static str,
    sio2: Phase,
    mg2sio4: Phase,
) -> PhaseInterval {
    PhaseInterval {
        lower,
        upper: Some(upper),
        label,
        composition: PhaseComposition::Blend { sio2, mg2sio4 },
    }
}

static ICE_TABLE: [PhaseInterval; 3] = [
    single(0.0, Some(1.0 * GPA), ICE_IH),
    single(1.0 * GPA, Some(2.1 * GPA), ICE_VI),
    single(2.1 * GPA, None, ICE_VII),
];

static ROCK_TABLE: [PhaseInterval; 7] = [
    blend(0.0, 2.5 * GPA, "quartz+forsterite", QUARTZ, FORSTERITE),
    blend(2.5 * GPA, 8.0 * GPA, "coesite+forsterite", COESITE, FORSTERITE),
    blend(8.0 * GPA, 14.0 * GPA, "stishovite+forsterite", STISHOVITE, FORSTERITE),
    blend(14.0 * GPA, 18.0 * GPA, "stishovite+wadsleyite", STISHOVITE, WADSLEYITE),
    blend(18.0 * GPA, 23.0 * GPA, "stishovite+ringwoodite", STISHOVITE, RINGWOODITE),
    single(23.0 * GPA, Some(120.0 * GPA), BRIDGMANITE),
    single(120.0 * GPA, None, POST_PEROVSKITE),
];

static CORE_TABLE: [PhaseInterval; 1] = [single(0.0, None, FE93SI7)];

/// Pressure-ordered phase intervals of `material`.
pub fn phase_table(material: &Material) -> Cow<'static, [PhaseInterval]> {
    match material {
        Material::Ice => Cow::Borrowed(&ICE_TABLE),
        Material::Rock => Cow::Borrowed(&ROCK_TABLE),
        Material::IronAlloy => Cow::Borrowed(&CORE_TABLE),
        Material::Uniform(params) => Cow::Owned(vec![single(
            0.0,
            None,
            Phase {
                name: "uniform",
                params: *params,
            },
        )]),
    }
}

/// Interval of `material` holding `p`, by strict less-than on each upper
/// bound. Negative pressures fall into the first interval.
pub fn select_phase(material: &Material, p: f64) -> PhaseInterval {
    let table = phase_table(material);
    let last = table.len() - 1;
    table
        .iter()
        .take(last)
        .find(|interval| interval.upper.is_some_and(|u| p < u))
        .copied()
        .unwrap_or(table[last])
}

/// Density of a material at one pressure, and the pressure that the same
/// phase parameters assign back to that density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseState {
    pub density: f64,
    pub check_pressure: f64,
    pub phase: &'static str,
}

/// Evaluates materials at a given pressure, inverting each phase's EoS to
/// within `tolerance` Pa.
#[derive(Debug, Clone, Copy)]
pub struct PhaseSelector {
    pub tolerance: f64,
}

impl Default for PhaseSelector {
    fn default() -> Self {
        PhaseSelector {
            tolerance: DEFAULT_PRESSURE_TOLERANCE,
        }
    }
}

impl PhaseSelector {
    pub fn new(tolerance: f64) -> Self {
        PhaseSelector { tolerance }
    }

    pub fn evaluate(&self, material: &Material, p: f64) -> InteriorResult<PhaseState> {
        if !p.is_finite() {
            return Err(InteriorError::NumericDomain(format!(
                "{material} evaluated at non-finite pressure {p}"
            )));
        }
        let interval = select_phase(material, p);
        match interval.composition {
            PhaseComposition::Single(phase) => {
                let density = density_from_pressure(p, &phase.params, self.tolerance)?;
                Ok(PhaseState {
                    density,
                    check_pressure: pressure(&phase.params, density),
                    phase: interval.label,
                })
            }
            PhaseComposition::Blend { sio2, mg2sio4 } => {
                let rho_sio2 = density_from_pressure(p, &sio2.params, self.tolerance)?;
                let rho_mg2sio4 = density_from_pressure(p, &mg2sio4.params, self.tolerance)?;
                let density = ROCK_SIO2_FRACTION * rho_sio2 + ROCK_MG2SIO4_FRACTION * rho_mg2sio4;
                let check_pressure = ROCK_MG2SIO4_FRACTION * pressure(&mg2sio4.params, density)
                    + ROCK_SIO2_FRACTION * pressure(&sio2.params, density);
                Ok(PhaseState {
                    density,
                    check_pressure,
                    phase: interval.label,
                })
            }
        }
    }

    /// Density only.
    pub fn density(&self, material: &Material, p: f64) -> InteriorResult<f64> {
        self.evaluate(material, p).map(|state| state.density)
    }
}
