// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Material
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Material identifiers and equation-of-state parameter records.
//!
//! The functional forms themselves live in `interior_math::eos`; this module
//! only carries the immutable data so that configuration can name them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InteriorError, InteriorResult};

/// Functional form of an isothermal equation of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EosForm {
    Murnaghan,
    #[serde(alias = "BM3", alias = "birch-murnaghan")]
    Bm3,
    Vinet,
}

impl EosForm {
    pub const ALL: [EosForm; 3] = [EosForm::Murnaghan, EosForm::Bm3, EosForm::Vinet];

    pub fn name(&self) -> &'static str {
        match self {
            EosForm::Murnaghan => "murnaghan",
            EosForm::Bm3 => "bm3",
            EosForm::Vinet => "vinet",
        }
    }
}

impl fmt::Display for EosForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EosForm {
    type Err = InteriorError;

    /// Case-insensitive; anything outside {murnaghan, bm3, vinet} is rejected.
    fn from_str(s: &str) -> InteriorResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "murnaghan" => Ok(EosForm::Murnaghan),
            "bm3" => Ok(EosForm::Bm3),
            "vinet" => Ok(EosForm::Vinet),
            _ => Err(InteriorError::UnsupportedForm(s.to_string())),
        }
    }
}

/// Parameters of one phase: reference density ρ₀ (kg/m³), zero-pressure bulk
/// modulus B₀ (Pa), its pressure derivative B₁, and the functional form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EosParams {
    pub rho0: f64,
    pub b0: f64,
    pub b1: f64,
    pub form: EosForm,
}

impl EosParams {
    pub const fn new(rho0: f64, b0: f64, b1: f64, form: EosForm) -> Self {
        EosParams { rho0, b0, b1, form }
    }

    /// Reject parameter sets for which the forms are not monotone.
    pub fn validate(&self) -> InteriorResult<()> {
        if !(self.rho0.is_finite() && self.rho0 > 0.0) {
            return Err(InteriorError::ConfigError(format!(
                "reference density must be positive, got {}",
                self.rho0
            )));
        }
        if !(self.b0.is_finite() && self.b0 > 0.0) {
            return Err(InteriorError::ConfigError(format!(
                "bulk modulus must be positive, got {}",
                self.b0
            )));
        }
        if !self.b1.is_finite() || (self.form == EosForm::Murnaghan && self.b1 == 0.0) {
            return Err(InteriorError::ConfigError(format!(
                "invalid bulk modulus derivative {} for {} form",
                self.b1, self.form
            )));
        }
        Ok(())
    }
}

/// Material filling one layer of the planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Fe93Si7 core alloy.
    #[serde(alias = "core", alias = "iron")]
    IronAlloy,
    /// MgSiO₃-equivalent silicate rock with pressure-driven phase changes.
    #[serde(alias = "mantle", alias = "silicate")]
    Rock,
    /// Water ice, phases Ih / VI / VII.
    Ice,
    /// A single phase with no pressure-dependent switching.
    Uniform(EosParams),
}

impl Material {
    pub fn label(&self) -> &'static str {
        match self {
            Material::IronAlloy => "iron_alloy",
            Material::Rock => "rock",
            Material::Ice => "ice",
            Material::Uniform(_) => "uniform",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
