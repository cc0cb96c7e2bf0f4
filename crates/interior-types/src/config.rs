// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{
    CORE_DENSITY_GUESS, DEFAULT_DENSITY_THRESHOLD, DEFAULT_MAX_ITERATIONS,
    DEFAULT_PRESSURE_TOLERANCE, ICE_DENSITY_GUESS, MANTLE_DENSITY_GUESS, R_EARTH,
};
use crate::error::{InteriorError, InteriorResult};
use crate::material::Material;
use crate::state::{LayerBoundaries, LayerBoundary, ShellGrid};

/// Top-level planet configuration, loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub name: String,
    /// Planet radius in Earth radii.
    pub radius_earth: f64,
    /// Fraction of the radius occupied by the iron core.
    /// Ignored when `layers` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_fraction: Option<f64>,
    /// Fraction of the radius occupied by the silicate mantle.
    /// Ignored when `layers` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mantle_fraction: Option<f64>,
    /// Number of radial slices.
    #[serde(default = "default_shells")]
    pub shells: usize,
    /// Explicit layers; when present they replace the fraction-based layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<LayerBoundary>>,
    #[serde(default)]
    pub solver: SolverConfig,
}

fn default_shells() -> usize {
    1000
}

/// Fixed-point iteration controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Largest per-shell density change accepted as converged (kg/m³).
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
    /// Pressure tolerance of the density inverter (Pa).
    #[serde(default = "default_pressure_tolerance")]
    pub pressure_tolerance: f64,
    /// Compare only the innermost N shells when testing convergence.
    /// `None` compares the full field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_shells: Option<usize>,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}
fn default_convergence_threshold() -> f64 {
    DEFAULT_DENSITY_THRESHOLD
}
fn default_pressure_tolerance() -> f64 {
    DEFAULT_PRESSURE_TOLERANCE
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: default_max_iterations(),
            convergence_threshold: default_convergence_threshold(),
            pressure_tolerance: default_pressure_tolerance(),
            compare_shells: None,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> InteriorResult<()> {
        if self.max_iterations == 0 {
            return Err(InteriorError::ConfigError(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(InteriorError::ConfigError(format!(
                "convergence_threshold must be finite and >= 0, got {}",
                self.convergence_threshold
            )));
        }
        if !self.pressure_tolerance.is_finite() || self.pressure_tolerance <= 0.0 {
            return Err(InteriorError::ConfigError(format!(
                "pressure_tolerance must be finite and > 0, got {}",
                self.pressure_tolerance
            )));
        }
        if self.compare_shells == Some(0) {
            return Err(InteriorError::ConfigError(
                "compare_shells must be > 0 when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rounding slack when checking that the fractions sum to at most one.
const FRACTION_SLACK: f64 = 1e-12;

/// Three-layer boundaries (core, mantle, ice) from a planet size and the
/// radial fractions of core and mantle. The ice fraction is the remainder.
///
/// Boundary radii are truncated to whole meters:
/// `trunc(f_c·R)`, `trunc(f_c·R) + trunc(f_m·R)`, `trunc(R)`.
/// Layers whose truncated thickness is zero are left out, so a zero core
/// fraction gives a coreless body and fractions summing to one give no ice.
pub fn layer_boundaries(
    radius_earth: f64,
    core_fraction: f64,
    mantle_fraction: f64,
) -> InteriorResult<LayerBoundaries> {
    if !radius_earth.is_finite() || radius_earth <= 0.0 {
        return Err(InteriorError::ConfigError(format!(
            "planet radius must be positive, got {radius_earth} Earth radii"
        )));
    }
    for (name, value) in [("core", core_fraction), ("mantle", mantle_fraction)] {
        if !(0.0..=1.0).contains(&value) {
            return Err(InteriorError::ConfigError(format!(
                "{name} fraction must lie in [0, 1], got {value}"
            )));
        }
    }
    let ice_fraction = 1.0 - core_fraction - mantle_fraction;
    if ice_fraction < -FRACTION_SLACK {
        return Err(InteriorError::ConfigError(format!(
            "core fraction {core_fraction} + mantle fraction {mantle_fraction} exceeds 1"
        )));
    }

    let radius = radius_earth * R_EARTH;
    let ice_radius = radius.trunc();
    let core_radius = (core_fraction * radius).trunc().min(ice_radius);
    let mantle_radius = (core_radius + (mantle_fraction * radius).trunc()).min(ice_radius);

    let candidates = [
        (core_radius, Material::IronAlloy, CORE_DENSITY_GUESS),
        (mantle_radius, Material::Rock, MANTLE_DENSITY_GUESS),
        (ice_radius, Material::Ice, ICE_DENSITY_GUESS),
    ];
    let mut layers: Vec<LayerBoundary> = Vec::with_capacity(candidates.len());
    let mut inner = 0.0;
    for (outer_radius, material, initial_density) in candidates {
        if outer_radius <= inner {
            continue;
        }
        layers.push(LayerBoundary {
            outer_radius,
            material,
            initial_density,
        });
        inner = outer_radius;
    }
    if layers.is_empty() {
        return Err(InteriorError::ConfigError(format!(
            "planet radius {radius} m leaves every layer empty"
        )));
    }

    LayerBoundaries::new(layers)
}

impl PlanetConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> InteriorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Planet radius in meters.
    pub fn radius_m(&self) -> f64 {
        self.radius_earth * R_EARTH
    }

    /// Layer boundaries: explicit `layers` if given, otherwise built from the
    /// core/mantle fractions.
    pub fn layer_boundaries(&self) -> InteriorResult<LayerBoundaries> {
        match &self.layers {
            Some(layers) => LayerBoundaries::new(layers.clone()),
            None => match (self.core_fraction, self.mantle_fraction) {
                (Some(core), Some(mantle)) => layer_boundaries(self.radius_earth, core, mantle),
                _ => Err(InteriorError::ConfigError(format!(
                    "{}: core_fraction and mantle_fraction are required without explicit layers",
                    self.name
                ))),
            },
        }
    }

    /// Shell radii `1, 1+s, …` below the planet radius.
    pub fn shell_grid(&self) -> InteriorResult<ShellGrid> {
        ShellGrid::from_planet_radius(self.radius_m(), self.shells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/interior-types/ at compile time,
    /// so we go up 2 levels to reach the workspace root.
    fn workspace_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
    }

    fn config_path(relative: &str) -> String {
        workspace_root()
            .join("configs")
            .join(relative)
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_earth_like_boundaries() {
        let layers = layer_boundaries(1.0, 0.3, 0.5).unwrap();
        let l = layers.layers();
        assert_eq!(l.len(), 3);
        assert_eq!(l[0].outer_radius, 1_911_000.0);
        assert_eq!(l[1].outer_radius, 5_096_000.0);
        assert_eq!(l[2].outer_radius, 6_370_000.0);
        assert_eq!(l[0].material, Material::IronAlloy);
        assert_eq!(l[1].material, Material::Rock);
        assert_eq!(l[2].material, Material::Ice);
        assert_eq!(l[0].initial_density, 7678.0);
        assert_eq!(l[1].initial_density, 3000.0);
        assert_eq!(l[2].initial_density, 930.0);
    }

    #[test]
    fn test_fractions_validated() {
        assert!(matches!(
            layer_boundaries(1.0, 0.6, 0.5),
            Err(InteriorError::ConfigError(_))
        ));
        assert!(layer_boundaries(1.0, -0.1, 0.5).is_err());
        assert!(layer_boundaries(0.0, 0.3, 0.5).is_err());
    }

    #[test]
    fn test_zero_core_fraction_drops_core() {
        let layers = layer_boundaries(1.0, 0.0, 0.5).unwrap();
        let l = layers.layers();
        assert_eq!(l.len(), 2);
        assert_eq!(l[0].material, Material::Rock);
        assert_eq!(l[0].outer_radius, 3_185_000.0);
        assert_eq!(l[1].material, Material::Ice);
        assert_eq!(l[1].outer_radius, 6_370_000.0);
    }

    #[test]
    fn test_full_fractions_drop_ice() {
        let layers = layer_boundaries(1.0, 0.3, 0.7).unwrap();
        let l = layers.layers();
        assert_eq!(l.len(), 2);
        assert_eq!(l[0].material, Material::IronAlloy);
        assert_eq!(l[0].outer_radius, 1_911_000.0);
        assert_eq!(l[1].material, Material::Rock);
        assert_eq!(l[1].outer_radius, 6_370_000.0);
    }

    #[test]
    fn test_single_material_fractions() {
        let layers = layer_boundaries(1.0, 0.0, 0.0).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.layers()[0].material, Material::Ice);

        let layers = layer_boundaries(1.0, 1.0, 0.0).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.layers()[0].material, Material::IronAlloy);
    }

    #[test]
    fn test_sub_meter_planet_rejected() {
        assert!(matches!(
            layer_boundaries(1e-8, 0.3, 0.5),
            Err(InteriorError::ConfigError(_))
        ));
    }

    #[test]
    fn test_solver_defaults() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.max_iterations, 2000);
        assert_eq!(cfg.convergence_threshold, 10.0);
        assert_eq!(cfg.pressure_tolerance, 0.01);
        assert!(cfg.compare_shells.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_solver_validation() {
        let mut cfg = SolverConfig::default();
        cfg.max_iterations = 0;
        assert!(cfg.validate().is_err());
        let mut cfg = SolverConfig::default();
        cfg.pressure_tolerance = 0.0;
        assert!(cfg.validate().is_err());
        let mut cfg = SolverConfig::default();
        cfg.compare_shells = Some(0);
        assert!(cfg.validate().is_err());
        let mut cfg = SolverConfig::default();
        cfg.convergence_threshold = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_earth_config() {
        let cfg = PlanetConfig::from_file(&config_path("earth_like.json")).unwrap();
        assert_eq!(cfg.name, "Earth-Like-Ocean-World");
        assert_eq!(cfg.shells, 1000);
        assert_eq!(cfg.solver.max_iterations, 2000);
        assert_eq!(cfg.solver.compare_shells, Some(1000));
        let layers = cfg.layer_boundaries().unwrap();
        assert_eq!(layers.layers()[1].outer_radius, 5_096_000.0);
        let grid = cfg.shell_grid().unwrap();
        assert_eq!(grid.len(), 1000);
    }

    #[test]
    fn test_load_explicit_layers_config() {
        let cfg = PlanetConfig::from_file(&config_path("rocky_moon.json")).unwrap();
        let layers = cfg.layer_boundaries().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers.layers()[0].material, Material::IronAlloy);
        assert_eq!(layers.layers()[1].material, Material::Rock);
        // Solver block omitted entirely: defaults apply.
        assert_eq!(cfg.solver.convergence_threshold, 10.0);
        assert!(cfg.core_fraction.is_none());
        assert!(cfg.mantle_fraction.is_none());
    }

    #[test]
    fn test_fractions_required_without_layers() {
        let json = r#"{"name": "Bare", "radius_earth": 0.5, "core_fraction": 0.3}"#;
        let cfg: PlanetConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cfg.layer_boundaries(),
            Err(InteriorError::ConfigError(_))
        ));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = PlanetConfig::from_file(&config_path("earth_like.json")).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: PlanetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.name, cfg2.name);
        assert_eq!(cfg.shells, cfg2.shells);
        assert_eq!(cfg.solver.compare_shells, cfg2.solver.compare_shells);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PlanetConfig::from_file(&config_path("does_not_exist.json")).unwrap_err();
        assert!(matches!(err, InteriorError::Io(_)));
    }
}
