// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::f64::consts::PI;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{InteriorError, InteriorResult};
use crate::material::Material;

/// Concentric shell radii, strictly ascending, in meters.
/// The shell width is the spacing of the first two radii; the integrator
/// assumes the spacing is uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellGrid {
    pub radii: Array1<f64>, // Outer radius of each shell [n]
    pub dr: f64,            // Shell width (radii[1] - radii[0])
}

impl ShellGrid {
    /// Build a grid from explicit radii. Requires at least two finite,
    /// positive, strictly ascending values.
    pub fn new(radii: Vec<f64>) -> InteriorResult<Self> {
        if radii.len() < 2 {
            return Err(InteriorError::InvalidGrid(format!(
                "need at least 2 shell radii, got {}",
                radii.len()
            )));
        }
        for (i, &r) in radii.iter().enumerate() {
            if !r.is_finite() || r <= 0.0 {
                return Err(InteriorError::InvalidGrid(format!(
                    "radius[{i}] = {r} must be finite and positive"
                )));
            }
        }
        if let Some(i) = (1..radii.len()).find(|&i| radii[i] <= radii[i - 1]) {
            return Err(InteriorError::InvalidGrid(format!(
                "radii not strictly ascending at {i}: {} <= {}",
                radii[i],
                radii[i - 1]
            )));
        }
        let dr = radii[1] - radii[0];
        Ok(ShellGrid {
            radii: Array1::from(radii),
            dr,
        })
    }

    /// `n` evenly spaced radii from `r_min` to `r_max` inclusive.
    pub fn linspace(r_min: f64, r_max: f64, n: usize) -> InteriorResult<Self> {
        Self::new(Array1::linspace(r_min, r_max, n).to_vec())
    }

    /// Integer-valued radii `1, 1+s, 1+2s, …` strictly below `radius`, with
    /// `s = trunc(radius / slices)`.
    pub fn from_planet_radius(radius: f64, slices: usize) -> InteriorResult<Self> {
        if slices == 0 {
            return Err(InteriorError::InvalidGrid("slices must be > 0".to_string()));
        }
        let end = radius.trunc();
        let step = (radius / slices as f64).trunc();
        if step < 1.0 {
            return Err(InteriorError::InvalidGrid(format!(
                "radius {radius} too small for {slices} slices"
            )));
        }
        let radii: Vec<f64> = (0u64..)
            .map(|k| 1.0 + k as f64 * step)
            .take_while(|&r| r < end)
            .collect();
        Self::new(radii)
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Always false for a validated grid.
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn inner_radius(&self) -> f64 {
        self.radii[0]
    }

    pub fn outer_radius(&self) -> f64 {
        self.radii[self.radii.len() - 1]
    }
}

/// Outer edge of one compositional layer and the density guess used to seed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerBoundary {
    pub outer_radius: f64,
    pub material: Material,
    pub initial_density: f64,
}

/// Ordered layer boundaries, innermost first.
///
/// A shell belongs to the first layer whose outer radius is ≥ the shell radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayerBoundary>", into = "Vec<LayerBoundary>")]
pub struct LayerBoundaries {
    layers: Vec<LayerBoundary>,
}

impl LayerBoundaries {
    pub fn new(layers: Vec<LayerBoundary>) -> InteriorResult<Self> {
        if layers.is_empty() {
            return Err(InteriorError::ConfigError(
                "at least one layer boundary is required".to_string(),
            ));
        }
        for (i, layer) in layers.iter().enumerate() {
            if !layer.outer_radius.is_finite() || layer.outer_radius <= 0.0 {
                return Err(InteriorError::ConfigError(format!(
                    "layer {i} outer radius {} must be finite and positive",
                    layer.outer_radius
                )));
            }
            if !layer.initial_density.is_finite() || layer.initial_density <= 0.0 {
                return Err(InteriorError::ConfigError(format!(
                    "layer {i} initial density {} must be finite and positive",
                    layer.initial_density
                )));
            }
            if let Material::Uniform(params) = layer.material {
                params.validate()?;
            }
            if i > 0 && layer.outer_radius <= layers[i - 1].outer_radius {
                return Err(InteriorError::ConfigError(format!(
                    "layer boundaries not ascending at {i}: {} <= {}",
                    layer.outer_radius,
                    layers[i - 1].outer_radius
                )));
            }
        }
        Ok(LayerBoundaries { layers })
    }

    /// A single layer of one material reaching out to `outer_radius`.
    pub fn single(material: Material, outer_radius: f64, initial_density: f64) -> InteriorResult<Self> {
        Self::new(vec![LayerBoundary {
            outer_radius,
            material,
            initial_density,
        }])
    }

    pub fn layers(&self) -> &[LayerBoundary] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false for validated boundaries.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn outer_radius(&self) -> f64 {
        self.layers[self.layers.len() - 1].outer_radius
    }

    /// Index of the innermost layer whose outer radius is ≥ `r`.
    pub fn layer_index_at(&self, r: f64) -> Option<usize> {
        let idx = self.layers.partition_point(|b| b.outer_radius < r);
        (idx < self.layers.len()).then_some(idx)
    }

    pub fn layer_at(&self, r: f64) -> Option<&LayerBoundary> {
        self.layer_index_at(r).map(|i| &self.layers[i])
    }

    /// Move the outermost boundary to `outer_radius` if it differs.
    ///
    /// Returns whether a remap happened. Fails if the new outer edge would
    /// fall inside the next layer down.
    pub fn reconcile_outer(&mut self, outer_radius: f64) -> InteriorResult<bool> {
        let last = self.layers.len() - 1;
        if self.layers[last].outer_radius == outer_radius {
            return Ok(false);
        }
        if last > 0 && outer_radius <= self.layers[last - 1].outer_radius {
            return Err(InteriorError::ConfigError(format!(
                "cannot move outer boundary to {outer_radius}: inside layer {} (outer radius {})",
                last - 1,
                self.layers[last - 1].outer_radius
            )));
        }
        self.layers[last].outer_radius = outer_radius;
        Ok(true)
    }
}

impl TryFrom<Vec<LayerBoundary>> for LayerBoundaries {
    type Error = InteriorError;

    fn try_from(layers: Vec<LayerBoundary>) -> InteriorResult<Self> {
        Self::new(layers)
    }
}

impl From<LayerBoundaries> for Vec<LayerBoundary> {
    fn from(boundaries: LayerBoundaries) -> Self {
        boundaries.layers
    }
}

/// Output of one hydrostatic integration pass.
#[derive(Debug, Clone, Serialize)]
pub struct HydrostaticProfile {
    pub enclosed_mass: Array1<f64>, // M(r) [kg]
    pub gravity: Array1<f64>,       // g(r) [m/s²]
    pub pressure: Array1<f64>,      // P(r) [Pa], zero at the surface shell
}

/// Self-consistent interior profile returned by the solver.
#[derive(Debug, Clone, Serialize)]
pub struct InteriorProfile {
    pub radii: Array1<f64>,         // Shell radii [m]
    pub density: Array1<f64>,       // ρ(r) [kg/m³]
    pub pressure: Array1<f64>,      // Per-phase check pressure [Pa]
    pub gravity: Array1<f64>,       // g(r) from the last integration [m/s²]
    pub enclosed_mass: Array1<f64>, // M(r) from the last integration [kg]
    pub phases: Vec<&'static str>,  // Phase (or blended pair) per shell
    pub iterations: usize,
    pub remaps: usize,
    pub residual: f64, // Max |Δρ| of the final iteration
    pub solve_time_ms: f64,
}

impl InteriorProfile {
    pub fn total_mass(&self) -> f64 {
        self.enclosed_mass[self.enclosed_mass.len() - 1]
    }

    pub fn central_pressure(&self) -> f64 {
        self.pressure[0]
    }

    pub fn outer_radius(&self) -> f64 {
        self.radii[self.radii.len() - 1]
    }

    /// Total mass over the volume of a sphere of the outer radius.
    pub fn mean_density(&self) -> f64 {
        self.total_mass() / (4.0 / 3.0 * PI * self.outer_radius().powi(3))
    }
}
