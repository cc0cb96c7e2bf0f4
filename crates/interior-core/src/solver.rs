// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! InteriorSolver: the density/pressure self-consistency loop.
//!
//! Alternates the hydrostatic integral (density → pressure) with per-shell
//! EoS inversion (pressure → density) until no shell's density moves by
//! more than the convergence threshold between iterations.

use interior_types::config::{PlanetConfig, SolverConfig};
use interior_types::error::{InteriorError, InteriorResult};
use interior_types::state::{InteriorProfile, LayerBoundaries, ShellGrid};
use ndarray::Array1;

use crate::hydrostatic::integrate;
use crate::materials::PhaseSelector;

/// The self-consistent interior solver.
#[derive(Debug, Clone)]
pub struct InteriorSolver {
    config: SolverConfig,
    grid: ShellGrid,
    layers: LayerBoundaries,
}

/// Densities, check pressures and phase labels from one re-evaluation pass.
struct Reevaluated {
    density: Array1<f64>,
    pressure: Array1<f64>,
    phases: Vec<&'static str>,
}

impl InteriorSolver {
    pub fn new(grid: ShellGrid, layers: LayerBoundaries, config: SolverConfig) -> InteriorResult<Self> {
        config.validate()?;
        Ok(InteriorSolver {
            config,
            grid,
            layers,
        })
    }

    /// Build the grid and layers described by a planet configuration.
    pub fn from_config(config: &PlanetConfig) -> InteriorResult<Self> {
        Self::new(
            config.shell_grid()?,
            config.layer_boundaries()?,
            config.solver.clone(),
        )
    }

    /// Create a new solver from a JSON config file.
    pub fn from_file(path: &str) -> InteriorResult<Self> {
        let config = PlanetConfig::from_file(path)?;
        Self::from_config(&config)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn grid(&self) -> &ShellGrid {
        &self.grid
    }

    pub fn layers(&self) -> &LayerBoundaries {
        &self.layers
    }

    /// Run the fixed-point iteration.
    ///
    /// Algorithm:
    /// 1. If the outermost layer boundary differs from the outermost shell
    ///    radius, move the boundary onto it and restart from step 2 with the
    ///    iteration counter at zero.
    /// 2. Seed each shell with the initial density of its enclosing layer.
    /// 3. Loop:
    ///    a. Integrate gravity and pressure from the current densities
    ///    b. Re-evaluate each shell's density from its pressure, using the
    ///       phase of its layer's material at that pressure
    ///    c. Converged if every compared shell moved by less than the
    ///       threshold; return the new densities with the per-phase check
    ///       pressures
    ///    d. Fail with `NonConvergence` after `max_iterations` passes
    ///
    /// The solver's own state is never modified, so repeated calls with the
    /// same inputs give the same profile.
    pub fn solve(&self) -> InteriorResult<InteriorProfile> {
        let start = std::time::Instant::now();
        let selector = PhaseSelector::new(self.config.pressure_tolerance);
        let threshold = self.config.convergence_threshold;
        let max_iter = self.config.max_iterations;
        let outer = self.grid.outer_radius();

        let mut layers = self.layers.clone();
        let mut remaps = 0;
        // Layer index per shell and the density field carried between passes.
        let mut state: Option<(Vec<usize>, Array1<f64>)> = None;
        let mut iteration = 0;

        loop {
            // 1. Boundary normalization
            if layers.outer_radius() != outer {
                let previous = layers.outer_radius();
                layers.reconcile_outer(outer)?;
                remaps += 1;
                state = None;
                iteration = 0;
                tracing::warn!(
                    previous,
                    outer,
                    "outer layer boundary moved onto outermost shell; restarting"
                );
                continue;
            }

            // 2. Initial guess
            let (assignment, current) = match state.take() {
                Some(state) => state,
                None => {
                    let assignment = assign_layers(&self.grid, &layers)?;
                    let seed = initial_density(&layers, &assignment);
                    (assignment, seed)
                }
            };

            iteration += 1;

            // 3a. Density → pressure
            let hydro = integrate(&self.grid, &current)?;

            // 3b. Pressure → density
            let next = reevaluate(&selector, &layers, &assignment, &hydro.pressure)?;

            // 3c. Convergence
            let window = self
                .config
                .compare_shells
                .map_or(current.len(), |n| n.min(current.len()));
            let (converged, residual) = compare(&next.density, &current, window, threshold);

            tracing::debug!(iteration, residual, "interior iteration");

            if converged {
                let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                tracing::info!(iteration, remaps, residual, elapsed_ms = elapsed, "interior converged");
                return Ok(InteriorProfile {
                    radii: self.grid.radii.clone(),
                    density: next.density,
                    pressure: next.pressure,
                    gravity: hydro.gravity,
                    enclosed_mass: hydro.enclosed_mass,
                    phases: next.phases,
                    iterations: iteration,
                    remaps,
                    residual,
                    solve_time_ms: elapsed,
                });
            }

            // 3d. Iteration cap
            if iteration >= max_iter {
                tracing::warn!(iteration, residual, "interior solver did not converge");
                return Err(InteriorError::NonConvergence {
                    iterations: iteration,
                    residual,
                });
            }

            state = Some((assignment, next.density));
        }
    }
}

/// Solve for the self-consistent profile of `grid` under `layers`.
pub fn solve(
    grid: &ShellGrid,
    layers: &LayerBoundaries,
    config: &SolverConfig,
) -> InteriorResult<InteriorProfile> {
    InteriorSolver::new(grid.clone(), layers.clone(), config.clone())?.solve()
}

/// Flatten a solve result into `(densities, pressures)`, mapping
/// non-convergence onto the single-zero sentinel `([0.0], [0.0])`.
/// Every other error is passed through.
pub fn legacy_sentinel(result: InteriorResult<InteriorProfile>) -> InteriorResult<(Vec<f64>, Vec<f64>)> {
    match result {
        Ok(profile) => Ok((profile.density.to_vec(), profile.pressure.to_vec())),
        Err(InteriorError::NonConvergence { .. }) => Ok((vec![0.0], vec![0.0])),
        Err(err) => Err(err),
    }
}

/// Layer index of every shell.
fn assign_layers(grid: &ShellGrid, layers: &LayerBoundaries) -> InteriorResult<Vec<usize>> {
    grid.radii
        .iter()
        .map(|&r| {
            layers.layer_index_at(r).ok_or_else(|| {
                InteriorError::InvalidGrid(format!(
                    "shell radius {r} lies outside the outermost layer ({})",
                    layers.outer_radius()
                ))
            })
        })
        .collect()
}

fn initial_density(layers: &LayerBoundaries, assignment: &[usize]) -> Array1<f64> {
    assignment
        .iter()
        .map(|&layer| layers.layers()[layer].initial_density)
        .collect()
}

fn reevaluate(
    selector: &PhaseSelector,
    layers: &LayerBoundaries,
    assignment: &[usize],
    pressure: &Array1<f64>,
) -> InteriorResult<Reevaluated> {
    let n = assignment.len();
    let mut density = Array1::zeros(n);
    let mut check = Array1::zeros(n);
    let mut phases = Vec::with_capacity(n);

    for (i, &layer) in assignment.iter().enumerate() {
        let material = layers.layers()[layer].material;
        let state = selector.evaluate(&material, pressure[i])?;
        density[i] = state.density;
        check[i] = state.check_pressure;
        phases.push(state.phase);
    }

    Ok(Reevaluated {
        density,
        pressure: check,
        phases,
    })
}

/// Whether the first `window` shells all moved by less than `threshold`,
/// and the largest move among them.
fn compare(next: &Array1<f64>, current: &Array1<f64>, window: usize, threshold: f64) -> (bool, f64) {
    let mut converged = true;
    let mut residual = 0.0_f64;
    for (a, b) in next.iter().zip(current.iter()).take(window) {
        let diff = (a - b).abs();
        converged &= diff < threshold;
        residual = residual.max(diff);
    }
    (converged, residual)
}
