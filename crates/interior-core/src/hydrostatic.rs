// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Hydrostatic Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Adams-Williamson hydrostatic integration over concentric shells.
//!
//! Every shell has the width of the first grid spacing, Δr. The mass
//! enclosed at radius r is the Riemann sum Σ 4π·rᵢ²·Δr·ρᵢ over shells with
//! rᵢ ≤ r; gravity is g = G·M(r)/r². The pressure increment of each shell is
//! G·M(r)·ρ(r)/r²·Δr, summed from the center outward and then offset and
//! negated so that the outermost shell sits at exactly zero pressure and
//! pressure grows toward the center.

use std::f64::consts::PI;

use interior_types::constants::G_NEWTON;
use interior_types::error::{InteriorError, InteriorResult};
use interior_types::state::{HydrostaticProfile, ShellGrid};
use ndarray::Array1;

/// Enclosed mass, gravity and pressure for a density value per shell.
pub fn integrate(grid: &ShellGrid, density: &Array1<f64>) -> InteriorResult<HydrostaticProfile> {
    let n = grid.len();
    if density.len() != n {
        return Err(InteriorError::InvalidGrid(format!(
            "density field has {} values for {n} shells",
            density.len()
        )));
    }
    if let Some((i, rho)) = density.iter().enumerate().find(|(_, rho)| !rho.is_finite()) {
        return Err(InteriorError::NumericDomain(format!(
            "density[{i}] = {rho} is not finite"
        )));
    }

    let dr = grid.dr;
    let mut enclosed_mass = Array1::zeros(n);
    let mut gravity = Array1::zeros(n);
    let mut cumulative = Array1::zeros(n);

    // Radii ascend strictly, so the shells with rᵢ ≤ r are exactly the
    // prefix up to r's own index and a running sum replaces the re-summation.
    let mut mass = 0.0;
    let mut total = 0.0;
    for i in 0..n {
        let r = grid.radii[i];
        let rho = density[i];
        mass += 4.0 * PI * r * r * dr * rho;
        let g = G_NEWTON * mass / (r * r);

        total += g * rho * dr;

        enclosed_mass[i] = mass;
        gravity[i] = g;
        cumulative[i] = total;
    }

    let surface = cumulative[n - 1];
    let pressure = cumulative.mapv(|p: f64| surface - p);

    Ok(HydrostaticProfile {
        enclosed_mass,
        gravity,
        pressure,
    })
}

/// Mass inside radius `r`, summing every shell with rᵢ ≤ r directly.
pub fn enclosed_mass_at(grid: &ShellGrid, density: &Array1<f64>, r: f64) -> f64 {
    grid.radii
        .iter()
        .zip(density.iter())
        .filter(|&(&ri, _)| ri <= r)
        .map(|(&ri, &rho)| 4.0 * PI * ri * ri * grid.dr * rho)
        .sum()
}
