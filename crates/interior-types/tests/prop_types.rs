// ─────────────────────────────────────────────────────────────────────
// Planetary Interior — Property-Based Tests (proptest) for interior-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for interior-types using proptest.
//!
//! Covers: ShellGrid construction invariants, layer boundary lookup,
//! fraction-derived boundaries, configuration serialization roundtrip.

use interior_types::config::{layer_boundaries, SolverConfig};
use interior_types::constants::R_EARTH;
use interior_types::material::{EosForm, Material};
use interior_types::state::{LayerBoundaries, LayerBoundary, ShellGrid};
use proptest::prelude::*;

// ── ShellGrid Construction Invariants ────────────────────────────────

proptest! {
    /// Planet-radius grids are integer-valued, evenly spaced and stop
    /// strictly below the planet radius.
    #[test]
    fn planet_grid_spacing(
        radius in 1.0e4f64..1.0e7,
        slices in 2usize..500,
    ) {
        let grid = ShellGrid::from_planet_radius(radius, slices).unwrap();
        let step = (radius / slices as f64).trunc();

        prop_assert_eq!(grid.radii[0], 1.0);
        prop_assert_eq!(grid.dr, step);
        prop_assert!(grid.outer_radius() < radius.trunc());
        prop_assert!(grid.outer_radius() + step >= radius.trunc());
        prop_assert!(grid.len() >= slices);
        for w in grid.radii.windows(2) {
            prop_assert_eq!(w[1] - w[0], step);
        }
    }

    /// Any strictly ascending positive sequence is accepted; reversing it is not.
    #[test]
    fn ascending_radii_accepted(
        steps in prop::collection::vec(0.5f64..100.0, 2..50),
    ) {
        let radii: Vec<f64> = steps
            .iter()
            .scan(0.0, |acc, s| { *acc += s; Some(*acc) })
            .collect();
        let grid = ShellGrid::new(radii.clone()).unwrap();
        prop_assert_eq!(grid.len(), radii.len());
        prop_assert!((grid.dr - steps[1]).abs() < 1e-9);

        let mut reversed = radii;
        reversed.reverse();
        prop_assert!(ShellGrid::new(reversed).is_err());
    }
}

// ── Layer Lookup ─────────────────────────────────────────────────────

proptest! {
    /// Fraction-derived boundaries are ascending, end at the planet radius
    /// and carry core, rock, ice in that order.
    #[test]
    fn fraction_boundaries_ordered(
        radius_earth in 0.05f64..3.0,
        core_fraction in 0.01f64..0.5,
        mantle_share in 0.01f64..0.99,
    ) {
        let mantle_fraction = (1.0 - core_fraction) * mantle_share;
        let layers = layer_boundaries(radius_earth, core_fraction, mantle_fraction).unwrap();
        let radius = (radius_earth * R_EARTH).trunc();

        prop_assert_eq!(layers.len(), 3);
        prop_assert_eq!(layers.outer_radius(), radius);
        let materials: Vec<Material> = layers.layers().iter().map(|l| l.material).collect();
        prop_assert_eq!(materials, vec![Material::IronAlloy, Material::Rock, Material::Ice]);
    }

    /// Every radius inside the body maps to the innermost layer enclosing it.
    #[test]
    fn lookup_returns_enclosing_layer(
        a in 10.0f64..1000.0,
        b in 10.0f64..1000.0,
        t in 0.0f64..1.0,
    ) {
        let inner = a;
        let outer = a + b;
        let layers = LayerBoundaries::new(vec![
            LayerBoundary { outer_radius: inner, material: Material::IronAlloy, initial_density: 7678.0 },
            LayerBoundary { outer_radius: outer, material: Material::Rock, initial_density: 3000.0 },
        ]).unwrap();

        let r = t * outer;
        let idx = layers.layer_index_at(r).unwrap();
        let expected = if r <= inner { 0 } else { 1 };
        prop_assert_eq!(idx, expected);
        prop_assert!(layers.layer_index_at(outer * 1.001).is_none());
    }

    /// Solver settings survive a JSON roundtrip.
    #[test]
    fn solver_config_roundtrip(
        max_iterations in 1usize..10_000,
        threshold in 0.0f64..100.0,
        window in prop::option::of(1usize..2000),
    ) {
        let cfg = SolverConfig {
            max_iterations,
            convergence_threshold: threshold,
            compare_shells: window,
            ..SolverConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.max_iterations, max_iterations);
        prop_assert!((back.convergence_threshold - threshold).abs() <= 1e-12 * threshold.max(1.0));
        prop_assert_eq!(back.compare_shells, window);
        prop_assert!(back.validate().is_ok());
    }

    /// Form names parse back to themselves in any letter case.
    #[test]
    fn form_names_parse(idx in 0usize..3, upper in any::<bool>()) {
        let form = EosForm::ALL[idx];
        let name = if upper { form.name().to_uppercase() } else { form.name().to_lowercase() };
        prop_assert_eq!(name.parse::<EosForm>().unwrap(), form);
    }
}
