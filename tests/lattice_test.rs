//! Free-boundary geometry, energy functional and grid construction.

use ising::lattice::{delta_energy, energy, neighbors};
use ising::{IsingError, SpinGrid};

use approx::assert_relative_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn neighbor_counts_follow_the_boundary() {
    // corners 2, edges 3, interior 4
    assert_eq!(neighbors(3, 0, 0).len(), 2);
    assert_eq!(neighbors(3, 2, 2).len(), 2);
    assert_eq!(neighbors(3, 0, 1).len(), 3);
    assert_eq!(neighbors(3, 1, 2).len(), 3);
    assert_eq!(neighbors(3, 1, 1).len(), 4);
    assert!(neighbors(1, 0, 0).is_empty());

    // down, right, up, left
    assert_eq!(neighbors(3, 1, 1).to_vec(), vec![(2, 1), (1, 2), (0, 1), (1, 0)]);
}

#[test]
fn single_site_has_zero_energy() {
    for spin in [1, -1] {
        let g = SpinGrid::uniform(1, spin).unwrap();
        assert_eq!(energy(&g, 1.0), 0.0);
        assert_eq!(delta_energy(&g, 1.0, 0, 0).unwrap(), 0.0);
    }
}

#[test]
fn aligned_and_checkerboard_two_by_two() {
    // 4 bonds, each counted from both ends
    let up = SpinGrid::uniform(2, 1).unwrap();
    let down = SpinGrid::uniform(2, -1).unwrap();
    let chk = SpinGrid::checkerboard(2).unwrap();
    assert_eq!(energy(&up, 1.0), -8.0);
    assert_eq!(energy(&down, 1.0), -8.0);
    assert_eq!(energy(&chk, 1.0), 8.0);

    // antiferromagnetic coupling swaps the ground state
    assert_eq!(energy(&chk, -1.0), -8.0);
    assert_relative_eq!(energy(&up, 0.5), -4.0);
}

#[test]
fn aligned_three_by_three_energy() {
    // 12 bonds -> -24 J
    let g = SpinGrid::uniform(3, 1).unwrap();
    assert_eq!(energy(&g, 1.0), -24.0);
    // corner flip breaks 2 bonds: ΔE = 2 · 2 · 2 = 8
    assert_eq!(delta_energy(&g, 1.0, 0, 0).unwrap(), 8.0);
    // centre flip breaks 4 bonds
    assert_eq!(delta_energy(&g, 1.0, 1, 1).unwrap(), 16.0);
}

#[test]
fn construction_rejects_bad_input() {
    assert_eq!(
        SpinGrid::uniform(0, 1).unwrap_err(),
        IsingError::InvalidDimension { dim: 0 }
    );
    assert!(matches!(
        SpinGrid::from_rows(vec![vec![1, -1], vec![1]]),
        Err(IsingError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        SpinGrid::from_rows(vec![vec![1, -1, 1], vec![1, 1, 1]]),
        Err(IsingError::ShapeMismatch { .. })
    ));
    assert!(matches!(SpinGrid::from_rows(vec![]), Err(IsingError::ShapeMismatch { .. })));
    assert_eq!(
        SpinGrid::from_rows(vec![vec![1, 0], vec![1, 1]]).unwrap_err(),
        IsingError::InvalidSpin { row: 0, col: 1, value: 0 }
    );
    assert!(matches!(
        SpinGrid::from_flat(2, vec![1, 1, 1]),
        Err(IsingError::ShapeMismatch { .. })
    ));
}

#[test]
fn toggle_flips_one_cell_and_checks_bounds() {
    let mut g = SpinGrid::uniform(3, 1).unwrap();
    g.toggle(1, 2).unwrap();
    assert_eq!(g.get(1, 2), -1);
    assert_eq!(g.magnetization(), 7);
    g.toggle(1, 2).unwrap();
    assert_eq!(g, SpinGrid::uniform(3, 1).unwrap());

    assert_eq!(
        g.toggle(3, 0).unwrap_err(),
        IsingError::SiteOutOfBounds { row: 3, col: 0, dim: 3 }
    );
    assert!(delta_energy(&g, 1.0, 0, 5).is_err());
}

#[test]
fn rows_round_trip() {
    let rows = vec![vec![1, -1, 1], vec![-1, -1, 1], vec![1, 1, -1]];
    let g = SpinGrid::from_rows(rows.clone()).unwrap();
    assert_eq!(g.dim(), 3);
    assert_eq!(g.rows(), rows);
}

proptest! {
    // ΔE predicts exactly what a flip does to the total energy.
    #[test]
    fn delta_energy_matches_flip(seed in any::<u64>(), dim in 1usize..7, coupling in -2.0f64..2.0) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut g = SpinGrid::random(dim, &mut rng).unwrap();
        let before = energy(&g, coupling);
        let (i, j) = (seed as usize % dim, (seed >> 8) as usize % dim);
        let de = delta_energy(&g, coupling, i, j).unwrap();
        g.toggle(i, j).unwrap();
        prop_assert!((energy(&g, coupling) - before - de).abs() < 1e-9);
    }

    // Global spin flip leaves the energy unchanged.
    #[test]
    fn energy_is_spin_flip_symmetric(seed in any::<u64>(), dim in 1usize..7) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let g = SpinGrid::random(dim, &mut rng).unwrap();
        let flipped = SpinGrid::from_flat(dim, g.spins().iter().map(|&s| -s).collect()).unwrap();
        prop_assert_eq!(energy(&g, 1.0), energy(&flipped, 1.0));
    }
}
