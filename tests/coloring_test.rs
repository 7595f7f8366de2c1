//! Four-coloring of the free-boundary lattice.

use ising::coloring::{color_classes, color_indices, color_indices_by_tag, color_of};
use ising::lattice::neighbors;
use ising::{Color, IsingError};

use proptest::prelude::*;

#[test]
fn three_by_three_layout() {
    // G Y G
    // Y R Y
    // G Y R
    let expected = [
        [Color::Green, Color::Yellow, Color::Green],
        [Color::Yellow, Color::Red, Color::Yellow],
        [Color::Green, Color::Yellow, Color::Red],
    ];
    for (i, row) in expected.iter().enumerate() {
        for (j, &c) in row.iter().enumerate() {
            assert_eq!(color_of(3, i, j).unwrap(), c, "({i}, {j})");
        }
    }
    assert_eq!(color_indices(3, Color::Red).unwrap(), vec![(1, 1), (2, 2)]);
    assert!(color_indices(3, Color::Blue).unwrap().is_empty());
}

#[test]
fn last_corner_is_red() {
    for dim in 1..10 {
        assert_eq!(color_of(dim, dim - 1, dim - 1).unwrap(), Color::Red);
    }
    assert_eq!(color_indices(1, Color::Red).unwrap(), vec![(0, 0)]);
    assert!(color_indices(1, Color::Green).unwrap().is_empty());
}

#[test]
fn tags() {
    assert_eq!("B".parse::<Color>().unwrap(), Color::Blue);
    assert_eq!("yellow".parse::<Color>().unwrap(), Color::Yellow);
    assert_eq!(Color::Green.to_string(), "G");
    assert_eq!(
        color_indices_by_tag(5, "X").unwrap_err(),
        IsingError::InvalidColor { tag: "X".to_string() }
    );
    assert_eq!(
        color_indices(0, Color::Red).unwrap_err(),
        IsingError::InvalidDimension { dim: 0 }
    );
    assert_eq!(color_of(0, 0, 0).unwrap_err(), IsingError::InvalidDimension { dim: 0 });
    assert_eq!(
        color_of(4, 0, 4).unwrap_err(),
        IsingError::SiteOutOfBounds { row: 0, col: 4, dim: 4 }
    );
}

proptest! {
    #[test]
    fn classes_partition_the_lattice(dim in 1usize..16) {
        let classes = color_classes(dim);
        let mut seen = vec![false; dim * dim];
        for (class, color) in classes.iter().zip(Color::ALL) {
            prop_assert_eq!(class, &color_indices(dim, color).unwrap());
            for &(i, j) in class {
                prop_assert!(!seen[i * dim + j], "({}, {}) in two classes", i, j);
                seen[i * dim + j] = true;
            }
        }
        prop_assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn no_class_contains_neighbors(dim in 1usize..16) {
        for i in 0..dim {
            for j in 0..dim {
                for (ni, nj) in neighbors(dim, i, j) {
                    prop_assert_ne!(color_of(dim, i, j).unwrap(), color_of(dim, ni, nj).unwrap());
                }
            }
        }
    }
}
