// coloring.rs - Four-coloring of the free-boundary grid graph

use crate::error::{IsingError, Result};
use crate::lattice::Site;
use std::fmt;
use std::str::FromStr;

/// One of the four color classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Single-letter tag.
    pub fn tag(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Yellow => 'Y',
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Blue => 1,
            Self::Green => 2,
            Self::Yellow => 3,
        }
    }
}

impl FromStr for Color {
    type Err = IsingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "b" | "blue" => Ok(Self::Blue),
            "g" | "green" => Ok(Self::Green),
            "y" | "yellow" => Ok(Self::Yellow),
            _ => Err(IsingError::InvalidColor { tag: s.to_string() }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Color assigned to `(i, j)` on a `dim x dim` lattice.
///
/// Interior sites alternate Red/Blue by parity of `i + j`; boundary sites
/// alternate Green/Yellow the same way, except the last corner which is Red.
/// Boundary sites only touch boundary sites of the opposite parity or
/// interior sites, so no class contains an adjacent pair.
pub fn color_of(dim: usize, i: usize, j: usize) -> Result<Color> {
    if dim == 0 {
        return Err(IsingError::InvalidDimension { dim });
    }
    if i >= dim || j >= dim {
        return Err(IsingError::SiteOutOfBounds { row: i, col: j, dim });
    }
    Ok(color_at(dim, i, j))
}

// dim >= 1 and (i, j) inside the lattice
fn color_at(dim: usize, i: usize, j: usize) -> Color {
    let last = dim - 1;
    let even = (i + j) % 2 == 0;
    if i == last && j == last {
        Color::Red
    } else if i == 0 || j == 0 || i == last || j == last {
        if even {
            Color::Green
        } else {
            Color::Yellow
        }
    } else if even {
        Color::Red
    } else {
        Color::Blue
    }
}

/// Sites of one color, in row-major order.
pub fn color_indices(dim: usize, color: Color) -> Result<Vec<Site>> {
    if dim == 0 {
        return Err(IsingError::InvalidDimension { dim });
    }
    Ok((0..dim)
        .flat_map(|i| (0..dim).map(move |j| (i, j)))
        .filter(|&(i, j)| color_at(dim, i, j) == color)
        .collect())
}

/// Same as [`color_indices`] but takes a textual tag (`R`, `B`, `G`, `Y`).
pub fn color_indices_by_tag(dim: usize, tag: &str) -> Result<Vec<Site>> {
    color_indices(dim, tag.parse()?)
}

/// All four classes, in [`Color::ALL`] order. Empty for `dim == 0`.
pub fn color_classes(dim: usize) -> [Vec<Site>; 4] {
    let mut classes: [Vec<Site>; 4] = Default::default();
    for i in 0..dim {
        for j in 0..dim {
            classes[color_at(dim, i, j).index()].push((i, j));
        }
    }
    classes
}
