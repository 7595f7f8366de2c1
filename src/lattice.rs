// lattice.rs - Square spin grid with free boundaries and its energy functional

use crate::error::{IsingError, Result};
use rand::Rng;
use smallvec::SmallVec;

/// A single spin, always +1 or -1.
pub type Spin = i8;

/// Lattice coordinate `(row, col)`.
pub type Site = (usize, usize);

/// Neighbor set of one site: corners have 2, edges 3, interior sites 4.
pub type Neighbors = SmallVec<[Site; 4]>;

/// An L x L grid of spins stored in row-major order.
///
/// Construction guarantees the grid is square and every cell is ±1;
/// [`SpinGrid::toggle`] is the only way to change a cell afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpinGrid {
    dim: usize,
    spins: Vec<Spin>,
}

impl SpinGrid {
    /// Each spin independently +1 or -1 with probability 1/2.
    pub fn random(dim: usize, rng: &mut impl Rng) -> Result<Self> {
        check_dim(dim)?;
        let spins = (0..dim * dim)
            .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
            .collect();
        Ok(Self { dim, spins })
    }

    /// Every spin set to `spin`.
    pub fn uniform(dim: usize, spin: Spin) -> Result<Self> {
        check_dim(dim)?;
        check_spin(0, 0, spin)?;
        Ok(Self { dim, spins: vec![spin; dim * dim] })
    }

    /// Alternating spins, +1 where `i + j` is even.
    pub fn checkerboard(dim: usize) -> Result<Self> {
        check_dim(dim)?;
        let spins = (0..dim * dim)
            .map(|idx| if (idx / dim + idx % dim) % 2 == 0 { 1 } else { -1 })
            .collect();
        Ok(Self { dim, spins })
    }

    /// Build from nested rows, rejecting ragged, non-square or non-±1 input.
    pub fn from_rows(rows: Vec<Vec<Spin>>) -> Result<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(IsingError::ShapeMismatch {
                reason: "grid has no rows".to_string(),
            });
        }
        let mut spins = Vec::with_capacity(dim * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(IsingError::ShapeMismatch {
                    reason: format!("row {i} has {} cells, expected {dim}", row.len()),
                });
            }
            for (j, &s) in row.iter().enumerate() {
                check_spin(i, j, s)?;
            }
            spins.extend(row);
        }
        Ok(Self { dim, spins })
    }

    /// Build from a row-major buffer of length `dim * dim`.
    pub fn from_flat(dim: usize, spins: Vec<Spin>) -> Result<Self> {
        check_dim(dim)?;
        if spins.len() != dim * dim {
            return Err(IsingError::ShapeMismatch {
                reason: format!(
                    "buffer holds {} spins, a {dim}x{dim} grid needs {}",
                    spins.len(),
                    dim * dim
                ),
            });
        }
        for (idx, &s) in spins.iter().enumerate() {
            check_spin(idx / dim, idx % dim, s)?;
        }
        Ok(Self { dim, spins })
    }

    /// Side length L.
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of sites, L².
    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    /// Spin at `(i, j)`. Panics if out of bounds.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> Spin {
        self.spins[i * self.dim + j]
    }

    /// Row-major view of all spins.
    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    /// Copy out as nested rows.
    pub fn rows(&self) -> Vec<Vec<Spin>> {
        self.spins.chunks(self.dim).map(|r| r.to_vec()).collect()
    }

    /// Flip the sign of the spin at `(i, j)`.
    pub fn toggle(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_site(i, j)?;
        self.toggle_unchecked(i, j);
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn toggle_unchecked(&mut self, i: usize, j: usize) {
        let idx = i * self.dim + j;
        self.spins[idx] = -self.spins[idx];
    }

    /// Σ spins.
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    pub(crate) fn check_site(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.dim || j >= self.dim {
            return Err(IsingError::SiteOutOfBounds { row: i, col: j, dim: self.dim });
        }
        Ok(())
    }
}

fn check_dim(dim: usize) -> Result<()> {
    if dim == 0 {
        return Err(IsingError::InvalidDimension { dim });
    }
    Ok(())
}

fn check_spin(row: usize, col: usize, value: Spin) -> Result<()> {
    if value != 1 && value != -1 {
        return Err(IsingError::InvalidSpin { row, col, value });
    }
    Ok(())
}

/// Free-boundary neighbors of `(i, j)` on a `dim x dim` grid.
///
/// Candidates are visited in the order down, right, up, left; any that fall
/// outside the grid are dropped rather than wrapped. `(i, j)` itself is not
/// bounds-checked; [`crate::IsingModel::neighbors`] is the checked entry point.
pub fn neighbors(dim: usize, i: usize, j: usize) -> Neighbors {
    let mut out = Neighbors::new();
    if i + 1 < dim {
        out.push((i + 1, j));
    }
    if j + 1 < dim {
        out.push((i, j + 1));
    }
    if i > 0 {
        out.push((i - 1, j));
    }
    if j > 0 {
        out.push((i, j - 1));
    }
    out
}

/// Total energy `E = -J Σ_sites Σ_neighbors s_i s_n`.
///
/// Every bond is visited from both endpoints, so this is twice the textbook
/// nearest-neighbor energy. [`delta_energy`] uses the same convention.
pub fn energy(grid: &SpinGrid, coupling: f64) -> f64 {
    let dim = grid.dim();
    let mut sum = 0i64;
    for i in 0..dim {
        for j in 0..dim {
            let s = grid.get(i, j) as i64;
            for (ni, nj) in neighbors(dim, i, j) {
                sum += s * grid.get(ni, nj) as i64;
            }
        }
    }
    -coupling * sum as f64
}

/// Energy change that flipping `(i, j)` would cause, without flipping it.
///
/// `-J Σ_n 2 (s' - s) s_n` where `s' = -s`.
pub fn delta_energy(grid: &SpinGrid, coupling: f64, i: usize, j: usize) -> Result<f64> {
    grid.check_site(i, j)?;
    Ok(delta_energy_unchecked(grid, coupling, i, j))
}

#[inline]
pub(crate) fn delta_energy_unchecked(grid: &SpinGrid, coupling: f64, i: usize, j: usize) -> f64 {
    let old = grid.get(i, j) as i64;
    let flipped = -old;
    let field: i64 = neighbors(grid.dim(), i, j)
        .into_iter()
        .map(|(ni, nj)| grid.get(ni, nj) as i64)
        .sum();
    -coupling * (2 * (flipped - old) * field) as f64
}
