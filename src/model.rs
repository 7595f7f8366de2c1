// model.rs - One Ising simulation instance: spins, parameters and its own RNG

use crate::codec;
use crate::dynamics::Dynamics;
use crate::error::{check_parameters, Result};
use crate::lattice::{self, Neighbors, Site, SpinGrid};
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// A 2D free-boundary Ising model at fixed coupling and temperature.
///
/// The model exclusively owns its spin grid and random stream, so several
/// instances (e.g. one per temperature) can run side by side with no
/// coordination. J and T are fixed for the lifetime of the instance.
#[derive(Debug, Clone)]
pub struct IsingModel {
    grid: SpinGrid,
    coupling: f64,
    temperature: f64,
    dynamics: Dynamics,
    pub(crate) rng: Pcg64,
    pub(crate) sweeps: u64,
}

impl IsingModel {
    /// Random initial spins, RNG seeded from the OS.
    pub fn new(dim: usize, coupling: f64, temperature: f64) -> Result<Self> {
        check_parameters(dim, coupling, temperature)?;
        Self::build(dim, coupling, temperature, Pcg64::from_entropy())
    }

    /// Random initial spins from a reproducible seed.
    pub fn with_seed(dim: usize, coupling: f64, temperature: f64, seed: u64) -> Result<Self> {
        check_parameters(dim, coupling, temperature)?;
        Self::build(dim, coupling, temperature, Pcg64::seed_from_u64(seed))
    }

    /// Start from a caller-supplied configuration.
    pub fn from_grid(grid: SpinGrid, coupling: f64, temperature: f64, seed: u64) -> Result<Self> {
        check_parameters(grid.dim(), coupling, temperature)?;
        Ok(Self {
            grid,
            coupling,
            temperature,
            dynamics: Dynamics::default(),
            rng: Pcg64::seed_from_u64(seed),
            sweeps: 0,
        })
    }

    fn build(dim: usize, coupling: f64, temperature: f64, mut rng: Pcg64) -> Result<Self> {
        let grid = SpinGrid::random(dim, &mut rng)?;
        Ok(Self {
            grid,
            coupling,
            temperature,
            dynamics: Dynamics::default(),
            rng,
            sweeps: 0,
        })
    }

    /// Select the transition rule used by [`IsingModel::run_sweep`].
    pub fn with_dynamics(mut self, dynamics: Dynamics) -> Self {
        self.dynamics = dynamics;
        self
    }

    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.grid.dim()
    }

    #[inline(always)]
    pub fn n_sites(&self) -> usize {
        self.grid.n_sites()
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn dynamics(&self) -> Dynamics {
        self.dynamics
    }

    /// Completed sweeps, warmup included.
    pub fn sweeps_done(&self) -> u64 {
        self.sweeps
    }

    /// Current configuration.
    pub fn grid(&self) -> &SpinGrid {
        &self.grid
    }

    /// Free-boundary neighbors of `(i, j)` on this lattice.
    pub fn neighbors(&self, i: usize, j: usize) -> Result<Neighbors> {
        self.grid.check_site(i, j)?;
        Ok(lattice::neighbors(self.dim(), i, j))
    }

    /// Energy of the current configuration.
    pub fn energy(&self) -> f64 {
        lattice::energy(&self.grid, self.coupling)
    }

    /// Energy of an arbitrary configuration under this model's coupling.
    ///
    /// Pure: the model's own state is not touched.
    pub fn energy_of(&self, grid: &SpinGrid) -> f64 {
        lattice::energy(grid, self.coupling)
    }

    /// Energy change a flip at `(i, j)` would cause.
    pub fn induced_delta_energy(&self, i: usize, j: usize) -> Result<f64> {
        lattice::delta_energy(&self.grid, self.coupling, i, j)
    }

    #[inline]
    pub(crate) fn delta_energy_at(&self, (i, j): Site) -> f64 {
        lattice::delta_energy_unchecked(&self.grid, self.coupling, i, j)
    }

    /// Flip the spin at `(i, j)`. The only mutator of lattice state.
    pub fn toggle(&mut self, i: usize, j: usize) -> Result<()> {
        self.grid.toggle(i, j)
    }

    #[inline]
    pub(crate) fn toggle_at(&mut self, (i, j): Site) {
        self.grid.toggle_unchecked(i, j);
    }

    /// Configuration code of the current state.
    pub fn encoding(&self) -> Result<u64> {
        codec::encode(&self.grid)
    }

    /// Σ spins of the current state.
    pub fn magnetization(&self) -> i64 {
        self.grid.magnetization()
    }
}
