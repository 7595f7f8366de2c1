// dynamics.rs - Single-spin-flip Metropolis and heatbath updates

use crate::coloring;
use crate::error::IsingError;
use crate::lattice::Site;
use crate::model::IsingModel;
use crate::utils::rng::site_rng;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Sweeps discarded by [`IsingModel::warmup`] when the caller has no opinion.
pub const DEFAULT_WARMUP_SWEEPS: usize = 10;

/// Accept/reject rule for a proposed single-spin flip.
///
/// Both rules satisfy detailed balance for the symmetric "pick a site
/// uniformly" proposal; they differ only in the acceptance function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dynamics {
    /// Accept iff `exp(-ΔE/T) > u`.
    Metropolis,
    /// Glauber rule: accept iff `1 / (1 + exp(ΔE/T)) > u`.
    #[default]
    Heatbath,
}

impl Dynamics {
    /// Probability-like threshold compared against `u ~ U[0, 1)`.
    ///
    /// Metropolis values above 1 are left unclamped; they always accept.
    #[inline]
    pub fn acceptance(self, delta_e: f64, temperature: f64) -> f64 {
        match self {
            Self::Metropolis => (-delta_e / temperature).exp(),
            Self::Heatbath => 1.0 / (1.0 + (delta_e / temperature).exp()),
        }
    }

    #[inline]
    pub fn accepts(self, delta_e: f64, temperature: f64, u: f64) -> bool {
        self.acceptance(delta_e, temperature) > u
    }
}

impl FromStr for Dynamics {
    type Err = IsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metropolis" => Ok(Self::Metropolis),
            "heatbath" | "glauber" => Ok(Self::Heatbath),
            _ => Err(IsingError::InvalidDynamics { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Dynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metropolis => write!(f, "metropolis"),
            Self::Heatbath => write!(f, "heatbath"),
        }
    }
}

/// Outcome of one proposed flip.
#[derive(Debug, Clone, Copy)]
pub struct StepInfo {
    pub site: Site,
    pub delta_e: f64,
    pub accepted: bool,
}

/// What a sweep hands to analysis and plotting consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSample {
    pub energy: f64,
    /// `None` when the lattice has more spins than a code word holds.
    pub encoding: Option<u64>,
}

impl IsingModel {
    /// One Metropolis attempt at a uniformly random site.
    pub fn metropolis_step(&mut self) -> StepInfo {
        self.step(Dynamics::Metropolis)
    }

    /// One heatbath attempt at a uniformly random site.
    pub fn heatbath_step(&mut self) -> StepInfo {
        self.step(Dynamics::Heatbath)
    }

    /// One attempt under `dynamics`: propose a site, accept or leave unchanged.
    pub fn step(&mut self, dynamics: Dynamics) -> StepInfo {
        let dim = self.dim();
        let idx = self.rng.gen_range(0..dim * dim);
        let site = (idx / dim, idx % dim);
        let delta_e = self.delta_energy_at(site);
        let u: f64 = self.rng.gen();
        let accepted = dynamics.accepts(delta_e, self.temperature(), u);
        if accepted {
            self.toggle_at(site);
        }
        StepInfo { site, delta_e, accepted }
    }

    /// L² sequential attempts. Returns how many were accepted.
    pub fn sweep_with(&mut self, dynamics: Dynamics) -> usize {
        let mut accepted = 0;
        for _ in 0..self.n_sites() {
            if self.step(dynamics).accepted {
                accepted += 1;
            }
        }
        self.sweeps += 1;
        accepted
    }

    /// One sweep with the model's dynamics, then report energy and code.
    pub fn run_sweep(&mut self) -> SweepSample {
        self.sweep_with(self.dynamics());
        self.sample()
    }

    /// Run `sweeps` sweeps and discard their output.
    ///
    /// No stationarity test is made; this is only a burn-in heuristic.
    pub fn warmup(&mut self, sweeps: usize) {
        let mut accepted = 0usize;
        for _ in 0..sweeps {
            accepted += self.sweep_with(self.dynamics());
        }
        debug!(
            sweeps,
            accepted,
            energy = self.energy(),
            "warmup finished"
        );
    }

    /// Energy and code of the current state.
    pub fn sample(&self) -> SweepSample {
        SweepSample {
            energy: self.energy(),
            // only fails when L² exceeds the code width
            encoding: self.encoding().ok(),
        }
    }

    /// Sweep the color classes in order, deciding each class in parallel.
    ///
    /// Sites sharing a color are never adjacent, so every decision in a
    /// class only reads spins that stay fixed during that class. Each site
    /// draws from its own stream derived from a per-class master seed, which
    /// keeps the result independent of thread scheduling. Every site is
    /// attempted exactly once.
    pub fn colored_sweep(&mut self) -> SweepSample {
        let dynamics = self.dynamics();
        let temperature = self.temperature();
        for class in coloring::color_classes(self.dim()) {
            let master: u64 = self.rng.gen();
            let model = &*self;
            let flips: Vec<Site> = class
                .par_iter()
                .enumerate()
                .filter_map(|(k, &site)| {
                    let mut rng = site_rng(master, k);
                    let delta_e = model.delta_energy_at(site);
                    dynamics
                        .accepts(delta_e, temperature, rng.gen::<f64>())
                        .then_some(site)
                })
                .collect();
            for site in flips {
                self.toggle_at(site);
            }
        }
        self.sweeps += 1;
        self.sample()
    }
}
