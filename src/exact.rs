// exact.rs - Exact Boltzmann distribution by brute-force enumeration

use crate::codec;
use crate::error::{check_parameters, IsingError, Result};
use crate::lattice;
use crate::model::IsingModel;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Largest lattice side accepted for enumeration (2^16 configurations).
pub const MAX_EXACT_DIM: usize = 4;

/// Normalized equilibrium probabilities indexed by configuration code.
#[derive(Debug, Clone)]
pub struct ExactDistribution {
    dim: usize,
    coupling: f64,
    temperature: f64,
    probabilities: Vec<f64>,
    log_partition: f64,
    mean_energy: f64,
}

impl ExactDistribution {
    /// Enumerate every configuration of a `dim x dim` lattice.
    ///
    /// Cost is O(2^N · N). Weights are normalized in log-space: the largest
    /// log-weight is subtracted before exponentiating, so no weight can
    /// overflow and the dominant ones never underflow.
    pub fn compute(dim: usize, coupling: f64, temperature: f64) -> Result<Self> {
        check_parameters(dim, coupling, temperature)?;
        if dim > MAX_EXACT_DIM {
            return Err(IsingError::EnumerationTooLarge {
                spins: dim.saturating_mul(dim),
                max: MAX_EXACT_DIM * MAX_EXACT_DIM,
            });
        }
        let n_spins = dim * dim;
        let n_codes = 1u64 << n_spins;
        debug!(dim, n_codes, temperature, "enumerating configurations");

        let energies: Vec<f64> = (0..n_codes)
            .into_par_iter()
            .map(|code| codec::decode_grid(code, dim).map(|g| lattice::energy(&g, coupling)))
            .collect::<Result<_>>()?;

        let log_weights: Vec<f64> = energies.par_iter().map(|&e| -e / temperature).collect();
        let max_log = log_weights
            .par_iter()
            .cloned()
            .reduce(|| f64::NEG_INFINITY, f64::max);
        if !max_log.is_finite() {
            return Err(IsingError::NumericInstability {
                reason: format!("largest log-weight is {max_log}"),
            });
        }

        let weights: Vec<f64> = log_weights.par_iter().map(|&lw| (lw - max_log).exp()).collect();
        let total: f64 = weights.par_iter().sum();
        if !(total.is_finite() && total >= 1.0) {
            return Err(IsingError::NumericInstability {
                reason: format!("weight sum is {total}"),
            });
        }
        if max_log.abs() > f64::MAX_EXP as f64 {
            warn!(max_log, "raw Boltzmann weights out of f64 range, relying on log-space shift");
        }

        let probabilities: Vec<f64> = weights.par_iter().map(|&w| w / total).collect();
        let mean_energy = probabilities
            .par_iter()
            .zip(energies.par_iter())
            .map(|(p, e)| p * e)
            .sum::<f64>();

        Ok(Self {
            dim,
            coupling,
            temperature,
            probabilities,
            log_partition: max_log + total.ln(),
            mean_energy,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Number of configurations, 2^N.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Probability of `code`, or `None` past 2^N.
    pub fn probability(&self, code: u64) -> Option<f64> {
        usize::try_from(code).ok().and_then(|i| self.probabilities.get(i).copied())
    }

    /// Probabilities indexed by code.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Ordered `(code, probability)` pairs.
    pub fn entries(&self) -> Vec<(u64, f64)> {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(c, &p)| (c as u64, p))
            .collect()
    }

    /// ln Z under the doubled-bond energy.
    pub fn log_partition(&self) -> f64 {
        self.log_partition
    }

    /// Ensemble average ⟨E⟩.
    pub fn mean_energy(&self) -> f64 {
        self.mean_energy
    }
}

impl IsingModel {
    /// Exact distribution for this model's size, coupling and temperature.
    pub fn theoretical_distribution(&self) -> Result<ExactDistribution> {
        ExactDistribution::compute(self.dim(), self.coupling(), self.temperature())
    }
}
