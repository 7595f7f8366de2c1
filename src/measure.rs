//! Record per-sweep observables and run temperature scans
use crate::autocorr::{integrated_autocorrelation_time, sample_mean};
use crate::codec;
use crate::dynamics::{Dynamics, SweepSample};
use crate::error::{check_parameters, IsingError, Result};
use crate::histogram::CodeHistogram;
use crate::model::IsingModel;
use crate::utils::rng::derive_seed;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};

/// Which per-sweep series is fed to the autocorrelation estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observable {
    /// Configuration code, read as a real number.
    #[default]
    Encoding,
    Energy,
}

impl FromStr for Observable {
    type Err = IsingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "encoding" => Ok(Self::Encoding),
            "energy" => Ok(Self::Energy),
            _ => Err(IsingError::Config {
                reason: format!("unknown observable '{s}', expected 'encoding' or 'energy'"),
            }),
        }
    }
}

/// Time series of sweep samples.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub energies: Vec<f64>,
    /// Empty when the lattice is too large to encode.
    pub encodings: Vec<u64>,
}

impl Recorder {
    pub fn push(&mut self, sample: SweepSample) {
        self.energies.push(sample.energy);
        if let Some(code) = sample.encoding {
            self.encodings.push(code);
        }
    }

    /// Run `sweeps` sweeps on `model` and record each one.
    pub fn sample(model: &mut IsingModel, sweeps: usize) -> Self {
        let mut rec = Self {
            energies: Vec::with_capacity(sweeps),
            encodings: Vec::with_capacity(sweeps),
        };
        for _ in 0..sweeps {
            rec.push(model.run_sweep());
        }
        rec
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn series(&self, observable: Observable) -> Vec<f64> {
        match observable {
            Observable::Encoding => self.encodings.iter().map(|&c| c as f64).collect(),
            Observable::Energy => self.energies.clone(),
        }
    }

    pub fn histogram(&self) -> CodeHistogram {
        self.encodings.iter().copied().collect()
    }
}

/// `steps + 1` evenly spaced temperatures from `t_start` to `t_stop`.
pub fn temperature_grid(t_start: f64, t_stop: f64, steps: usize) -> Vec<f64> {
    if steps == 0 {
        return vec![t_start];
    }
    let dt = (t_stop - t_start) / steps as f64;
    (0..=steps).map(|k| t_start + k as f64 * dt).collect()
}

/// Parameters of a temperature scan.
#[derive(Debug, Clone)]
pub struct ScanSpec {
    pub dim: usize,
    pub coupling: f64,
    pub temperatures: Vec<f64>,
    pub warmup: usize,
    pub sweeps: usize,
    pub dynamics: Dynamics,
    pub observable: Observable,
    pub seed: u64,
}

/// Summary of one temperature.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScanPoint {
    pub temperature: f64,
    pub mean_energy: f64,
    pub energy_std: f64,
    /// NaN when the chain never moved (constant series).
    pub autocorrelation_time: f64,
}

/// Independent simulation per temperature, run in parallel.
pub fn scan_temperatures(spec: &ScanSpec) -> Result<Vec<ScanPoint>> {
    scan_temperatures_with(spec, |_| {})
}

/// Like [`scan_temperatures`], calling `on_point` as each temperature finishes.
pub fn scan_temperatures_with<F>(spec: &ScanSpec, on_point: F) -> Result<Vec<ScanPoint>>
where
    F: Fn(&ScanPoint) + Sync,
{
    if spec.observable == Observable::Encoding && !codec::fits(spec.dim) {
        return Err(IsingError::EncodingOverflow {
            bits: spec.dim * spec.dim,
            max: codec::MAX_CODE_BITS,
        });
    }
    if spec.sweeps == 0 {
        return Err(IsingError::EmptySeries);
    }
    for &t in &spec.temperatures {
        check_parameters(spec.dim, spec.coupling, t)?;
    }

    spec.temperatures
        .par_iter()
        .enumerate()
        .map(|(k, &temperature)| {
            let seed = derive_seed(spec.seed, k);
            let mut model = IsingModel::with_seed(spec.dim, spec.coupling, temperature, seed)?
                .with_dynamics(spec.dynamics);
            model.warmup(spec.warmup);
            let rec = Recorder::sample(&mut model, spec.sweeps);

            let mean_energy = sample_mean(&rec.energies)?;
            let energy_std = (rec
                .energies
                .iter()
                .map(|&e| (e - mean_energy).powi(2))
                .sum::<f64>()
                / rec.len() as f64)
                .sqrt();
            let autocorrelation_time =
                match integrated_autocorrelation_time(&rec.series(spec.observable)) {
                    Ok(tau) => tau,
                    Err(IsingError::ZeroVariance) => {
                        warn!(temperature, "chain frozen, autocorrelation time undefined");
                        f64::NAN
                    }
                    Err(e) => return Err(e),
                };

            let point = ScanPoint {
                temperature,
                mean_energy,
                energy_std,
                autocorrelation_time,
            };
            info!(temperature, tau = autocorrelation_time, mean_energy, "scan point done");
            on_point(&point);
            Ok(point)
        })
        .collect()
}
