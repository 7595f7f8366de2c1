//! Run configuration
//!
//! Every field has a default, so an empty YAML document is a valid config.
//! `validate()` enforces the construction preconditions before anything runs.

use crate::dynamics::{Dynamics, DEFAULT_WARMUP_SWEEPS};
use crate::error::{check_parameters, IsingError, Result};
use crate::measure::{temperature_grid, Observable, ScanSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lattice side length L
    pub dim: usize,

    /// Coupling constant J (> 0 is ferromagnetic)
    pub coupling: f64,

    /// Temperature T in units of J/k_B
    pub temperature: f64,

    pub dynamics: Dynamics,

    /// Sweeps discarded before sampling
    pub warmup_sweeps: usize,

    /// Sweeps recorded
    pub sweeps: usize,

    /// RNG seed; drawn from the OS when absent
    pub seed: Option<u64>,

    /// Temperature scan (optional)
    pub scan: Option<ScanConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dim: 3,
            coupling: 1.0,
            temperature: 2.0,
            dynamics: Dynamics::Heatbath,
            warmup_sweeps: DEFAULT_WARMUP_SWEEPS,
            sweeps: 10_000,
            seed: None,
            scan: None,
        }
    }
}

/// Temperature scan parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub t_start: f64,
    pub t_stop: f64,

    /// Number of intervals; the scan visits `steps + 1` temperatures
    pub steps: usize,

    /// Sweeps recorded per temperature
    pub sweeps: usize,

    pub observable: Observable,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            t_start: 0.5,
            t_stop: 5.0,
            steps: 100,
            sweeps: 1000,
            observable: Observable::Encoding,
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| IsingError::Config {
            reason: format!("cannot parse YAML: {e}"),
        })
    }

    /// Read and parse a YAML file. Does not validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| IsingError::Config {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self).map_err(|e| IsingError::Config {
            reason: format!("cannot serialize config: {e}"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        check_parameters(self.dim, self.coupling, self.temperature)?;
        if self.sweeps == 0 {
            return Err(IsingError::Config {
                reason: "sweeps must be >= 1".to_string(),
            });
        }
        if let Some(scan) = &self.scan {
            for t in [scan.t_start, scan.t_stop] {
                if !(t.is_finite() && t > 0.0) {
                    return Err(IsingError::InvalidTemperature { temperature: t });
                }
            }
            if scan.t_stop < scan.t_start {
                return Err(IsingError::Config {
                    reason: format!(
                        "scan range is reversed: t_start {} > t_stop {}",
                        scan.t_start, scan.t_stop
                    ),
                });
            }
            if scan.sweeps == 0 {
                return Err(IsingError::Config {
                    reason: "scan sweeps must be >= 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Scan description for `scan_temperatures`, using the default scan
    /// section when none was configured.
    pub fn scan_spec(&self, seed: u64) -> ScanSpec {
        let scan = self.scan.clone().unwrap_or_default();
        ScanSpec {
            dim: self.dim,
            coupling: self.coupling,
            temperatures: temperature_grid(scan.t_start, scan.t_stop, scan.steps),
            warmup: self.warmup_sweeps,
            sweeps: scan.sweeps,
            dynamics: self.dynamics,
            observable: scan.observable,
            seed,
        }
    }
}
