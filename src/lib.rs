//! Single-spin-flip Monte Carlo for the free-boundary 2D Ising model, with
//! exact enumeration of small lattices for comparison.

pub mod error;
pub mod lattice;
pub mod model;
pub mod dynamics;
pub mod codec;
pub mod exact;
pub mod autocorr;
pub mod coloring;
pub mod histogram;
pub mod measure;
pub mod config;
pub mod utils;

pub use error::{IsingError, Result};
pub use lattice::{Site, Spin, SpinGrid};
pub use model::IsingModel;
pub use dynamics::{Dynamics, StepInfo, SweepSample, DEFAULT_WARMUP_SWEEPS};
pub use exact::ExactDistribution;
pub use coloring::Color;
pub use histogram::CodeHistogram;
pub use measure::{Observable, Recorder, ScanPoint, ScanSpec};
pub use config::SimConfig;
