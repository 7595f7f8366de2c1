//! Error types for lattice construction, encoding and analysis.

use std::fmt;

/// Errors raised by the simulation and analysis routines.
///
/// Every variant is a caller contract violation reported synchronously;
/// nothing here is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum IsingError {
    /// Lattice dimension must be at least 1.
    InvalidDimension {
        /// The rejected dimension.
        dim: usize,
    },
    /// Temperature must be finite and strictly positive.
    InvalidTemperature {
        /// The rejected temperature.
        temperature: f64,
    },
    /// Coupling constant must be finite.
    InvalidCoupling {
        /// The rejected coupling.
        coupling: f64,
    },
    /// A spin configuration is not a square 2D grid.
    ShapeMismatch {
        /// What went wrong.
        reason: String,
    },
    /// A cell holds something other than +1 or -1.
    InvalidSpin {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The value found there.
        value: i8,
    },
    /// A site lies outside `[0, dim) x [0, dim)`.
    SiteOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Lattice dimension.
        dim: usize,
    },
    /// The configuration has more spins than a code word can hold.
    EncodingOverflow {
        /// Number of bits required.
        bits: usize,
        /// Number of bits available.
        max: usize,
    },
    /// A code does not fit in the requested bit length.
    CodeOutOfRange {
        /// The offending code.
        code: u64,
        /// The requested bit length.
        bits: usize,
    },
    /// Exact enumeration was requested for too many spins.
    EnumerationTooLarge {
        /// Number of spins requested.
        spins: usize,
        /// Largest supported number of spins.
        max: usize,
    },
    /// A floating-point result came out NaN or infinite.
    NumericInstability {
        /// What went wrong.
        reason: String,
    },
    /// A color tag outside `{R, B, G, Y}`.
    InvalidColor {
        /// The unrecognised tag.
        tag: String,
    },
    /// Unknown dynamics name.
    InvalidDynamics {
        /// The unrecognised name.
        name: String,
    },
    /// A statistic was requested on an empty series.
    EmptySeries,
    /// Autocorrelation lag is not smaller than the series length.
    LagOutOfRange {
        /// Requested lag.
        lag: usize,
        /// Series length.
        len: usize,
    },
    /// The series is constant, so its autocorrelation is undefined.
    ZeroVariance,
    /// Configuration could not be read or is inconsistent.
    Config {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for IsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { dim } => {
                write!(f, "lattice dimension must be positive, got {dim}")
            }
            Self::InvalidTemperature { temperature } => {
                write!(f, "temperature must be finite and > 0, got {temperature}")
            }
            Self::InvalidCoupling { coupling } => {
                write!(f, "coupling constant must be finite, got {coupling}")
            }
            Self::ShapeMismatch { reason } => write!(f, "shape mismatch: {reason}"),
            Self::InvalidSpin { row, col, value } => {
                write!(f, "spin at ({row}, {col}) is {value}, expected +1 or -1")
            }
            Self::SiteOutOfBounds { row, col, dim } => {
                write!(f, "site ({row}, {col}) out of bounds for a {dim}x{dim} lattice")
            }
            Self::EncodingOverflow { bits, max } => {
                write!(f, "configuration needs {bits} bits but codes hold at most {max}")
            }
            Self::CodeOutOfRange { code, bits } => {
                write!(f, "code {code} does not fit in {bits} bits")
            }
            Self::EnumerationTooLarge { spins, max } => {
                write!(f, "exact enumeration over {spins} spins exceeds the limit of {max}")
            }
            Self::NumericInstability { reason } => write!(f, "numeric instability: {reason}"),
            Self::InvalidColor { tag } => {
                write!(f, "unknown color '{tag}', expected one of R, B, G, Y")
            }
            Self::InvalidDynamics { name } => {
                write!(f, "unknown dynamics '{name}', expected 'metropolis' or 'heatbath'")
            }
            Self::EmptySeries => write!(f, "series is empty"),
            Self::LagOutOfRange { lag, len } => {
                write!(f, "lag {lag} out of range for a series of length {len}")
            }
            Self::ZeroVariance => write!(f, "series has zero variance"),
            Self::Config { reason } => write!(f, "invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for IsingError {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, IsingError>;

/// Validate the parameters shared by every model constructor.
pub(crate) fn check_parameters(dim: usize, coupling: f64, temperature: f64) -> Result<()> {
    if dim == 0 {
        return Err(IsingError::InvalidDimension { dim });
    }
    if !coupling.is_finite() {
        return Err(IsingError::InvalidCoupling { coupling });
    }
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(IsingError::InvalidTemperature { temperature });
    }
    Ok(())
}
