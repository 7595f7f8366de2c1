// codec.rs - Configuration <-> integer code bijection

use crate::error::{IsingError, Result};
use crate::lattice::{Spin, SpinGrid};

/// Widest code word supported (one bit per spin).
pub const MAX_CODE_BITS: usize = u64::BITS as usize;

/// Result of decoding a code with a caller-chosen bit length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Bit length was a perfect square, reshaped to a grid.
    Grid(SpinGrid),
    /// Any other bit length, returned as the flat spin sequence.
    Flat(Vec<Spin>),
}

impl Decoded {
    pub fn into_grid(self) -> Option<SpinGrid> {
        match self {
            Self::Grid(g) => Some(g),
            Self::Flat(_) => None,
        }
    }
}

/// Whether a `dim x dim` configuration fits in one code word.
pub fn fits(dim: usize) -> bool {
    dim.checked_mul(dim).is_some_and(|n| n <= MAX_CODE_BITS)
}

/// Row-major flattening, +1 -> 1 and -1 -> 0, read as binary with (0, 0)
/// as the most significant bit.
pub fn encode(grid: &SpinGrid) -> Result<u64> {
    let bits = grid.n_sites();
    if bits > MAX_CODE_BITS {
        return Err(IsingError::EncodingOverflow { bits, max: MAX_CODE_BITS });
    }
    Ok(grid
        .spins()
        .iter()
        .fold(0u64, |acc, &s| (acc << 1) | u64::from(s == 1)))
}

/// Inverse of [`encode`].
///
/// The code is left-padded with zeros (i.e. -1 spins) to exactly
/// `bit_length` bits. Perfect-square lengths come back as a grid.
pub fn decode(code: u64, bit_length: usize) -> Result<Decoded> {
    if bit_length == 0 {
        return Err(IsingError::ShapeMismatch {
            reason: "bit length must be positive".to_string(),
        });
    }
    if bit_length > MAX_CODE_BITS {
        return Err(IsingError::EncodingOverflow { bits: bit_length, max: MAX_CODE_BITS });
    }
    if bit_length < MAX_CODE_BITS && code >> bit_length != 0 {
        return Err(IsingError::CodeOutOfRange { code, bits: bit_length });
    }

    let spins: Vec<Spin> = (0..bit_length)
        .rev()
        .map(|b| if (code >> b) & 1 == 1 { 1 } else { -1 })
        .collect();

    match exact_sqrt(bit_length) {
        Some(dim) => Ok(Decoded::Grid(SpinGrid::from_flat(dim, spins)?)),
        None => Ok(Decoded::Flat(spins)),
    }
}

/// Decode straight to a `dim x dim` grid.
pub fn decode_grid(code: u64, dim: usize) -> Result<SpinGrid> {
    if dim == 0 {
        return Err(IsingError::InvalidDimension { dim });
    }
    if !fits(dim) {
        return Err(IsingError::EncodingOverflow {
            bits: dim.saturating_mul(dim),
            max: MAX_CODE_BITS,
        });
    }
    decode(code, dim * dim)?
        .into_grid()
        .ok_or_else(|| IsingError::ShapeMismatch {
            reason: format!("{} bits did not reshape to a {dim}x{dim} grid", dim * dim),
        })
}

fn exact_sqrt(n: usize) -> Option<usize> {
    let r = (n as f64).sqrt().round() as usize;
    (r * r == n).then_some(r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cell_is_most_significant() {
        let g = SpinGrid::from_rows(vec![vec![1, -1], vec![-1, -1]]).unwrap();
        assert_eq!(encode(&g).unwrap(), 0b1000);
        let g = SpinGrid::from_rows(vec![vec![-1, -1], vec![-1, 1]]).unwrap();
        assert_eq!(encode(&g).unwrap(), 0b0001);
    }

    #[test]
    fn non_square_lengths_stay_flat() {
        assert_eq!(decode(0b101, 3).unwrap(), Decoded::Flat(vec![1, -1, 1]));
        assert_eq!(decode(0b1, 5).unwrap(), Decoded::Flat(vec![-1, -1, -1, -1, 1]));
    }

    #[test]
    fn rejects_codes_that_do_not_fit() {
        assert_eq!(
            decode(16, 4).unwrap_err(),
            IsingError::CodeOutOfRange { code: 16, bits: 4 }
        );
        assert!(decode(u64::MAX, 64).is_ok());
    }
}
