// autocorr.rs - Integrated autocorrelation time of a Monte Carlo time series

use crate::error::{IsingError, Result};

/// Arithmetic mean.
pub fn sample_mean(series: &[f64]) -> Result<f64> {
    if series.is_empty() {
        return Err(IsingError::EmptySeries);
    }
    Ok(series.iter().sum::<f64>() / series.len() as f64)
}

/// `C(lag) = 1/(n - lag) · Σ_{i<n} (x_i - μ)(x_{(i+lag) mod n} - μ)`.
///
/// The lagged index wraps around the end of the series instead of
/// truncating, so all `n` products are summed for every lag.
pub fn offset_autocorrelation(series: &[f64], lag: usize, mean: f64) -> Result<f64> {
    let n = series.len();
    if n == 0 {
        return Err(IsingError::EmptySeries);
    }
    if lag >= n {
        return Err(IsingError::LagOutOfRange { lag, len: n });
    }
    let sum: f64 = series
        .iter()
        .enumerate()
        .map(|(i, &x)| (x - mean) * (series[(i + lag) % n] - mean))
        .sum();
    Ok(sum / (n - lag) as f64)
}

/// Normalized autocorrelation ρ(lag) = C(lag) / C(0) for lags `0..=max_lag`.
pub fn autocorrelation_function(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let mean = sample_mean(series)?;
    let c0 = offset_autocorrelation(series, 0, mean)?;
    if c0 == 0.0 {
        return Err(IsingError::ZeroVariance);
    }
    (0..=max_lag)
        .map(|lag| offset_autocorrelation(series, lag, mean).map(|c| c / c0))
        .collect()
}

/// `τ = 1 + 2 Σ_{lag=1}^{M} ρ(lag)` with window `M = ⌊n/10⌋`.
///
/// Roughly the number of sweeps between independent samples.
pub fn integrated_autocorrelation_time(series: &[f64]) -> Result<f64> {
    let window = series.len() / 10;
    let rho = autocorrelation_function(series, window)?;
    Ok(1.0 + 2.0 * rho.iter().skip(1).sum::<f64>())
}

/// Mean, correlation time and the error bar they imply.
#[derive(Debug, Clone, Copy)]
pub struct AutocorrSummary {
    pub mean: f64,
    pub tau_int: f64,
    /// `n / τ_int`, the number of effectively independent samples.
    pub n_eff: f64,
    /// Standard error of the mean corrected for autocorrelation.
    pub stat_error: f64,
}

impl AutocorrSummary {
    /// A constant series (frozen chain) gives `tau_int = NaN`, `n_eff = n`
    /// and a zero error bar.
    pub fn from_series(series: &[f64]) -> Result<Self> {
        let n = series.len() as f64;
        let mean = sample_mean(series)?;
        let tau_int = match integrated_autocorrelation_time(series) {
            Ok(tau) => tau,
            Err(IsingError::ZeroVariance) => f64::NAN,
            Err(e) => return Err(e),
        };

        // A short noisy series can give τ < 1; never claim more than n samples.
        // f64::max ignores NaN, so a frozen chain keeps n_eff = n.
        let n_eff = n / tau_int.max(1.0);
        let variance = if series.len() > 1 {
            series.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };

        Ok(Self {
            mean,
            tau_int,
            n_eff,
            stat_error: (variance / n_eff).sqrt(),
        })
    }

    /// Whether the series never changed, leaving τ_int undefined.
    pub fn is_frozen(&self) -> bool {
        self.tau_int.is_nan()
    }
}
