// histogram.rs - Sampled configuration codes versus the exact distribution

use crate::exact::ExactDistribution;
use std::collections::BTreeMap;

/// Counts of sampled configuration codes.
#[derive(Debug, Clone, Default)]
pub struct CodeHistogram {
    counts: BTreeMap<u64, usize>,
    total: usize,
}

/// One row of a simulated/theoretical comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRow {
    pub code: u64,
    pub simulated: f64,
    pub theoretical: f64,
}

impl CodeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: u64) {
        *self.counts.entry(code).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, code: u64) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Number of samples seen.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct codes seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Fraction of samples equal to `code`; 0 when empty.
    pub fn frequency(&self, code: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(code) as f64 / self.total as f64
        }
    }

    /// Share of the most frequent code.
    pub fn max_fraction(&self) -> f64 {
        match self.counts.values().max() {
            Some(&c) => c as f64 / self.total as f64,
            None => 0.0,
        }
    }

    /// The `k` most frequent `(code, count)` pairs, ties broken by code.
    pub fn dominant(&self, k: usize) -> Vec<(u64, usize)> {
        let mut v: Vec<(u64, usize)> = self.counts.iter().map(|(&c, &n)| (c, n)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        v.truncate(k);
        v
    }

    /// Relative frequencies for codes `0..n_codes`. Codes past the end are dropped.
    pub fn empirical_pmf(&self, n_codes: usize) -> Vec<f64> {
        (0..n_codes as u64).map(|c| self.frequency(c)).collect()
    }

    /// `½ Σ |p_sim - p_exact|` over the exact distribution's code range.
    pub fn total_variation_distance(&self, exact: &ExactDistribution) -> f64 {
        0.5 * self
            .compare(exact)
            .iter()
            .map(|r| (r.simulated - r.theoretical).abs())
            .sum::<f64>()
    }

    /// Simulated and theoretical probability for every code in order.
    pub fn compare(&self, exact: &ExactDistribution) -> Vec<ComparisonRow> {
        exact
            .entries()
            .into_iter()
            .map(|(code, theoretical)| ComparisonRow {
                code,
                simulated: self.frequency(code),
                theoretical,
            })
            .collect()
    }
}

impl Extend<u64> for CodeHistogram {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for code in iter {
            self.push(code);
        }
    }
}

impl FromIterator<u64> for CodeHistogram {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut h = Self::new();
        h.extend(iter);
        h
    }
}
