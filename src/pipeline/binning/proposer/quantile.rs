//! Quantile-family proposers: every piece count from 2 up to a cap,
//! each cut by quantile over a different view of the data.

use super::{distinct_sorted, piece_counts, CandidateProposer};
use crate::pipeline::binning::quantile::qcut;
use crate::pipeline::binning::types::CutSet;

fn quantile_candidates(values: &[f64], max_bins: usize) -> Vec<CutSet> {
    let distinct = distinct_sorted(values).len();
    if values.is_empty() {
        return Vec::new();
    }
    piece_counts(distinct, max_bins)
        .map(|n| qcut(values, n))
        .collect()
}

/// Quantiles of the feature itself
#[derive(Debug, Clone)]
pub struct QuantileProposer {
    pub max_bins: usize,
}

impl CandidateProposer for QuantileProposer {
    fn name(&self) -> &'static str {
        "quantile"
    }

    fn propose(&self, xs: &[f64], _ys: &[u8]) -> Vec<CutSet> {
        quantile_candidates(xs, self.max_bins)
    }
}

/// Quantiles of the feature over the bad (y = 1) rows only
#[derive(Debug, Clone)]
pub struct BadRateQuantileProposer {
    pub max_bins: usize,
}

impl CandidateProposer for BadRateQuantileProposer {
    fn name(&self) -> &'static str {
        "bad"
    }

    fn propose(&self, xs: &[f64], ys: &[u8]) -> Vec<CutSet> {
        let bad_xs: Vec<f64> = xs
            .iter()
            .zip(ys.iter())
            .filter(|(_, &y)| y == 1)
            .map(|(&x, _)| x)
            .collect();
        quantile_candidates(&bad_xs, self.max_bins)
    }
}

/// Quantiles over the distinct values, spacing cuts evenly through the
/// observed value range regardless of how often each value occurs
#[derive(Debug, Clone)]
pub struct RangeProposer {
    pub max_bins: usize,
}

impl CandidateProposer for RangeProposer {
    fn name(&self) -> &'static str {
        "range"
    }

    fn propose(&self, xs: &[f64], _ys: &[u8]) -> Vec<CutSet> {
        let distinct = distinct_sorted(xs);
        // piece counts follow the distinct count, same as the quantile proposer
        quantile_candidates(&distinct, self.max_bins)
    }
}
