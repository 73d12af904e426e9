//! Monotonic candidate selection
//!
//! Every candidate cut set is partitioned and scored independently. A
//! candidate is eligible when its bad rate is strictly monotonic across
//! bins (Spearman correlation of bin index against bad rate is exactly
//! ±1) and no bin is all-good or all-bad. Among eligible candidates the
//! one with the most cut points wins; equal cardinality falls back to the
//! lexicographically smallest cut set.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use super::error::{BinningError, Result};
use super::partition::summarize_bins;
use super::stats::round_to;
use super::types::{Bin, CutSet};

/// Decimals kept before the monotonicity and degeneracy comparisons.
/// Rounding first absorbs floating-point noise in the correlation.
pub const MONOTONIC_DECIMALS: i32 = 8;

/// Average ranks (1-based) with ties sharing the mean of their positions.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a) * (x - mean_a);
        var_b += (y - mean_b) * (y - mean_b);
    }

    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    cov / (var_a * var_b).sqrt()
}

/// Spearman rank correlation.
///
/// NaN when the inputs differ in length, have fewer than two points, or
/// either side is constant.
pub fn spearman(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    pearson(&average_ranks(a), &average_ranks(b))
}

/// Monotonicity and degeneracy measures of one candidate partition
#[derive(Debug, Clone)]
pub struct CandidateScore {
    pub cut: CutSet,
    pub bins: Vec<Bin>,
    pub spearman: f64,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl CandidateScore {
    /// Partition `xs` with `cut` and measure the resulting bad rates.
    pub fn evaluate(cut: CutSet, xs: &[f64], ys: &[u8]) -> Self {
        let bins = summarize_bins(&cut, xs, ys);
        let index: Vec<f64> = bins.iter().map(|b| b.bin as f64).collect();
        let rates: Vec<f64> = bins.iter().map(Bin::rate).collect();

        let min_rate = rates.iter().copied().fold(f64::INFINITY, f64::min);
        let max_rate = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            spearman: spearman(&index, &rates),
            cut,
            bins,
            min_rate,
            max_rate,
        }
    }

    /// Strictly monotonic bad rate with no all-good or all-bad bin.
    pub fn is_eligible(&self) -> bool {
        round_to(self.spearman, MONOTONIC_DECIMALS).abs() == 1.0
            && round_to(self.min_rate, MONOTONIC_DECIMALS) > 0.0
            && round_to(self.max_rate, MONOTONIC_DECIMALS) < 1.0
    }
}

/// Preference between two eligible candidates: more cut points first,
/// then the lexicographically smaller cut set.
fn preference(a: &CandidateScore, b: &CandidateScore) -> Ordering {
    b.cut
        .len()
        .cmp(&a.cut.len())
        .then_with(|| a.cut.lexicographic_cmp(&b.cut))
}

/// Score every candidate and return the winning partition.
///
/// Candidates are scored in parallel; the winner is only chosen once all
/// scores are in, so the outcome does not depend on scheduling.
pub fn select_monotonic(candidates: &[CutSet], xs: &[f64], ys: &[u8]) -> Result<CandidateScore> {
    let scores: Vec<CandidateScore> = candidates
        .par_iter()
        .map(|cut| CandidateScore::evaluate(cut.clone(), xs, ys))
        .collect();

    let eligible = scores.iter().filter(|s| s.is_eligible()).count();
    debug!(
        candidates = scores.len(),
        eligible = eligible,
        "Binning: scored candidate cut sets"
    );

    let winner = scores
        .into_iter()
        .filter(CandidateScore::is_eligible)
        .min_by(preference)
        .ok_or(BinningError::NoMonotonicPartition {
            candidates: candidates.len(),
        })?;

    debug!(
        cut = ?winner.cut.points(),
        spearman = winner.spearman,
        "Binning: selected monotonic partition"
    );
    Ok(winner)
}
