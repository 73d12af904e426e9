//! Candidate cut-set proposers
//!
//! A proposer turns the non-missing part of a sample into a list of
//! candidate cut sets. Strategies only differ here; selection, missing
//! merge and scoring are shared.

mod isotonic;
mod kmeans;
mod quantile;
mod tree;

pub use isotonic::IsotonicProposer;
pub use kmeans::KMeansProposer;
pub use quantile::{BadRateQuantileProposer, QuantileProposer, RangeProposer};
pub use tree::BoostedTreeProposer;

use std::ops::Range;

use super::types::CutSet;

/// Produces candidate cut sets from non-missing `xs` and their labels.
///
/// Implementations must be deterministic for a given input. Candidates
/// need not be canonical or distinct; the engine fits and dedups them.
pub trait CandidateProposer: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    fn propose(&self, xs: &[f64], ys: &[u8]) -> Vec<CutSet>;
}

/// Sorted distinct values
pub(crate) fn distinct_sorted(xs: &[f64]) -> Vec<f64> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted
}

/// Piece counts tried for a variable with `distinct` values:
/// `2 .. max(3, min(cap, distinct - 1))`.
pub(crate) fn piece_counts(distinct: usize, cap: usize) -> Range<usize> {
    2..cap.min(distinct.saturating_sub(1)).max(3)
}

pub(crate) fn median(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sign of the Spearman correlation between feature and label.
pub(crate) fn trend(xs: &[f64], ys: &[u8]) -> f64 {
    let labels: Vec<f64> = ys.iter().map(|&y| f64::from(y)).collect();
    super::select::spearman(xs, &labels)
}

/// Reduce a fitted step function to a cut set.
///
/// Rows are grouped by fitted value. Each group contributes its maximum
/// x when its mean label lies strictly between 0 and 1 and it holds more
/// than one bad. The sorted maxima lose their last element, and also
/// their first when more than two remain.
pub(crate) fn level_cuts(fitted: &[f64], xs: &[f64], ys: &[u8]) -> CutSet {
    let mut rows: Vec<(f64, f64, u8)> = fitted
        .iter()
        .zip(xs.iter())
        .zip(ys.iter())
        .map(|((&f, &x), &y)| (f, x, y))
        .collect();
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut maxima = Vec::new();
    let mut start = 0;
    while start < rows.len() {
        let mut end = start;
        while end < rows.len() && rows[end].0 == rows[start].0 {
            end += 1;
        }
        let group = &rows[start..end];
        let bads: usize = group.iter().map(|r| usize::from(r.2)).sum();
        let mean = bads as f64 / group.len() as f64;
        if mean > 0.0 && mean < 1.0 && bads > 1 {
            let max_x = group.iter().map(|r| r.1).fold(f64::NEG_INFINITY, f64::max);
            maxima.push(max_x);
        }
        start = end;
    }
    maxima.sort_by(|a, b| a.total_cmp(b));

    let kept = match maxima.len() {
        0 => &maxima[..],
        1 | 2 => &maxima[..maxima.len() - 1],
        n => &maxima[1..n - 1],
    };
    CutSet::new(kept.iter().copied())
}
