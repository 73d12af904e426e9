//! One-dimensional k-means proposer

use super::{distinct_sorted, median, piece_counts, CandidateProposer};
use crate::pipeline::binning::types::CutSet;

const CONVERGENCE_TOLERANCE: f64 = 1e-10;

/// Clusters the feature for every k from 2 up to `max_clusters` and cuts
/// at the upper edge of each cluster but the last. Also proposes the
/// single cuts at the median of x and at the median of x among bads.
#[derive(Debug, Clone)]
pub struct KMeansProposer {
    pub max_clusters: usize,
    pub max_iterations: usize,
}

impl CandidateProposer for KMeansProposer {
    fn name(&self) -> &'static str {
        "kmeans"
    }

    fn propose(&self, xs: &[f64], ys: &[u8]) -> Vec<CutSet> {
        if xs.is_empty() {
            return Vec::new();
        }
        let mut sorted = xs.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let distinct = distinct_sorted(&sorted).len();

        let mut candidates: Vec<CutSet> = piece_counts(distinct, self.max_clusters)
            .map(|k| {
                let centers = lloyd(&sorted, k, self.max_iterations);
                cluster_cuts(&sorted, &centers)
            })
            .collect();

        let bad_xs: Vec<f64> = xs
            .iter()
            .zip(ys.iter())
            .filter(|(_, &y)| y == 1)
            .map(|(&x, _)| x)
            .collect();
        for m in [median(xs), median(&bad_xs)].into_iter().flatten() {
            candidates.push(CutSet::new([m]));
        }
        candidates
    }
}

fn linear_quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn nearest(centers: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = (value - centers[0]).abs();
    for (idx, &center) in centers.iter().enumerate().skip(1) {
        let dist = (value - center).abs();
        if dist < best_dist {
            best = idx;
            best_dist = dist;
        }
    }
    best
}

/// Lloyd iterations from quantile-spaced starting centers.
///
/// `sorted` must be non-empty and ascending. Returns sorted, distinct
/// centers; fewer than `k` when the data cannot support `k`.
fn lloyd(sorted: &[f64], k: usize, max_iterations: usize) -> Vec<f64> {
    let mut centers: Vec<f64> = (0..k)
        .map(|idx| linear_quantile(sorted, idx as f64 / (k - 1).max(1) as f64))
        .collect();
    centers.dedup();
    let k = centers.len();

    for _ in 0..max_iterations {
        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for &value in sorted {
            let idx = nearest(&centers, value);
            sums[idx] += value;
            counts[idx] += 1;
        }

        let mut updated = centers.clone();
        for idx in 0..k {
            if counts[idx] > 0 {
                updated[idx] = sums[idx] / counts[idx] as f64;
            }
        }
        updated.sort_by(|a, b| a.total_cmp(b));

        let converged = updated
            .iter()
            .zip(centers.iter())
            .all(|(a, b)| (a - b).abs() <= CONVERGENCE_TOLERANCE);
        centers = updated;
        if converged {
            break;
        }
    }

    centers.dedup();
    centers
}

/// Upper edge of every non-empty cluster, sorted, without the last.
fn cluster_cuts(sorted: &[f64], centers: &[f64]) -> CutSet {
    let mut maxima = vec![f64::NEG_INFINITY; centers.len()];
    for &value in sorted {
        let idx = nearest(centers, value);
        maxima[idx] = maxima[idx].max(value);
    }
    let mut maxima: Vec<f64> = maxima.into_iter().filter(|m| m.is_finite()).collect();
    maxima.sort_by(|a, b| a.total_cmp(b));
    maxima.pop();
    CutSet::new(maxima)
}
