//! Isotonic-regression proposer

use super::{distinct_sorted, level_cuts, trend, CandidateProposer};
use crate::pipeline::binning::types::CutSet;

/// Fits a monotone step function of the label on the feature with the
/// pool-adjacent-violators algorithm and proposes its steps as cuts.
#[derive(Debug, Clone, Default)]
pub struct IsotonicProposer;

impl CandidateProposer for IsotonicProposer {
    fn name(&self) -> &'static str {
        "isotonic"
    }

    fn propose(&self, xs: &[f64], ys: &[u8]) -> Vec<CutSet> {
        if xs.is_empty() {
            return Vec::new();
        }
        let cor = trend(xs, ys);
        let increasing = cor.is_nan() || cor >= 0.0;

        let fitted = isotonic_fit(xs, ys, increasing);
        vec![level_cuts(&fitted, xs, ys)]
    }
}

/// Pooled run of adjacent distinct x values
#[derive(Debug, Clone, Copy)]
struct Block {
    sum: f64,
    count: f64,
    groups: usize,
}

impl Block {
    fn mean(&self) -> f64 {
        self.sum / self.count
    }
}

/// Fitted value per row. Rows sharing an x value are averaged first and
/// share one fitted value.
fn isotonic_fit(xs: &[f64], ys: &[u8], increasing: bool) -> Vec<f64> {
    let sign = if increasing { 1.0 } else { -1.0 };
    let distinct = distinct_sorted(xs);

    let group_of: Vec<usize> = xs
        .iter()
        .map(|&x| distinct.partition_point(|&d| d < x))
        .collect();

    let mut sums = vec![0.0; distinct.len()];
    let mut counts = vec![0.0; distinct.len()];
    for (&group, &y) in group_of.iter().zip(ys.iter()) {
        sums[group] += sign * f64::from(y);
        counts[group] += 1.0;
    }

    let mut stack: Vec<Block> = Vec::with_capacity(distinct.len());
    for (&sum, &count) in sums.iter().zip(counts.iter()) {
        stack.push(Block {
            sum,
            count,
            groups: 1,
        });
        while stack.len() >= 2 {
            let top = stack[stack.len() - 1];
            let below = stack[stack.len() - 2];
            if below.mean() < top.mean() {
                break;
            }
            stack.pop();
            if let Some(merged) = stack.last_mut() {
                merged.sum += top.sum;
                merged.count += top.count;
                merged.groups += top.groups;
            }
        }
    }

    let group_fit: Vec<f64> = stack
        .iter()
        .flat_map(|block| std::iter::repeat(sign * block.mean()).take(block.groups))
        .collect();

    group_of.iter().map(|&group| group_fit[group]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_is_monotone_increasing() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [0, 1, 0, 1, 1, 1];
        let fitted = isotonic_fit(&xs, &ys, true);
        assert!(fitted.windows(2).all(|w| w[0] <= w[1]));
        // 2 and 3 pool to 0.5
        assert_eq!(fitted, vec![0.0, 0.5, 0.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_fit_is_monotone_decreasing() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [1, 0, 1, 0];
        let fitted = isotonic_fit(&xs, &ys, false);
        assert!(fitted.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(fitted, vec![1.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_tied_x_share_fit() {
        let xs = [2.0, 1.0, 2.0, 1.0];
        let ys = [1, 0, 0, 0];
        let fitted = isotonic_fit(&xs, &ys, true);
        assert_eq!(fitted, vec![0.5, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_proposes_single_candidate() {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        // rates 1/4, 2/4, 3/4 across three x levels
        for (v, bads) in [(1.0, 1), (2.0, 2), (3.0, 3)] {
            for i in 0..4 {
                xs.push(v);
                ys.push(u8::from(i < bads));
            }
        }
        let candidates = IsotonicProposer.propose(&xs, &ys);
        assert_eq!(candidates.len(), 1);
        // level 1/4 holds a single bad and is skipped; [2.0, 3.0] loses its last
        assert_eq!(candidates[0].points(), &[2.0]);
    }
}
