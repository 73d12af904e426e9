//! Monotone regression-tree proposer
//!
//! Grows a single least-squares regression tree leaf-wise under a
//! monotone constraint on the feature, the way a one-round gradient
//! boosting model with a monotone constraint would. Leaf outputs are
//! bounded: when a node splits, the midpoint of its children's outputs
//! becomes the upper bound of the lower child and the lower bound of the
//! upper child, so every leaf stays on the right side of its neighbours.

use tracing::trace;

use super::{level_cuts, trend, CandidateProposer};
use crate::pipeline::binning::types::CutSet;

const MIN_GAIN: f64 = 1e-12;

/// Proposes the leaf boundaries of a monotone regression tree.
#[derive(Debug, Clone)]
pub struct BoostedTreeProposer {
    pub max_leaves: usize,
    pub min_child_samples: usize,
}

impl CandidateProposer for BoostedTreeProposer {
    fn name(&self) -> &'static str {
        "gbm"
    }

    fn propose(&self, xs: &[f64], ys: &[u8]) -> Vec<CutSet> {
        if xs.is_empty() {
            return Vec::new();
        }
        let increasing = trend(xs, ys) > 0.0;

        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
        let sorted_x: Vec<f64> = order.iter().map(|&i| xs[i]).collect();
        let sorted_y: Vec<u8> = order.iter().map(|&i| ys[i]).collect();

        let tree = MonotoneTree::new(&sorted_x, &sorted_y, increasing);
        let fitted = tree.grow(self.max_leaves, self.min_child_samples);
        vec![level_cuts(&fitted, &sorted_x, &sorted_y)]
    }
}

/// A leaf covering sorted rows `start..end`
#[derive(Debug, Clone, Copy)]
struct Leaf {
    start: usize,
    end: usize,
    lower: f64,
    upper: f64,
    output: f64,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    at: usize,
    gain: f64,
    left_output: f64,
    right_output: f64,
}

struct MonotoneTree<'a> {
    xs: &'a [f64],
    /// prefix sums of y and y^2 over the sorted rows
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
    increasing: bool,
}

impl<'a> MonotoneTree<'a> {
    fn new(xs: &'a [f64], ys: &[u8], increasing: bool) -> Self {
        let mut sum = Vec::with_capacity(ys.len() + 1);
        let mut sum_sq = Vec::with_capacity(ys.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);
        for &y in ys {
            let y = f64::from(y);
            sum.push(sum[sum.len() - 1] + y);
            sum_sq.push(sum_sq[sum_sq.len() - 1] + y * y);
        }
        Self {
            xs,
            sum,
            sum_sq,
            increasing,
        }
    }

    fn mean(&self, start: usize, end: usize) -> f64 {
        (self.sum[end] - self.sum[start]) / (end - start) as f64
    }

    /// Squared error of predicting `output` for rows `start..end`
    fn sse(&self, start: usize, end: usize, output: f64) -> f64 {
        let n = (end - start) as f64;
        let s = self.sum[end] - self.sum[start];
        let s2 = self.sum_sq[end] - self.sum_sq[start];
        s2 - 2.0 * output * s + n * output * output
    }

    fn best_split(&self, leaf: &Leaf, min_child: usize) -> Option<Split> {
        let min_child = min_child.max(1);
        if leaf.end - leaf.start < 2 * min_child {
            return None;
        }
        let parent = self.sse(leaf.start, leaf.end, leaf.output);

        let mut best: Option<Split> = None;
        for at in (leaf.start + min_child)..=(leaf.end - min_child) {
            // only split between distinct values
            if self.xs[at - 1] == self.xs[at] {
                continue;
            }
            let left_output = self.mean(leaf.start, at).clamp(leaf.lower, leaf.upper);
            let right_output = self.mean(at, leaf.end).clamp(leaf.lower, leaf.upper);

            let violates = if self.increasing {
                left_output > right_output
            } else {
                left_output < right_output
            };
            if violates {
                continue;
            }

            let gain = parent
                - self.sse(leaf.start, at, left_output)
                - self.sse(at, leaf.end, right_output);
            if gain > MIN_GAIN && best.map_or(true, |b| gain > b.gain) {
                best = Some(Split {
                    at,
                    gain,
                    left_output,
                    right_output,
                });
            }
        }
        best
    }

    /// Grow leaf-wise and return the fitted value of every sorted row.
    fn grow(&self, max_leaves: usize, min_child: usize) -> Vec<f64> {
        let n = self.xs.len();
        let root = Leaf {
            start: 0,
            end: n,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            output: self.mean(0, n),
        };
        let mut leaves = vec![(root, self.best_split(&root, min_child))];

        while leaves.len() < max_leaves.max(1) {
            let chosen = leaves
                .iter()
                .enumerate()
                .filter_map(|(idx, (_, split))| split.map(|s| (idx, s)))
                .fold(None, |acc: Option<(usize, Split)>, (idx, s)| match acc {
                    Some((_, best)) if best.gain >= s.gain => acc,
                    _ => Some((idx, s)),
                });
            let Some((idx, split)) = chosen else {
                break;
            };

            let (leaf, _) = leaves[idx];
            let mid = (split.left_output + split.right_output) / 2.0;
            let (left_bounds, right_bounds) = if self.increasing {
                ((leaf.lower, leaf.upper.min(mid)), (leaf.lower.max(mid), leaf.upper))
            } else {
                ((leaf.lower.max(mid), leaf.upper), (leaf.lower, leaf.upper.min(mid)))
            };

            let left = Leaf {
                start: leaf.start,
                end: split.at,
                lower: left_bounds.0,
                upper: left_bounds.1,
                output: split.left_output,
            };
            let right = Leaf {
                start: split.at,
                end: leaf.end,
                lower: right_bounds.0,
                upper: right_bounds.1,
                output: split.right_output,
            };
            trace!(
                at = self.xs[split.at - 1],
                gain = split.gain,
                "Tree: split leaf"
            );

            leaves[idx] = (left, self.best_split(&left, min_child));
            leaves.push((right, self.best_split(&right, min_child)));
        }

        let mut fitted = vec![0.0; n];
        for (leaf, _) in &leaves {
            fitted[leaf.start..leaf.end].fill(leaf.output);
        }
        fitted
    }
}
