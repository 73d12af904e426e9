//! Quantile cut points

use super::types::CutSet;

/// Cut points dividing `x` into `n` pieces by quantile.
///
/// Takes the percentiles `100 * i / n` for `i = 1..n` with "lower"
/// interpolation, i.e. the sorted element at index `floor(i * (N - 1) / n)`,
/// and drops duplicates. Non-finite values in `x` are ignored.
pub fn qcut(x: &[f64], n: usize) -> CutSet {
    let mut sorted: Vec<f64> = x.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() || n < 2 {
        return CutSet::default();
    }
    sorted.sort_by(|a, b| a.total_cmp(b));

    let last = sorted.len() - 1;
    CutSet::new((1..n).map(|i| sorted[i * last / n]))
}
