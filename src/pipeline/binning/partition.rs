//! Assign observations to bins and aggregate them

use super::types::{Bin, CutSet};

/// Bin index of a non-missing value: one plus the number of cut points
/// strictly below it. A value equal to a cut point falls in the lower bin.
pub fn assign_bin(cut: &CutSet, value: f64) -> usize {
    cut.points().partition_point(|&c| c < value) + 1
}

/// Bin index of every value in `xs`.
pub fn partition(cut: &CutSet, xs: &[f64]) -> Vec<usize> {
    xs.iter().map(|&v| assign_bin(cut, v)).collect()
}

/// Aggregate `xs`/`ys` into one [`Bin`] per observed bin index, ordered
/// by index. Indices with no observations produce no record.
pub fn summarize_bins(cut: &CutSet, xs: &[f64], ys: &[u8]) -> Vec<Bin> {
    let mut slots: Vec<Bin> = (0..=cut.bin_count())
        .map(|bin| Bin {
            bin,
            freq: 0,
            miss: 0,
            bads: 0,
            minx: None,
            maxx: None,
        })
        .collect();

    for (&value, &label) in xs.iter().zip(ys.iter()) {
        let slot = &mut slots[assign_bin(cut, value)];
        slot.freq += 1;
        slot.bads += usize::from(label);
        slot.minx = Some(slot.minx.map_or(value, |m| m.min(value)));
        slot.maxx = Some(slot.maxx.map_or(value, |m| m.max(value)));
    }

    slots.into_iter().filter(|b| b.freq > 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_bin_ties_go_low() {
        let cut = CutSet::new(vec![2.0, 5.0]);
        assert_eq!(assign_bin(&cut, 1.0), 1);
        assert_eq!(assign_bin(&cut, 2.0), 1);
        assert_eq!(assign_bin(&cut, 2.5), 2);
        assert_eq!(assign_bin(&cut, 5.0), 2);
        assert_eq!(assign_bin(&cut, 5.1), 3);
    }

    #[test]
    fn test_assign_bin_without_cuts() {
        assert_eq!(assign_bin(&CutSet::default(), -1e300), 1);
    }

    #[test]
    fn test_summarize_bins_aggregates() {
        let cut = CutSet::new(vec![650.0, 700.0]);
        let xs = [600.0, 650.0, 651.0, 700.0, 720.0, 800.0];
        let ys = [1, 1, 0, 1, 0, 0];
        let bins = summarize_bins(&cut, &xs, &ys);

        assert_eq!(bins.len(), 3);
        assert_eq!((bins[0].bin, bins[0].freq, bins[0].bads), (1, 2, 2));
        assert_eq!((bins[1].bin, bins[1].freq, bins[1].bads), (2, 2, 1));
        assert_eq!((bins[2].bin, bins[2].freq, bins[2].bads), (3, 2, 0));
        assert_eq!(bins[1].minx, Some(651.0));
        assert_eq!(bins[1].maxx, Some(700.0));
        assert!(bins.iter().all(|b| b.miss == 0));
    }

    #[test]
    fn test_summarize_bins_skips_empty_indices() {
        let cut = CutSet::new(vec![1.0, 2.0]);
        let bins = summarize_bins(&cut, &[0.5, 3.0], &[0, 1]);
        let indices: Vec<usize> = bins.iter().map(|b| b.bin).collect();
        assert_eq!(indices, vec![1, 3]);
    }
}
