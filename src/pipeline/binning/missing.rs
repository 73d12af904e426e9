//! Missing-value bin construction and merge policy

use serde::Serialize;
use tracing::debug;

use super::types::{count_bads, Bin};

/// Where the missing-value aggregate ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissingPlacement {
    /// No missing values in the sample
    Absent,
    /// All missing rows are good: folded into the lowest bad-rate bin
    LowestRate,
    /// All missing rows are bad: folded into the highest bad-rate bin
    HighestRate,
    /// Mixed labels: kept as bin 0
    Standalone,
}

/// Aggregate the labels of missing rows into bin 0.
pub fn missing_bin(labels: &[u8]) -> Option<Bin> {
    if labels.is_empty() {
        return None;
    }
    Some(Bin {
        bin: 0,
        freq: labels.len(),
        miss: labels.len(),
        bads: count_bads(labels),
        minx: None,
        maxx: None,
    })
}

pub fn missing_placement(missing: Option<&Bin>) -> MissingPlacement {
    match missing {
        None => MissingPlacement::Absent,
        Some(m) if m.bads == 0 => MissingPlacement::LowestRate,
        Some(m) if m.bads == m.freq => MissingPlacement::HighestRate,
        Some(_) => MissingPlacement::Standalone,
    }
}

/// Sort bins by ascending bad rate.
pub fn sort_by_rate(bins: &mut [Bin]) {
    bins.sort_by(|a, b| a.rate().total_cmp(&b.rate()));
}

fn absorb(target: &mut Bin, missing: &Bin) {
    target.freq += missing.freq;
    target.miss += missing.miss;
    target.bads += missing.bads;
}

/// Merge the missing aggregate into a bin list sorted by ascending bad rate.
///
/// A pure-good aggregate joins the first (lowest rate) bin and a pure-bad
/// one joins the last. Anything else stays as a standalone bin 0,
/// prepended to the list.
pub fn merge_missing(mut rate_sorted: Vec<Bin>, missing: Option<Bin>) -> Vec<Bin> {
    let placement = missing_placement(missing.as_ref());
    let Some(missing) = missing else {
        return rate_sorted;
    };

    debug!(
        freq = missing.freq,
        bads = missing.bads,
        placement = ?placement,
        "Binning: placed missing values"
    );

    match placement {
        MissingPlacement::LowestRate if !rate_sorted.is_empty() => {
            absorb(&mut rate_sorted[0], &missing);
        }
        MissingPlacement::HighestRate if !rate_sorted.is_empty() => {
            let last = rate_sorted.len() - 1;
            absorb(&mut rate_sorted[last], &missing);
        }
        _ => rate_sorted.insert(0, missing),
    }
    rate_sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(bin: usize, freq: usize, bads: usize) -> Bin {
        Bin {
            bin,
            freq,
            miss: 0,
            bads,
            minx: Some(bin as f64),
            maxx: Some(bin as f64),
        }
    }

    #[test]
    fn test_missing_bin() {
        assert!(missing_bin(&[]).is_none());
        let m = missing_bin(&[1, 0, 1]).unwrap();
        assert_eq!((m.bin, m.freq, m.miss, m.bads), (0, 3, 3, 2));
        assert_eq!(m.minx, None);
    }

    #[test]
    fn test_all_good_missing_joins_lowest_rate() {
        let mut bins = vec![bin(1, 10, 8), bin(2, 10, 2)];
        sort_by_rate(&mut bins);
        let merged = merge_missing(bins, missing_bin(&[0, 0]));

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].bin, 2);
        assert_eq!((merged[0].freq, merged[0].miss, merged[0].bads), (12, 2, 2));
    }

    #[test]
    fn test_all_bad_missing_joins_highest_rate() {
        let mut bins = vec![bin(1, 10, 2), bin(2, 10, 8)];
        sort_by_rate(&mut bins);
        let merged = merge_missing(bins, missing_bin(&[1]));

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].bin, 2);
        assert_eq!((merged[1].freq, merged[1].miss, merged[1].bads), (11, 1, 9));
    }

    #[test]
    fn test_mixed_missing_is_prepended() {
        let bins = vec![bin(1, 10, 2), bin(2, 10, 8)];
        let merged = merge_missing(bins, missing_bin(&[1, 0]));

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].bin, 0);
        assert_eq!(
            missing_placement(Some(&merged[0])),
            MissingPlacement::Standalone
        );
    }

    #[test]
    fn test_no_missing_is_noop() {
        let bins = vec![bin(1, 10, 2)];
        assert_eq!(merge_missing(bins.clone(), None), bins);
        assert_eq!(missing_placement(None), MissingPlacement::Absent);
    }
}
