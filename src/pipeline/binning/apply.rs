//! Weight of Evidence lookup for new data

use serde::{Deserialize, Serialize};

use super::error::{BinningError, Result};
use super::partition::assign_bin;
use super::types::{is_missing, BinningResult};

/// Bin and WoE assigned to one input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoeAssignment {
    pub x: Option<f64>,
    pub bin: usize,
    pub woe: f64,
}

/// Map every value of `x` to its bin and WoE under `result`.
///
/// Non-missing values go through the same partitioning as training.
/// Missing values take the bin that absorbed missing rows during
/// training; when training saw no missing values they get bin 0 with a
/// neutral WoE of 0.
pub fn apply_woe(x: &[Option<f64>], result: &BinningResult) -> Result<Vec<WoeAssignment>> {
    let max_bin = result.tbl.iter().map(|b| b.bin).max().unwrap_or(0);
    let mut woe_by_bin: Vec<Option<f64>> = vec![None; max_bin + 1];
    for bin in &result.tbl {
        woe_by_bin[bin.bin] = Some(bin.woe);
    }

    let missing_target = result
        .tbl
        .iter()
        .find(|b| b.miss > 0)
        .map_or((0, 0.0), |b| (b.bin, b.woe));

    x.iter()
        .map(|&value| {
            if is_missing(value) {
                let (bin, woe) = missing_target;
                return Ok(WoeAssignment { x: value, bin, woe });
            }

            let bin = value.map_or(0, |v| assign_bin(&result.cut, v));
            let woe = woe_by_bin
                .get(bin)
                .copied()
                .flatten()
                .ok_or(BinningError::UnknownBin { bin })?;
            Ok(WoeAssignment { x: value, bin, woe })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::binning::types::{CutSet, ScoredBin};

    fn scored(bin: usize, miss: usize, woe: f64) -> ScoredBin {
        ScoredBin {
            bin,
            freq: 10,
            miss,
            bads: 5,
            minx: None,
            maxx: None,
            rate: 0.5,
            woe,
            iv: 0.0,
            ks: 0.0,
            rule: String::new(),
        }
    }

    #[test]
    fn test_apply_woe_with_standalone_missing() {
        let result = BinningResult {
            cut: CutSet::new(vec![5.0]),
            tbl: vec![scored(0, 3, 0.7), scored(1, 0, -0.5), scored(2, 0, 0.4)],
        };
        let out = apply_woe(&[Some(1.0), Some(5.0), Some(6.0), None], &result).unwrap();
        let pairs: Vec<(usize, f64)> = out.iter().map(|a| (a.bin, a.woe)).collect();
        assert_eq!(pairs, vec![(1, -0.5), (1, -0.5), (2, 0.4), (0, 0.7)]);
    }

    #[test]
    fn test_apply_woe_with_merged_missing() {
        let result = BinningResult {
            cut: CutSet::new(vec![5.0]),
            tbl: vec![scored(1, 0, -0.5), scored(2, 2, 0.4)],
        };
        let out = apply_woe(&[None, Some(f64::NAN)], &result).unwrap();
        assert!(out.iter().all(|a| a.bin == 2 && a.woe == 0.4));
    }

    #[test]
    fn test_apply_woe_unseen_missing_is_neutral() {
        let result = BinningResult {
            cut: CutSet::new(vec![5.0]),
            tbl: vec![scored(1, 0, -0.5), scored(2, 0, 0.4)],
        };
        let out = apply_woe(&[None], &result).unwrap();
        assert_eq!((out[0].bin, out[0].woe), (0, 0.0));
    }

    #[test]
    fn test_apply_woe_unknown_bin() {
        let result = BinningResult {
            cut: CutSet::new(vec![5.0]),
            tbl: vec![scored(1, 0, -0.5)],
        };
        let err = apply_woe(&[Some(9.0)], &result).unwrap_err();
        assert_eq!(err, BinningError::UnknownBin { bin: 2 });
    }
}
