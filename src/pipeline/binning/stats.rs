//! Weight of Evidence, Information Value and KS statistics per bin
//!
//! Uses the ln(%bad/%good) convention: WoE > 0 marks a bin riskier than
//! the sample as a whole. Totals are taken over the full sample, missing
//! values included.

use serde::{Deserialize, Serialize};

use super::error::{BinningError, Result};
use super::types::{Bin, BinningResult, ScoredBin};

/// Decimals kept for rate, WoE and IV
pub const STAT_DECIMALS: i32 = 4;

/// Decimals kept for KS
pub const KS_DECIMALS: i32 = 2;

/// Round half away from zero to `decimals` places.
///
/// Ties are decided on the scaled value, so a last digit can differ from
/// round-half-even on the binary value.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Score bins with rate, WoE, IV and KS.
///
/// Bins are ordered by bin index and KS accumulates in that order, so the
/// last bin always reports a KS of 0. Rules are left empty for
/// [`super::rules::apply_rules`] to fill.
pub fn score_bins(mut bins: Vec<Bin>) -> Result<Vec<ScoredBin>> {
    let total_bads: usize = bins.iter().map(|b| b.bads).sum();
    let total_freq: usize = bins.iter().map(|b| b.freq).sum();
    let total_goods = total_freq - total_bads;

    if total_bads == 0 || total_goods == 0 {
        return Err(BinningError::DegenerateLabel {
            bads: total_bads,
            goods: total_goods,
        });
    }

    bins.sort_by_key(|b| b.bin);

    let mut cum_bads = 0.0;
    let mut cum_goods = 0.0;
    let mut scored = Vec::with_capacity(bins.len());

    for bin in bins {
        if bin.bads == 0 || bin.goods() == 0 {
            return Err(BinningError::DegenerateBin { bin: bin.bin });
        }

        let dist_bads = bin.bads as f64 / total_bads as f64;
        let dist_goods = bin.goods() as f64 / total_goods as f64;
        let woe = (dist_bads / dist_goods).ln();
        let iv = (dist_bads - dist_goods) * woe;

        cum_bads += dist_bads;
        cum_goods += dist_goods;
        let ks = (cum_bads - cum_goods).abs() * 100.0;

        scored.push(ScoredBin {
            rate: round_to(bin.rate(), STAT_DECIMALS),
            woe: round_to(woe, STAT_DECIMALS),
            iv: round_to(iv, STAT_DECIMALS),
            ks: round_to(ks, KS_DECIMALS),
            rule: String::new(),
            bin: bin.bin,
            freq: bin.freq,
            miss: bin.miss,
            bads: bin.bads,
            minx: bin.minx,
            maxx: bin.maxx,
        });
    }

    Ok(scored)
}

/// Feature-level statistics derived from a binning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSummary {
    pub sample_size: usize,
    pub bad_rate: f64,
    pub iv: f64,
    /// Maximum KS across bins
    pub ks: f64,
    pub missing_rate: f64,
}

/// Summarize a binning result into sample size, bad rate, IV, KS and
/// missing rate.
pub fn summarize(result: &BinningResult) -> BinSummary {
    let freq: usize = result.tbl.iter().map(|b| b.freq).sum();
    let bads: usize = result.tbl.iter().map(|b| b.bads).sum();
    let miss: usize = result.tbl.iter().map(|b| b.miss).sum();

    let iv = round_to(result.tbl.iter().map(|b| b.iv).sum(), STAT_DECIMALS);
    let ks = round_to(
        result.tbl.iter().map(|b| b.ks).fold(0.0, f64::max),
        KS_DECIMALS,
    );

    let (bad_rate, missing_rate) = if freq > 0 {
        (
            round_to(bads as f64 / freq as f64, STAT_DECIMALS),
            round_to(miss as f64 / freq as f64, STAT_DECIMALS),
        )
    } else {
        (0.0, 0.0)
    };

    BinSummary {
        sample_size: freq,
        bad_rate,
        iv,
        ks,
        missing_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::binning::types::CutSet;

    fn bin(bin: usize, freq: usize, miss: usize, bads: usize) -> Bin {
        Bin {
            bin,
            freq,
            miss,
            bads,
            minx: None,
            maxx: None,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(-0.55559, 4), -0.5556);
        assert_eq!(round_to(20.044, 2), 20.04);
    }

    #[test]
    fn test_score_bins_matches_formulas() {
        let bins = vec![bin(1, 100, 0, 10), bin(2, 100, 0, 30)];
        let scored = score_bins(bins).unwrap();

        // bin 1: %bad = 10/40, %good = 90/160
        let woe1 = (0.25f64 / 0.5625).ln();
        let iv1 = (0.25 - 0.5625) * woe1;
        assert_eq!(scored[0].rate, 0.1);
        assert_eq!(scored[0].woe, round_to(woe1, 4));
        assert_eq!(scored[0].iv, round_to(iv1, 4));
        assert_eq!(scored[0].ks, round_to((0.25f64 - 0.5625).abs() * 100.0, 2));

        assert!(scored[0].woe < 0.0);
        assert!(scored[1].woe > 0.0);
        assert_eq!(scored[1].ks, 0.0);
    }

    #[test]
    fn test_score_bins_orders_by_index() {
        let bins = vec![bin(2, 50, 0, 40), bin(0, 10, 10, 5), bin(1, 50, 0, 5)];
        let scored = score_bins(bins).unwrap();
        let order: Vec<usize> = scored.iter().map(|b| b.bin).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(scored.last().unwrap().ks, 0.0);
    }

    #[test]
    fn test_score_bins_rejects_degenerate_label() {
        let err = score_bins(vec![bin(1, 5, 0, 0), bin(2, 5, 0, 0)]).unwrap_err();
        assert_eq!(err, BinningError::DegenerateLabel { bads: 0, goods: 10 });
    }

    #[test]
    fn test_score_bins_rejects_pure_bin() {
        // x = 1..10, y = 0 x5 then 1 x5, cut at 5: bin 1 has no bads
        let err = score_bins(vec![bin(1, 5, 0, 0), bin(2, 5, 0, 5)]).unwrap_err();
        assert_eq!(err, BinningError::DegenerateBin { bin: 1 });
    }

    #[test]
    fn test_iv_is_non_negative() {
        let scored = score_bins(vec![bin(1, 30, 0, 3), bin(2, 40, 0, 10), bin(3, 30, 0, 20)])
            .unwrap();
        assert!(scored.iter().all(|b| b.iv >= 0.0));
    }

    #[test]
    fn test_summarize() {
        let tbl = score_bins(vec![bin(0, 10, 10, 5), bin(1, 50, 0, 5), bin(2, 40, 0, 20)])
            .unwrap();
        let expected_ks = tbl.iter().map(|b| b.ks).fold(0.0, f64::max);
        let result = BinningResult {
            cut: CutSet::new(vec![3.0]),
            tbl,
        };

        let summary = summarize(&result);
        assert_eq!(summary.sample_size, 100);
        assert_eq!(summary.bad_rate, 0.3);
        assert_eq!(summary.missing_rate, 0.1);
        assert_eq!(summary.ks, expected_ks);
        assert!(summary.iv > 0.0);
    }
}
