//! Record types shared by every stage of the binning engine

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::error::{BinningError, Result};

/// An ordered set of finite cut points, strictly increasing.
///
/// The cut points are the inclusive upper bounds of bins `1..k-1`; bin `k`
/// is open to `+∞`. A set of `k - 1` points therefore describes `k` bins.
/// Deserialized cut sets go through [`CutSet::new`] as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>")]
pub struct CutSet(Vec<f64>);

impl CutSet {
    /// Build a cut set, sorting the points and dropping duplicates and
    /// non-finite values.
    pub fn new(points: impl IntoIterator<Item = f64>) -> Self {
        let mut points: Vec<f64> = points.into_iter().filter(|p| p.is_finite()).collect();
        points.sort_by(|a, b| a.total_cmp(b));
        points.dedup();
        Self(points)
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bins this cut set describes over non-missing values.
    pub fn bin_count(&self) -> usize {
        self.0.len() + 1
    }

    /// Canonicalize against training data sorted ascending.
    ///
    /// Drops every cut point that would close an empty bin and every cut
    /// point at or above the maximum, so the result of length `k - 1`
    /// yields exactly `k` non-empty bins on `sorted_x`.
    pub fn fit_to(&self, sorted_x: &[f64]) -> Self {
        let Some(&max) = sorted_x.last() else {
            return Self::default();
        };

        let mut kept = Vec::with_capacity(self.0.len());
        let mut lower = f64::NEG_INFINITY;
        for &cut in &self.0 {
            if cut >= max {
                break;
            }
            let first_above = sorted_x.partition_point(|&v| v <= lower);
            if first_above < sorted_x.len() && sorted_x[first_above] <= cut {
                kept.push(cut);
                lower = cut;
            }
        }
        Self(kept)
    }

    /// Lexicographic order over the cut points, shorter prefix first.
    pub fn lexicographic_cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl From<Vec<f64>> for CutSet {
    fn from(points: Vec<f64>) -> Self {
        Self::new(points)
    }
}

/// Aggregate of the observations falling into one bin.
///
/// Bin 0 is the missing-value bin; bins `1..k` are the ordered
/// non-missing bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub bin: usize,
    pub freq: usize,
    /// Missing observations folded into this bin
    pub miss: usize,
    /// Observations with y = 1
    pub bads: usize,
    /// Smallest non-missing x; `None` for a pure-missing bin
    pub minx: Option<f64>,
    /// Largest non-missing x; `None` for a pure-missing bin
    pub maxx: Option<f64>,
}

impl Bin {
    pub fn goods(&self) -> usize {
        self.freq - self.bads
    }

    /// Bad rate (mean label) of the bin
    pub fn rate(&self) -> f64 {
        if self.freq == 0 {
            return 0.0;
        }
        self.bads as f64 / self.freq as f64
    }
}

/// A bin annotated with rate, WoE, IV, KS and its membership rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBin {
    pub bin: usize,
    pub freq: usize,
    pub miss: usize,
    pub bads: usize,
    pub minx: Option<f64>,
    pub maxx: Option<f64>,
    /// bads / freq, 4 decimals
    pub rate: f64,
    /// ln(%bads / %goods), 4 decimals
    pub woe: f64,
    /// (%bads - %goods) * woe, 4 decimals
    pub iv: f64,
    /// Cumulative |bad capture - good capture| * 100 up to this bin, 2 decimals
    pub ks: f64,
    pub rule: String,
}

/// The outcome of binning one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningResult {
    /// Boundaries of the non-missing bins
    pub cut: CutSet,
    /// Scored bins ordered by bin index (missing bin first when present)
    pub tbl: Vec<ScoredBin>,
}

impl BinningResult {
    /// Total information value across all bins
    pub fn total_iv(&self) -> f64 {
        self.tbl.iter().map(|b| b.iv).sum()
    }

    /// Whether the missing values were kept as a standalone bin 0
    pub fn has_missing_bin(&self) -> bool {
        self.tbl.iter().any(|b| b.bin == 0)
    }
}

/// Whether a raw feature value counts as missing.
pub fn is_missing(value: Option<f64>) -> bool {
    value.map_or(true, f64::is_nan)
}

/// A validated feature/label sample split into its non-missing and
/// missing parts.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    /// Non-missing feature values, in input order
    pub xs: Vec<f64>,
    /// Labels paired with `xs`
    pub ys: Vec<u8>,
    /// Labels of the rows whose feature value is missing
    pub missing: Vec<u8>,
}

impl Sample {
    /// Validate lengths and label values, then split off missing rows.
    pub fn from_pairs(x: &[Option<f64>], y: &[u8]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(BinningError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        let mut sample = Self::default();
        for (index, (&value, &label)) in x.iter().zip(y.iter()).enumerate() {
            if label > 1 {
                return Err(BinningError::NonBinaryLabel {
                    index,
                    value: label,
                });
            }
            match value {
                Some(v) if !v.is_nan() => {
                    sample.xs.push(v);
                    sample.ys.push(label);
                }
                _ => sample.missing.push(label),
            }
        }
        Ok(sample)
    }

    pub fn len(&self) -> usize {
        self.xs.len() + self.missing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of y = 1 over the whole sample, missing rows included
    pub fn total_bads(&self) -> usize {
        count_bads(&self.ys) + count_bads(&self.missing)
    }

    pub fn total_goods(&self) -> usize {
        self.len() - self.total_bads()
    }

    /// Non-missing values sorted ascending
    pub fn sorted_x(&self) -> Vec<f64> {
        let mut sorted = self.xs.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    pub fn distinct_count(&self) -> usize {
        let mut sorted = self.sorted_x();
        sorted.dedup();
        sorted.len()
    }
}

pub(crate) fn count_bads(labels: &[u8]) -> usize {
    labels.iter().filter(|&&y| y == 1).count()
}
