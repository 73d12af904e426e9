//! Monotonic optimal binning engine
//!
//! Bins a numeric feature against a binary label so that the bad rate is
//! strictly monotonic across bins, then attaches WoE, IV, KS and a
//! membership rule to every bin.
//!
//! The pipeline is shared by every strategy:
//!
//! ```text
//! proposer -> fit/dedup candidates -> select_monotonic -> sort by rate
//!          -> merge_missing -> score_bins -> apply_rules -> BinningResult
//! ```
//!
//! Strategies only differ in the [`CandidateProposer`] they plug in.

pub mod apply;
pub mod error;
pub mod missing;
pub mod partition;
pub mod proposer;
pub mod quantile;
pub mod rules;
pub mod select;
pub mod stats;
pub mod types;

pub use apply::{apply_woe, WoeAssignment};
pub use error::{BinningError, Result};
pub use missing::{merge_missing, missing_bin, MissingPlacement};
pub use partition::{assign_bin, partition, summarize_bins};
pub use proposer::{
    BadRateQuantileProposer, BoostedTreeProposer, CandidateProposer, IsotonicProposer,
    KMeansProposer, QuantileProposer, RangeProposer,
};
pub use quantile::qcut;
pub use rules::{apply_rules, bin_rule};
pub use select::{select_monotonic, spearman, CandidateScore};
pub use stats::{score_bins, summarize, BinSummary};
pub use types::{Bin, BinningResult, CutSet, ScoredBin};

use serde::{Deserialize, Serialize};
use tracing::debug;

use types::Sample;

/// Tunables for the candidate proposers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningConfig {
    /// Upper bound on the number of quantile pieces tried
    pub max_quantile_bins: usize,
    /// Upper bound on the number of k-means clusters tried
    pub max_clusters: usize,
    /// Lloyd iterations per k-means run
    pub max_iterations: usize,
    /// Leaf cap for the monotone tree
    pub max_leaves: usize,
    /// Minimum rows per tree leaf
    pub min_child_samples: usize,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            max_quantile_bins: 50,
            max_clusters: 20,
            max_iterations: 100,
            max_leaves: 100,
            min_child_samples: 3,
        }
    }
}

/// How candidate cut sets are proposed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinningStrategy {
    /// Quantiles of the feature (default)
    #[default]
    Quantile,
    /// Quantiles of the feature among bad rows
    BadRate,
    /// Quantiles of the distinct values
    Range,
    /// One-dimensional k-means cluster edges
    KMeans,
    /// Steps of an isotonic regression fit
    Isotonic,
    /// Leaves of a monotone regression tree
    Gbm,
}

impl BinningStrategy {
    pub const ALL: [BinningStrategy; 6] = [
        BinningStrategy::Quantile,
        BinningStrategy::BadRate,
        BinningStrategy::Range,
        BinningStrategy::KMeans,
        BinningStrategy::Isotonic,
        BinningStrategy::Gbm,
    ];

    /// Build the proposer for this strategy.
    pub fn proposer(&self, config: &BinningConfig) -> Box<dyn CandidateProposer> {
        match self {
            BinningStrategy::Quantile => Box::new(QuantileProposer {
                max_bins: config.max_quantile_bins,
            }),
            BinningStrategy::BadRate => Box::new(BadRateQuantileProposer {
                max_bins: config.max_quantile_bins,
            }),
            BinningStrategy::Range => Box::new(RangeProposer {
                max_bins: config.max_quantile_bins,
            }),
            BinningStrategy::KMeans => Box::new(KMeansProposer {
                max_clusters: config.max_clusters,
                max_iterations: config.max_iterations,
            }),
            BinningStrategy::Isotonic => Box::new(IsotonicProposer),
            BinningStrategy::Gbm => Box::new(BoostedTreeProposer {
                max_leaves: config.max_leaves,
                min_child_samples: config.min_child_samples,
            }),
        }
    }
}

impl std::fmt::Display for BinningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinningStrategy::Quantile => write!(f, "quantile"),
            BinningStrategy::BadRate => write!(f, "bad"),
            BinningStrategy::Range => write!(f, "range"),
            BinningStrategy::KMeans => write!(f, "kmeans"),
            BinningStrategy::Isotonic => write!(f, "isotonic"),
            BinningStrategy::Gbm => write!(f, "gbm"),
        }
    }
}

impl std::str::FromStr for BinningStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quantile" | "qtl" => Ok(BinningStrategy::Quantile),
            "bad" | "badrate" => Ok(BinningStrategy::BadRate),
            "range" | "rng" | "equal-width" => Ok(BinningStrategy::Range),
            "kmeans" | "kmn" => Ok(BinningStrategy::KMeans),
            "isotonic" | "iso" => Ok(BinningStrategy::Isotonic),
            "gbm" | "tree" => Ok(BinningStrategy::Gbm),
            _ => Err(format!(
                "Unknown binning strategy: '{}'. Use 'quantile', 'bad', 'range', 'kmeans', 'isotonic' or 'gbm'.",
                s
            )),
        }
    }
}

/// Validate the sample ahead of candidate generation.
fn validated_sample(x: &[Option<f64>], y: &[u8]) -> Result<Sample> {
    let sample = Sample::from_pairs(x, y)?;

    if sample.xs.is_empty() {
        return Err(BinningError::EmptyInput);
    }

    let bads = sample.total_bads();
    let goods = sample.total_goods();
    if bads == 0 || goods == 0 {
        return Err(BinningError::DegenerateLabel { bads, goods });
    }

    let distinct = sample.distinct_count();
    if distinct < 2 {
        return Err(BinningError::InsufficientDistinctValues { distinct });
    }

    Ok(sample)
}

/// Fit every candidate to the data and drop duplicates, keeping the
/// first occurrence.
fn canonical_candidates(candidates: &[CutSet], sorted_x: &[f64]) -> Vec<CutSet> {
    let mut fitted: Vec<CutSet> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let cut = candidate.fit_to(sorted_x);
        if !fitted.contains(&cut) {
            fitted.push(cut);
        }
    }
    fitted
}

fn bin_sample(sample: &Sample, candidates: &[CutSet]) -> Result<BinningResult> {
    let candidates = canonical_candidates(candidates, &sample.sorted_x());
    let winner = select_monotonic(&candidates, &sample.xs, &sample.ys)?;

    let mut bins = winner.bins;
    missing::sort_by_rate(&mut bins);
    let merged = merge_missing(bins, missing_bin(&sample.missing));

    let mut tbl = score_bins(merged)?;
    apply_rules(&mut tbl, &winner.cut);

    Ok(BinningResult {
        cut: winner.cut,
        tbl,
    })
}

/// Bin `x` against `y` choosing among the given candidate cut sets.
///
/// `None` and NaN in `x` are missing values. Candidates are fitted to the
/// data (cuts closing empty bins are dropped) and deduplicated before
/// selection.
pub fn bin_with_candidates(
    x: &[Option<f64>],
    y: &[u8],
    candidates: &[CutSet],
) -> Result<BinningResult> {
    let sample = validated_sample(x, y)?;
    bin_sample(&sample, candidates)
}

/// Bin `x` against `y` with candidates from `proposer`.
pub fn bin_feature(
    x: &[Option<f64>],
    y: &[u8],
    proposer: &dyn CandidateProposer,
) -> Result<BinningResult> {
    let sample = validated_sample(x, y)?;
    let candidates = proposer.propose(&sample.xs, &sample.ys);
    debug!(
        proposer = proposer.name(),
        candidates = candidates.len(),
        missing = sample.missing.len(),
        "Binning: proposed candidate cut sets"
    );
    bin_sample(&sample, &candidates)
}

/// Bin `x` against `y` with a built-in strategy.
pub fn bin_with_strategy(
    x: &[Option<f64>],
    y: &[u8],
    strategy: BinningStrategy,
    config: &BinningConfig,
) -> Result<BinningResult> {
    let proposer = strategy.proposer(config);
    bin_feature(x, y, proposer.as_ref())
}
