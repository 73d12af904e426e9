//! Bin every selected feature of a dataset in parallel

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use indicatif::ProgressBar;
use polars::prelude::*;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::binning::{bin_with_strategy, BinningConfig, BinningError, BinningResult, BinningStrategy};
use super::loader::{labeled_feature, target_labels};
use crate::utils::create_progress_bar;

/// Binning outcome of one dataset column
#[derive(Debug, Clone)]
pub struct FeatureOutcome {
    pub feature: String,
    pub result: std::result::Result<BinningResult, BinningError>,
}

impl FeatureOutcome {
    pub fn is_binned(&self) -> bool {
        self.result.is_ok()
    }

    /// Total IV, 0 for a failed feature
    pub fn iv(&self) -> f64 {
        self.result.as_ref().map_or(0.0, BinningResult::total_iv)
    }
}

/// Bin `features` of `df` against the binary `target`.
///
/// Features are binned in parallel. A feature that cannot be binned is
/// returned with its error rather than aborting the run; outcomes come
/// back sorted by IV descending with failures last.
pub fn bin_features(
    df: &DataFrame,
    target: &str,
    features: &[String],
    strategy: BinningStrategy,
    config: &BinningConfig,
) -> Result<Vec<FeatureOutcome>> {
    let labels = target_labels(df, target)?;

    let pb = create_progress_bar(features.len() as u64, "   Binning");
    let progress_counter = AtomicU64::new(0);

    let outcomes: Result<Vec<FeatureOutcome>> = features
        .par_iter()
        .map(|feature| {
            let (x, y) = labeled_feature(df, feature, &labels)?;
            let result = bin_with_strategy(&x, &y, strategy, config);
            match &result {
                Ok(binned) => debug!(
                    feature = feature.as_str(),
                    bins = binned.tbl.len(),
                    iv = binned.total_iv(),
                    "Features: binned"
                ),
                Err(err) => warn!(feature = feature.as_str(), error = %err, "Features: binning failed"),
            }

            tick(&pb, &progress_counter);
            Ok(FeatureOutcome {
                feature: feature.clone(),
                result,
            })
        })
        .collect();
    pb.finish_and_clear();

    let mut outcomes = outcomes?;
    outcomes.sort_by(|a, b| {
        b.is_binned()
            .cmp(&a.is_binned())
            .then_with(|| b.iv().total_cmp(&a.iv()))
            .then_with(|| a.feature.cmp(&b.feature))
    });
    Ok(outcomes)
}

fn tick(pb: &ProgressBar, counter: &AtomicU64) {
    let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
    pb.set_position(done);
}
