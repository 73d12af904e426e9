//! JSON export and reload of binning results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::pipeline::binning::{summarize, BinSummary, BinningConfig, BinningResult, BinningStrategy};
use crate::pipeline::FeatureOutcome;

/// Metadata about the binning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub mobin_version: String,
    pub input_file: String,
    pub target_column: String,
    pub binning_strategy: BinningStrategy,
    pub config: BinningConfig,
}

/// Aggregate numbers over all features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSummary {
    pub total_features: usize,
    pub features_binned: usize,
    pub features_failed: usize,
    /// Average IV over binned features
    pub avg_iv: f64,
}

/// One feature: its result and summary, or the reason it failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureExport {
    pub feature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<BinSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<BinningResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Complete export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinningExport {
    pub metadata: ExportMetadata,
    pub summary: ExportSummary,
    pub features: Vec<FeatureExport>,
}

impl BinningExport {
    /// Build an export from the outcomes of a run.
    pub fn new(
        outcomes: &[FeatureOutcome],
        input_file: &str,
        target_column: &str,
        strategy: BinningStrategy,
        config: &BinningConfig,
    ) -> Self {
        let features: Vec<FeatureExport> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(result) => FeatureExport {
                    feature: outcome.feature.clone(),
                    summary: Some(summarize(result)),
                    result: Some(result.clone()),
                    error: None,
                },
                Err(err) => FeatureExport {
                    feature: outcome.feature.clone(),
                    summary: None,
                    result: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        let binned: Vec<&BinningResult> = features.iter().filter_map(|f| f.result.as_ref()).collect();
        let avg_iv = if binned.is_empty() {
            0.0
        } else {
            binned.iter().map(|r| r.total_iv()).sum::<f64>() / binned.len() as f64
        };

        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                mobin_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                target_column: target_column.to_string(),
                binning_strategy: strategy,
                config: config.clone(),
            },
            summary: ExportSummary {
                total_features: features.len(),
                features_binned: binned.len(),
                features_failed: features.len() - binned.len(),
                avg_iv,
            },
            features,
        }
    }

    /// `(feature, result)` pairs of the successfully binned features
    pub fn binned(&self) -> Vec<(String, BinningResult)> {
        self.features
            .iter()
            .filter_map(|f| f.result.clone().map(|r| (f.feature.clone(), r)))
            .collect()
    }
}

/// Write an export as pretty-printed JSON
pub fn write_export(export: &BinningExport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(export)
        .context("Failed to serialize binning results to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write binning results to {}", output_path.display()))?;

    Ok(())
}

/// Read an export written by [`write_export`]
pub fn read_export(path: &Path) -> Result<BinningExport> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read binning results from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid binning results file: {}", path.display()))
}
