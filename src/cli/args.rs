//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::BinningStrategy;

/// mobin - Monotonic optimal binning with WoE/IV statistics
#[derive(Parser, Debug)]
#[command(name = "mobin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Binary target column name (values 0/1)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Features to bin (comma-separated). Defaults to every numeric column
    /// except the target.
    #[arg(short, long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Binning strategy.
    /// Options: "quantile" (default), "bad", "range", "kmeans", "isotonic", "gbm"
    #[arg(short, long, default_value = "quantile")]
    pub strategy: BinningStrategy,

    /// Print the bin table of every binned feature
    #[arg(long, default_value = "false")]
    pub show_bins: bool,

    /// Write results to this JSON file for later use with `mobin transform`
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Maximum number of quantile pieces tried (quantile, bad and range strategies)
    #[arg(long, default_value = "50", value_parser = validate_piece_cap)]
    pub max_bins: usize,

    /// Maximum number of clusters tried (kmeans strategy)
    #[arg(long, default_value = "20", value_parser = validate_piece_cap)]
    pub max_clusters: usize,

    /// Minimum rows per leaf (gbm strategy)
    #[arg(long, default_value = "3", value_parser = validate_min_child_samples)]
    pub min_child_samples: usize,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Enable debug diagnostics on stderr (overridden by RUST_LOG)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append woe_<feature> columns to a dataset using exported bins
    Transform {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Binning results written with --export
        #[arg(short, long)]
        bins: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to the input directory with a '_woe' suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of rows to use for schema inference (CSV only)
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }
}

/// Output path for the transform command, derived from the input when not
/// given: same directory, '_woe' suffix, same extension.
pub fn transform_output_path(input: &std::path::Path, output: Option<&std::path::Path>) -> PathBuf {
    if let Some(output) = output {
        return output.to_path_buf();
    }
    let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("parquet");
    parent.join(format!("{}_woe.{}", stem, extension))
}

/// Validator for piece-count caps
fn validate_piece_cap(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value < 3 {
        Err(format!("piece cap must be at least 3, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for min_child_samples parameter
fn validate_min_child_samples(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value == 0 {
        Err("min_child_samples must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_piece_cap() {
        assert_eq!(validate_piece_cap("50"), Ok(50));
        assert!(validate_piece_cap("2").is_err());
        assert!(validate_piece_cap("abc").is_err());
    }

    #[test]
    fn test_validate_min_child_samples() {
        assert_eq!(validate_min_child_samples("3"), Ok(3));
        assert!(validate_min_child_samples("0").is_err());
    }

    #[test]
    fn test_transform_output_path() {
        let input = std::path::Path::new("/data/app.csv");
        assert_eq!(
            transform_output_path(input, None),
            PathBuf::from("/data/app_woe.csv")
        );
        assert_eq!(
            transform_output_path(input, Some(std::path::Path::new("out.parquet"))),
            PathBuf::from("out.parquet")
        );
    }
}
