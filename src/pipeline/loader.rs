//! Dataset loading and column extraction for CSV and Parquet files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::utils::{create_spinner, finish_with_success};

/// Load a dataset lazily (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = file_extension(path);

    let lf = match extension.as_str() {
        "csv" => {
            // 0 means a full table scan
            let schema_rows = (infer_schema_length > 0).then_some(infer_schema_length);
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_rows)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Load and collect a dataset behind a spinner.
///
/// Returns the frame with its row count, column count and estimated size
/// in MB.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let df = load_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    finish_with_success(&spinner, &format!("Loaded {} rows", rows));
    Ok((df, rows, cols, memory_mb))
}

/// Column names of a dataset without reading its rows
pub fn get_column_names(path: &Path, infer_schema_length: usize) -> Result<Vec<String>> {
    let mut lf = load_dataset(path, infer_schema_length)?;
    let schema = lf
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Validate that the target column is binary and return its labels.
///
/// Integer and float columns are both accepted as long as every non-null
/// value is 0 or 1. Null targets are returned as `None`; those rows are
/// left out of binning.
pub fn target_labels(df: &DataFrame, target: &str) -> Result<Vec<Option<u8>>> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    if target_col.len() == 0 {
        anyhow::bail!("Target column '{}' is empty", target);
    }
    if target_col.null_count() == target_col.len() {
        anyhow::bail!("Target column '{}' contains only null values", target);
    }

    let float_col = target_col
        .cast(&DataType::Float64)
        .with_context(|| format!("Target column '{}' is not numeric", target))?;

    // tolerance for 0.0/1.0 read back from floats
    const TOLERANCE: f64 = 1e-9;
    let mut labels = Vec::with_capacity(float_col.len());
    for value in float_col.f64()?.into_iter() {
        let label = match value {
            None => None,
            Some(v) if v.abs() < TOLERANCE => Some(0),
            Some(v) if (v - 1.0).abs() < TOLERANCE => Some(1),
            Some(v) => anyhow::bail!(
                "Target column '{}' must be binary (0/1). Found value: {}",
                target,
                v
            ),
        };
        labels.push(label);
    }

    Ok(labels)
}

/// Numeric columns to bin.
///
/// With an empty `requested` list every numeric column except the target
/// is returned. Otherwise each requested column must exist and be numeric.
pub fn numeric_features(df: &DataFrame, target: &str, requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(df
            .get_columns()
            .iter()
            .filter(|col| col.dtype().is_primitive_numeric() && col.name() != target)
            .map(|col| col.name().to_string())
            .collect());
    }

    requested
        .iter()
        .map(|name| {
            let col = df
                .column(name)
                .with_context(|| format!("Feature column '{}' not found", name))?;
            if !col.dtype().is_primitive_numeric() {
                anyhow::bail!(
                    "Feature column '{}' is not numeric (found {})",
                    name,
                    col.dtype()
                );
            }
            if name == target {
                anyhow::bail!("Feature column '{}' is the target", name);
            }
            Ok(name.clone())
        })
        .collect()
}

/// Values of a feature column as `Option<f64>`; nulls become `None`.
pub fn feature_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(column)
        .with_context(|| format!("Column '{}' not found", column))?;
    let float_col = col
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as numbers", column))?;
    Ok(float_col.f64()?.into_iter().collect())
}

/// Feature values paired with labels, skipping rows whose label is null
pub fn labeled_feature(
    df: &DataFrame,
    column: &str,
    labels: &[Option<u8>],
) -> Result<(Vec<Option<f64>>, Vec<u8>)> {
    let values = feature_values(df, column)?;
    Ok(values
        .into_iter()
        .zip(labels.iter())
        .filter_map(|(x, y)| y.map(|y| (x, y)))
        .unzip())
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = file_extension(path);

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
