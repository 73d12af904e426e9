//! Shared test utilities and fixture generators

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Feature/label pair where the bad rate rises with every level.
///
/// Level `v` (1-based) holds `rows_per_level` rows and `v` bads, so
/// `rows_per_level` must exceed `levels`.
pub fn rising_sample(levels: u32, rows_per_level: u32) -> (Vec<Option<f64>>, Vec<u8>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for v in 1..=levels {
        for i in 0..rows_per_level {
            x.push(Some(f64::from(v)));
            y.push(u8::from(i < v));
        }
    }
    (x, y)
}

/// Noisy sample whose bad probability rises linearly with x in [0, 100)
pub fn noisy_monotone_sample(rows: usize, seed: u64) -> (Vec<Option<f64>>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Vec::with_capacity(rows);
    let mut y = Vec::with_capacity(rows);
    for _ in 0..rows {
        let value: f64 = (rng.gen_range(0.0..100.0_f64) * 10.0).round() / 10.0;
        let p = 0.05 + 0.6 * value / 100.0;
        x.push(if rng.gen_bool(0.05) { None } else { Some(value) });
        y.push(u8::from(rng.gen_bool(p)));
    }
    (x, y)
}

/// Create a scorecard-style DataFrame with known characteristics
///
/// This DataFrame includes:
/// - `bad`: Binary target column (0/1)
/// - `score`: 10 levels, 20 rows each, bad rate rising from 0.15 to 0.60
/// - `income`: `score * 1000` with every 7th row missing
/// - `flat`: Constant value, cannot be binned
/// - `segment`: String column, never binned
pub fn create_scorecard_dataframe() -> DataFrame {
    let rows = 200usize;
    let mut bad = Vec::with_capacity(rows);
    let mut score = Vec::with_capacity(rows);
    let mut income = Vec::with_capacity(rows);
    let mut segment = Vec::with_capacity(rows);

    for i in 0..rows {
        let level = (i % 10) as i32;
        let block = (i / 10) as i32;
        bad.push(i32::from(block < level + 3));
        score.push(f64::from(level));
        income.push(if i % 7 == 0 {
            None
        } else {
            Some(f64::from(level) * 1000.0)
        });
        segment.push(if i % 2 == 0 { "retail" } else { "sme" });
    }

    df! {
        "bad" => bad,
        "score" => score,
        "income" => income,
        "flat" => vec![5.0f64; rows],
        "segment" => segment,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
