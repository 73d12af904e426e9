//! Tests for dataset loading and column extraction

use mobin::pipeline::{
    feature_values, get_column_names, labeled_feature, load_dataset_with_progress,
    numeric_features, save_dataset, target_labels,
};
use polars::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let (df, rows, cols, mem_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 2, "Should have 2 data rows");
    assert_eq!(cols, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["a", "b", "c"]);
    assert!(mem_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_parquet_file() {
    let mut df = common::create_scorecard_dataframe();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let (loaded_df, rows, cols, _mem) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows, 200);
    assert_eq!(cols, 5);
    common::assert_has_columns(&loaded_df, &["bad", "score", "income", "flat", "segment"]);
}

#[test]
fn test_get_column_names_csv() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "col_a,col_b,col_c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    drop(file);

    let columns = get_column_names(&csv_path, 100).unwrap();

    assert_eq!(columns, vec!["col_a", "col_b", "col_c"]);
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let bad_path = temp_dir.path().join("test.xlsx");
    std::fs::File::create(&bad_path).unwrap();

    let result = load_dataset_with_progress(&bad_path, 100);

    assert!(result.is_err(), "Unsupported format should return error");
    let err_msg = result.unwrap_err().to_string();
    assert!(
        err_msg.contains("Unsupported"),
        "Error message should mention unsupported format: {}",
        err_msg
    );
}

#[test]
fn test_nonexistent_file() {
    let path = std::path::Path::new("/nonexistent/path/to/file.csv");

    let result = load_dataset_with_progress(path, 100);

    assert!(result.is_err(), "Nonexistent file should return error");
}

#[test]
fn test_target_labels_accepts_int_and_float() {
    let df = df! {
        "int_target" => [0i32, 1, 1, 0],
        "float_target" => [Some(1.0f64), None, Some(0.0), Some(1.0)],
    }
    .unwrap();

    assert_eq!(
        target_labels(&df, "int_target").unwrap(),
        vec![Some(0), Some(1), Some(1), Some(0)]
    );
    assert_eq!(
        target_labels(&df, "float_target").unwrap(),
        vec![Some(1), None, Some(0), Some(1)]
    );
}

#[test]
fn test_target_labels_rejects_non_binary() {
    let df = df! { "target" => [0i32, 1, 2] }.unwrap();
    let err = target_labels(&df, "target").unwrap_err().to_string();
    assert!(err.contains("must be binary"), "{}", err);

    let df = df! { "target" => [None::<f64>, None] }.unwrap();
    let err = target_labels(&df, "target").unwrap_err().to_string();
    assert!(err.contains("only null"), "{}", err);

    let err = target_labels(&df, "missing_col").unwrap_err().to_string();
    assert!(err.contains("not found"), "{}", err);
}

#[test]
fn test_numeric_features_default_and_requested() {
    let df = common::create_scorecard_dataframe();

    let all = numeric_features(&df, "bad", &[]).unwrap();
    assert_eq!(all, vec!["score", "income", "flat"]);

    let picked = numeric_features(&df, "bad", &["income".to_string()]).unwrap();
    assert_eq!(picked, vec!["income"]);

    assert!(numeric_features(&df, "bad", &["segment".to_string()]).is_err());
    assert!(numeric_features(&df, "bad", &["nope".to_string()]).is_err());
    assert!(numeric_features(&df, "bad", &["bad".to_string()]).is_err());
}

#[test]
fn test_labeled_feature_skips_null_targets() {
    let df = df! {
        "x" => [Some(1.0f64), None, Some(3.0), Some(4.0)],
        "target" => [Some(0i32), Some(1), None, Some(1)],
    }
    .unwrap();
    let labels = target_labels(&df, "target").unwrap();

    let (x, y) = labeled_feature(&df, "x", &labels).unwrap();
    assert_eq!(x, vec![Some(1.0), None, Some(4.0)]);
    assert_eq!(y, vec![0, 1, 1]);

    assert_eq!(feature_values(&df, "x").unwrap().len(), 4);
}

#[test]
fn test_save_dataset_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let mut df = common::create_scorecard_dataframe();

    for name in ["out.csv", "out.parquet"] {
        let path = temp_dir.path().join(name);
        save_dataset(&mut df, &path).unwrap();
        let (loaded, rows, _, _) = load_dataset_with_progress(&path, 1000).unwrap();
        assert_eq!(rows, 200);
        common::assert_has_columns(&loaded, &["bad", "score"]);
    }

    let err = save_dataset(&mut df, &temp_dir.path().join("out.xlsx")).unwrap_err();
    assert!(err.to_string().contains("Unsupported output format"));
}
