//! Append WoE columns to a dataset using previously exported bins

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::debug;

use super::binning::{apply_woe, BinningResult};
use super::loader::feature_values;

/// Prefix of the WoE column written for each feature
pub const WOE_PREFIX: &str = "woe_";

/// Name of the WoE column for `feature`
pub fn woe_column_name(feature: &str) -> String {
    format!("{}{}", WOE_PREFIX, feature)
}

/// Append a `woe_<feature>` column for each binned feature.
///
/// Every feature must exist in `df`. Returns the names of the added
/// columns in input order.
pub fn append_woe_columns(
    df: &mut DataFrame,
    binned: &[(String, BinningResult)],
) -> Result<Vec<String>> {
    let mut added = Vec::with_capacity(binned.len());

    for (feature, result) in binned {
        let values = feature_values(df, feature)?;
        let woe: Vec<f64> = apply_woe(&values, result)
            .with_context(|| format!("Failed to apply bins of feature '{}'", feature))?
            .into_iter()
            .map(|assignment| assignment.woe)
            .collect();

        let name = woe_column_name(feature);
        df.with_column(Column::new(name.as_str().into(), woe))
            .with_context(|| format!("Failed to add column '{}'", name))?;
        debug!(feature = feature.as_str(), column = name.as_str(), "Transform: added WoE column");
        added.push(name);
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::binning::{bin_with_candidates, CutSet};

    #[test]
    fn test_woe_column_name() {
        assert_eq!(woe_column_name("age"), "woe_age");
    }

    #[test]
    fn test_append_woe_columns() {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for v in 1..=3 {
            for i in 0..4 {
                x.push(Some(f64::from(v)));
                y.push(u8::from(i < v));
            }
        }
        let result = bin_with_candidates(&x, &y, &[CutSet::new(vec![1.0, 2.0])]).unwrap();

        let mut df = df! {
            "score" => [Some(1.0), Some(2.5), None, Some(3.0)],
        }
        .unwrap();
        let added = append_woe_columns(&mut df, &[("score".to_string(), result.clone())]).unwrap();
        assert_eq!(added, vec!["woe_score".to_string()]);

        let woe: Vec<Option<f64>> = df.column("woe_score").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(woe[0], Some(result.tbl[0].woe));
        assert_eq!(woe[1], Some(result.tbl[2].woe));
        // no missing in training: neutral WoE
        assert_eq!(woe[2], Some(0.0));
    }

    #[test]
    fn test_append_woe_columns_missing_feature() {
        let result = BinningResult {
            cut: CutSet::default(),
            tbl: Vec::new(),
        };
        let mut df = df! { "other" => [1.0, 2.0] }.unwrap();
        assert!(append_woe_columns(&mut df, &[("score".to_string(), result)]).is_err());
    }
}
