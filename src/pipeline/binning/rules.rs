//! Textual membership rules for bins

use super::types::{CutSet, ScoredBin};

/// Placeholder for the binned variable inside a rule
pub const VARIABLE: &str = "$X$";

/// Render the membership predicate of `bin` given the cut points.
///
/// Bins 1 and `k` gain an "or missing" clause when missing values were
/// folded into them (`miss > 0`).
pub fn bin_rule(bin: usize, miss: usize, cut: &CutSet) -> String {
    if bin == 0 {
        return format!("{VARIABLE} is missing");
    }

    let points = cut.points();
    let or_missing = if miss > 0 {
        format!(" or {VARIABLE} is missing")
    } else {
        String::new()
    };

    if points.is_empty() {
        return if miss > 0 {
            format!("{VARIABLE} is any value")
        } else {
            format!("{VARIABLE} is not missing")
        };
    }

    if bin == points.len() + 1 {
        format!("{VARIABLE} > {:?}{or_missing}", points[points.len() - 1])
    } else if bin == 1 {
        format!("{VARIABLE} <= {:?}{or_missing}", points[0])
    } else {
        format!(
            "{VARIABLE} > {:?} and {VARIABLE} <= {:?}{or_missing}",
            points[bin - 2],
            points[bin - 1]
        )
    }
}

/// Fill in the rule of every scored bin.
pub fn apply_rules(tbl: &mut [ScoredBin], cut: &CutSet) {
    for bin in tbl.iter_mut() {
        bin.rule = bin_rule(bin.bin, bin.miss, cut);
    }
}
