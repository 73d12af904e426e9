//! Feature summary report across a binning run

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::binning::summarize;
use crate::pipeline::FeatureOutcome;

/// IV bands used to colour the summary
fn iv_color(iv: f64) -> Color {
    if iv >= 0.3 {
        Color::Green
    } else if iv >= 0.1 {
        Color::Cyan
    } else if iv >= 0.02 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Build the feature summary table: one row per feature with IV, KS,
/// bin count, bad rate and missing rate. Failed features keep their row
/// with the failure reason.
pub fn feature_table(outcomes: &[FeatureOutcome]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        ["Feature", "IV", "KS", "Bins", "Bad rate", "Missing", "Status"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );

    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => {
                let summary = summarize(result);
                table.add_row(vec![
                    Cell::new(&outcome.feature),
                    Cell::new(format!("{:.4}", summary.iv))
                        .fg(iv_color(summary.iv))
                        .set_alignment(CellAlignment::Right),
                    Cell::new(format!("{:.2}", summary.ks)).set_alignment(CellAlignment::Right),
                    Cell::new(result.tbl.len()).set_alignment(CellAlignment::Right),
                    Cell::new(format!("{:.4}", summary.bad_rate)).set_alignment(CellAlignment::Right),
                    Cell::new(format!("{:.4}", summary.missing_rate))
                        .set_alignment(CellAlignment::Right),
                    Cell::new("binned").fg(Color::Green),
                ]);
            }
            Err(err) => {
                table.add_row(vec![
                    Cell::new(&outcome.feature),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(format!("failed: {}", err)).fg(Color::Red),
                ]);
            }
        }
    }

    table
}

/// Print the summary table with a header and totals
pub fn display_feature_summary(outcomes: &[FeatureOutcome]) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("BINNING SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    for line in feature_table(outcomes).to_string().lines() {
        println!("    {}", line);
    }

    let binned = outcomes.iter().filter(|o| o.is_binned()).count();
    let failed = outcomes.len() - binned;
    println!();
    println!(
        "      {} binned, {} failed",
        style(binned).green().bold(),
        if failed > 0 {
            style(failed).red().bold()
        } else {
            style(failed).dim()
        }
    );
}
