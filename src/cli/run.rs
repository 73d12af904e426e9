//! Command execution for the binning run and the transform subcommand

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;

use super::args::{transform_output_path, Cli};
use crate::pipeline::{
    append_woe_columns, bin_features, load_dataset_with_progress, numeric_features, save_dataset,
    BinningConfig,
};
use crate::report::{display_feature_summary, print_bin_table, read_export, write_export, BinningExport};
use crate::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success, print_warning,
};

/// Proposer tunables taken from the command line
fn binning_config(cli: &Cli) -> BinningConfig {
    BinningConfig {
        max_quantile_bins: cli.max_bins,
        max_clusters: cli.max_clusters,
        min_child_samples: cli.min_child_samples,
        ..Default::default()
    }
}

/// Load, bin every selected feature, report, and optionally export.
pub fn run_binning(cli: &Cli) -> Result<()> {
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let target = cli.target.as_deref().ok_or_else(|| {
        anyhow::anyhow!("Target column is required. Use -t/--target to specify.")
    })?;
    let config = binning_config(cli);

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, target, cli.strategy, cli.export.as_deref());

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) = load_dataset_with_progress(input, cli.infer_schema_length)?;
    print_success("Dataset loaded");
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let column_names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    if !column_names.iter().any(|c| c == target) {
        anyhow::bail!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            target,
            column_names
        );
    }
    print_step_time(step_start.elapsed());

    // Step 2: Bin features
    print_step_header(2, "Monotonic Binning");
    let step_start = Instant::now();
    let features = numeric_features(&df, target, &cli.features)?;
    if features.is_empty() {
        print_warning("No numeric features to bin");
        return Ok(());
    }
    print_count("numeric feature(s) to bin", features.len(), Some(&format!("({})", cli.strategy)));

    let outcomes = bin_features(&df, target, &features, cli.strategy, &config)?;
    let failed = outcomes.iter().filter(|o| !o.is_binned()).count();
    if failed == 0 {
        print_success("All features binned");
    } else {
        print_warning(&format!("{} feature(s) could not be binned", failed));
    }
    print_step_time(step_start.elapsed());

    display_feature_summary(&outcomes);

    if cli.show_bins {
        for outcome in &outcomes {
            if let Ok(result) = &outcome.result {
                print_bin_table(&outcome.feature, result);
            }
        }
    }

    // Step 3: Export
    if let Some(export_path) = &cli.export {
        print_step_header(3, "Export Results");
        let export = BinningExport::new(
            &outcomes,
            &input.display().to_string(),
            target,
            cli.strategy,
            &config,
        );
        write_export(&export, export_path)?;
        print_success(&format!("Saved to {}", export_path.display()));
    }

    print_completion();
    Ok(())
}

/// Append WoE columns to `input` using bins exported by a previous run.
pub fn run_transform(
    input: &Path,
    bins: &Path,
    output: Option<&Path>,
    infer_schema_length: usize,
) -> Result<()> {
    let output_path = transform_output_path(input, output);

    println!("\n {} Applying WoE bins", style("◆").cyan().bold());
    println!("   Input:  {}", style(input.display()).dim());
    println!("   Bins:   {}", style(bins.display()).dim());
    println!("   Output: {}", style(output_path.display()).dim());
    println!();

    let export = read_export(bins)?;
    let binned = export.binned();
    let skipped = export.features.len() - binned.len();
    if skipped > 0 {
        print_info(&format!("Skipping {} feature(s) that failed to bin", skipped));
    }

    let (mut df, rows, _, _) = load_dataset_with_progress(input, infer_schema_length)?;

    let spinner = create_spinner("Computing WoE columns...");
    let added = append_woe_columns(&mut df, &binned)
        .with_context(|| format!("Failed to transform {}", input.display()))?;
    finish_with_success(&spinner, &format!("Added {} WoE column(s)", added.len()));

    save_dataset(&mut df, &output_path)?;
    println!();
    println!(
        "   {} rows written to {}",
        style(rows).yellow(),
        style(output_path.display()).dim()
    );
    println!();
    println!(" {} Transform complete!", style("✓").green().bold());

    Ok(())
}
