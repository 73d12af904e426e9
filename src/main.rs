//! mobin: Monotonic Optimal Binning CLI
//!
//! Bins numeric features against a binary target so the bad rate is
//! monotonic across bins, reports WoE/IV/KS per bin, and applies exported
//! bins to new data.

use anyhow::Result;
use clap::Parser;

use mobin::cli::{run_binning, run_transform, Cli, Commands};
use mobin::utils::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Transform {
                input,
                bins,
                output,
                infer_schema_length,
            } => run_transform(input, bins, output.as_deref(), *infer_schema_length),
        };
    }

    run_binning(&cli)
}
