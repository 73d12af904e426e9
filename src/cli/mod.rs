//! CLI module - argument parsing and command execution

pub mod args;
pub mod run;

pub use args::{transform_output_path, Cli, Commands};
pub use run::{run_binning, run_transform};
