//! Pipeline module - loading, binning and WoE transformation

pub mod binning;
pub mod features;
pub mod loader;
pub mod transform;

pub use binning::{BinningConfig, BinningError, BinningResult, BinningStrategy};
pub use features::*;
pub use loader::*;
pub use transform::*;
