//! mobin: Monotonic Optimal Binning Library
//!
//! Supervised binning of numeric features against a binary label with a
//! strictly monotonic bad rate, WoE/IV/KS statistics and membership rules.
//! The engine lives in [`pipeline::binning`]; loading, reporting and the
//! CLI are built around it.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
