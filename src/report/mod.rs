//! Report module - bin tables, feature summaries and JSON export

pub mod export;
pub mod summary;
pub mod table;

pub use export::*;
pub use summary::*;
pub use table::*;
