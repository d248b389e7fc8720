//! Aggregation of program structure into statistics.
//!
//! This module transforms a traversed program unit into:
//! - Function and basic block counts
//! - A histogram of basic blocks keyed by instruction count

pub mod collector;
pub mod statistics;

// Re-export main types and functions
pub use collector::{run_analysis, Collector};
pub use statistics::Statistics;
