//! Reporting of collected statistics.
//!
//! This module handles:
//! - The text summary on the log stream
//! - The histogram data file and gnuplot script
//! - Driving the external renderer
//! - JSON statistics reports

pub mod data;
pub mod json;
pub mod renderer;
pub mod script;
pub mod summary;

// Re-export main functions
pub use data::{create_data_file, write_histogram_data};
pub use json::{read_report, validate_output_path, write_report, HistogramBucket, StatsReport};
pub use renderer::{finalize, render, RenderOutcome, Renderer};
pub use script::{build_script, ChartConfig};
pub use summary::{log_summary, summary_lines};
