//! JSON statistics report writer.
//!
//! Writes a versioned, machine-readable copy of the collected statistics.

use crate::aggregator::Statistics;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Source name of the analyzed program unit
    pub source_name: String,

    pub function_count: u64,
    pub basic_block_count: u64,

    /// Largest bucket in the histogram
    pub max_bucket_value: u64,

    /// Buckets in ascending instruction-count order
    pub histogram: Vec<HistogramBucket>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One histogram bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub instruction_count: usize,
    pub occurrences: u64,
}

impl StatsReport {
    /// Snapshot statistics into a report
    pub fn new(source_name: impl Into<String>, stats: &Statistics) -> Self {
        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            source_name: source_name.into(),
            function_count: stats.function_count(),
            basic_block_count: stats.basic_block_count(),
            max_bucket_value: stats.max_bucket_value(),
            histogram: stats
                .buckets()
                .map(|(instruction_count, occurrences)| HistogramBucket {
                    instruction_count,
                    occurrences,
                })
                .collect(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Write a statistics report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &StatsReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing statistics report to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    debug!("Report written ({} buckets)", report.histogram.len());
    Ok(())
}

/// Read a statistics report from a JSON file
///
/// **Public** - useful for tooling and tests
pub fn read_report(input_path: impl AsRef<Path>) -> Result<StatsReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: StatsReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(report)
}

/// Validate that output path is writable
///
/// **Public** - also used by `commands::validate_args` for `--stats-json`
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
