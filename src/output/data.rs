//! Histogram data file consumed by the renderer.

use crate::aggregator::Statistics;
use crate::utils::config::{DATA_FILE_PREFIX, DATA_FILE_SUFFIX};
use crate::utils::error::ReportError;
use log::debug;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write one `count occurrences` line per bucket, ascending
pub fn write_histogram_data<W: Write>(stats: &Statistics, writer: &mut W) -> io::Result<()> {
    for (count, occurrences) in stats.buckets() {
        writeln!(writer, "{} {}", count, occurrences)?;
    }
    Ok(())
}

/// Create the scratch data file and fill it
///
/// **Public** - the file is exclusively created under a random name
///
/// # Arguments
/// * `stats` - Histogram to write
/// * `scratch_dir` - Directory for the file, system temp dir when `None`
///
/// # Returns
/// The open temp file; it is deleted when dropped unless persisted
///
/// # Errors
/// * `ReportError::TempFileError` - creation or write failed
pub fn create_data_file(
    stats: &Statistics,
    scratch_dir: Option<&Path>,
) -> Result<NamedTempFile, ReportError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(DATA_FILE_PREFIX).suffix(DATA_FILE_SUFFIX);

    let file = match scratch_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(ReportError::TempFileError)?;

    {
        let mut writer = BufWriter::new(file.as_file());
        write_histogram_data(stats, &mut writer).map_err(ReportError::TempFileError)?;
        writer.flush().map_err(ReportError::TempFileError)?;
    }

    debug!(
        "Wrote {} histogram buckets to {}",
        stats.histogram().len(),
        file.path().display()
    );
    Ok(file)
}
