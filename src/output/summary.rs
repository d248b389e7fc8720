//! Plain-text statistics summary.
//!
//! The summary goes to the log stream; the same lines are available as
//! strings so callers can print them elsewhere.

use crate::aggregator::Statistics;
use log::info;

/// Summary lines in emission order
///
/// **Public** - headline, histogram header, then one `count: occurrences`
/// line per bucket in ascending instruction-count order
pub fn summary_lines(stats: &Statistics) -> Vec<String> {
    let mut lines = Vec::with_capacity(stats.histogram().len() + 2);

    lines.push(format!(
        "The program has a total of {} functions and {} basic blocks.",
        stats.function_count(),
        stats.basic_block_count()
    ));
    lines.push("Basic blocks by instruction count statistics:".to_string());
    lines.extend(
        stats
            .buckets()
            .map(|(count, occurrences)| format!("{}: {}", count, occurrences)),
    );

    lines
}

/// Write the summary to the log stream
pub fn log_summary(stats: &Statistics) {
    for line in summary_lines(stats) {
        info!("{}", line);
    }
}
