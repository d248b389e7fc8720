//! Configuration and constants for the analysis and the renderer.

use std::time::Duration;

/// Current statistics report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// External chart renderer, spawned with no arguments
pub const DEFAULT_RENDERER: &str = "gnuplot";

/// Suffix appended to the program unit's source name for the chart
pub const DEFAULT_CHART_SUFFIX: &str = "pdf";

/// gnuplot terminal used for the chart
pub const DEFAULT_TERMINAL: &str = "pdf";

pub const DEFAULT_CHART_TITLE: &str = "Basic blocks by instruction count";
pub const DEFAULT_LINE_COLOR: &str = "black";

/// Prefix for the scratch data file handed to the renderer
pub const DATA_FILE_PREFIX: &str = "ir-block-stats-";
pub const DATA_FILE_SUFFIX: &str = ".dat";

/// How often a renderer with a timeout is polled for exit
pub const RENDERER_POLL_INTERVAL: Duration = Duration::from_millis(20);

// Extensions used to pick a front-end when no format is given
pub const LLVM_TEXT_EXTENSIONS: &[&str] = &["ll"];
pub const JSON_EXTENSIONS: &[&str] = &["json"];
