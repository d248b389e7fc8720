//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while reading a program unit from disk
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid IR format: {0}")]
    InvalidFormat(String),

    #[error("Cannot detect input format for {0} (use --format)")]
    UnknownFormat(String),

    #[error("Function @{name} starting on line {line} has no closing brace")]
    UnterminatedFunction { name: String, line: usize },
}

/// Errors that can occur while rendering the histogram chart.
///
/// None of these are fatal: the reporter logs them and hands them back
/// inside a `RenderOutcome`.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to spawn renderer `{program}`: {source}")]
    RendererUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create or write temporary data file: {0}")]
    TempFileError(#[source] std::io::Error),

    #[error("Failed to send script to renderer: {0}")]
    ScriptDispatchError(#[source] std::io::Error),

    #[error("Failed to wait for renderer: {0}")]
    RendererWait(#[source] std::io::Error),

    #[error("Renderer did not exit within {0:?}")]
    RendererTimeout(Duration),

    #[error("Renderer exited with {0}")]
    RendererExit(ExitStatus),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
