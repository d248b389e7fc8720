//! Front-ends that turn input files into a `Module`.
//!
//! This module handles:
//! - Picking a front-end from an explicit format or the file extension
//! - Parsing JSON IR descriptions
//! - Parsing LLVM textual IR

pub mod json;
pub mod llvm;

pub use json::parse_json_module;
pub use llvm::parse_llvm_module;

use crate::ir::Module;
use crate::utils::config::{JSON_EXTENSIONS, LLVM_TEXT_EXTENSIONS};
use crate::utils::error::ParseError;
use clap::ValueEnum;
use log::info;
use std::path::Path;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Serialized module description
    Json,
    /// LLVM textual IR (.ll)
    Llvm,
}

impl InputFormat {
    /// Guess the format from a file extension
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();

        if LLVM_TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Llvm)
        } else if JSON_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Read and parse a program file
///
/// **Public** - main entry point for loading input
///
/// # Arguments
/// * `path` - Input file
/// * `format` - Explicit format, or `None` to detect from the extension
///
/// # Errors
/// * `ParseError::UnknownFormat` - no format given and the extension is unknown
/// * `ParseError::Io` - the file cannot be read
/// * any error of the selected front-end
pub fn parse_program_file(
    path: impl AsRef<Path>,
    format: Option<InputFormat>,
) -> Result<Module, ParseError> {
    let path = path.as_ref();

    let format = match format.or_else(|| InputFormat::detect(path)) {
        Some(format) => format,
        None => return Err(ParseError::UnknownFormat(path.display().to_string())),
    };

    info!("Reading {:?} input from: {}", format, path.display());

    let input = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let fallback_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match format {
        InputFormat::Json => parse_json_module(&input, &fallback_name),
        InputFormat::Llvm => parse_llvm_module(&input, &fallback_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(InputFormat::detect(Path::new("a.ll")), Some(InputFormat::Llvm));
        assert_eq!(InputFormat::detect(Path::new("dir/a.JSON")), Some(InputFormat::Json));
        assert_eq!(InputFormat::detect(Path::new("a.bc")), None);
        assert_eq!(InputFormat::detect(Path::new("noext")), None);
    }

    #[test]
    fn test_unknown_format() {
        let result = parse_program_file("module.bc", None);
        assert!(matches!(result, Err(ParseError::UnknownFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_program_file("does/not/exist.ll", None);
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }
}
