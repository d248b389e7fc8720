//! JSON IR front-end.
//!
//! Accepts a serialized `Module`:
//!
//! ```json
//! {
//!   "source_name": "main.c",
//!   "functions": [
//!     { "name": "main",
//!       "basic_blocks": [ { "label": "entry", "instructions": ["ret i32 0"] } ] }
//!   ]
//! }
//! ```

use crate::ir::Module;
use crate::utils::error::ParseError;
use log::debug;

/// Parse a JSON IR description
///
/// **Public** - main entry point for JSON input
///
/// # Arguments
/// * `input` - JSON text
/// * `fallback_name` - Source name used when the document has none
pub fn parse_json_module(input: &str, fallback_name: &str) -> Result<Module, ParseError> {
    let mut module: Module = serde_json::from_str(input)?;

    if module.source_name.trim().is_empty() {
        debug!("No source name in JSON input, using {}", fallback_name);
        module.source_name = fallback_name.to_string();
    }

    debug!(
        "Parsed JSON module {} with {} functions",
        module.source_name,
        module.functions.len()
    );
    Ok(module)
}
