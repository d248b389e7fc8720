//! LLVM textual IR (`.ll`) front-end.
//!
//! Only the structure the collector needs is recovered: which functions
//! have bodies, where basic blocks start, and how many instructions each
//! block holds. Instructions are not decoded beyond keeping their text.
//!
//! Recognized layout (as printed by `opt -S` / `clang -S -emit-llvm`):
//! - `source_filename = "..."` names the module
//! - `define ... {` opens a function body, a lone `}` closes it
//! - a column-0 `name:` line, or a legacy `; <label>:N` comment, starts a block
//! - any other indented, non-comment line is one instruction; operand lists
//!   that span lines inside `[` `]` (e.g. `switch`) stay one instruction
//! - the `to label ...` line of `invoke`/`callbr` and the clause lines of
//!   `landingpad` belong to the instruction above them

use crate::ir::{BasicBlock, Function, Instruction, Module};
use crate::utils::error::ParseError;
use log::{debug, trace};

const LEGACY_LABEL_PREFIX: &str = "; <label>:";

/// Instructions whose operands LLVM prints over several lines
const MULTI_LINE_OPCODES: &[&str] = &["invoke", "callbr", "landingpad"];

/// Parse LLVM textual IR
///
/// **Public** - main entry point for `.ll` input
///
/// # Arguments
/// * `input` - Textual IR
/// * `fallback_name` - Source name used when the module declares none
///
/// # Errors
/// * `ParseError::InvalidFormat` - a function header without an opening brace
/// * `ParseError::UnterminatedFunction` - input ends inside a function body
pub fn parse_llvm_module(input: &str, fallback_name: &str) -> Result<Module, ParseError> {
    let mut source_filename: Option<String> = None;
    let mut module_id: Option<String> = None;
    let mut functions = Vec::new();
    let mut open: Option<FunctionBuilder> = None;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;

        if let Some(mut builder) = open.take() {
            if builder.feed(raw) {
                let function = builder.finish();
                trace!(
                    "Parsed @{} with {} basic blocks",
                    function.name,
                    function.basic_blocks.len()
                );
                functions.push(function);
            } else {
                open = Some(builder);
            }
            continue;
        }

        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix("; ModuleID = ") {
            module_id = Some(rest.trim_matches('\'').to_string());
            continue;
        }

        let code = strip_comment(raw).trim();
        if code.starts_with("source_filename") {
            source_filename = quoted_value(code);
        } else if code.starts_with("define ") {
            if !code.ends_with('{') {
                return Err(ParseError::InvalidFormat(format!(
                    "line {}: function header does not open a body: {}",
                    line_no, code
                )));
            }
            open = Some(FunctionBuilder::new(function_name(code), line_no));
        }
    }

    if let Some(builder) = open {
        return Err(ParseError::UnterminatedFunction {
            name: builder.function.name,
            line: builder.start_line,
        });
    }

    let source_name = source_filename
        .or(module_id)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    debug!(
        "Parsed LLVM module {} with {} defined functions",
        source_name,
        functions.len()
    );

    Ok(Module {
        source_name,
        functions,
    })
}

/// Accumulates one function body line by line
struct FunctionBuilder {
    function: Function,
    current: BasicBlock,
    start_line: usize,
    bracket_depth: i64,
}

impl FunctionBuilder {
    fn new(name: String, start_line: usize) -> Self {
        Self {
            function: Function::new(name),
            current: BasicBlock::default(),
            start_line,
            bracket_depth: 0,
        }
    }

    /// Consume one body line, returns true on the closing brace
    fn feed(&mut self, raw: &str) -> bool {
        let code = strip_comment(raw).trim();

        if self.bracket_depth > 0 {
            if let Some(last) = self.current.instructions.last_mut() {
                last.0.push(' ');
                last.0.push_str(code);
            }
            self.bracket_depth += bracket_delta(code);
            return false;
        }

        if let Some(label) = legacy_label(raw.trim()) {
            self.start_block(label);
            return false;
        }

        if code.is_empty() {
            return false;
        }
        if code == "}" {
            return true;
        }

        let at_column_zero = !raw.starts_with(char::is_whitespace);
        if at_column_zero {
            if let Some(label) = code.strip_suffix(':') {
                self.start_block(label.trim_matches('"'));
                return false;
            }
        }

        if code.starts_with("uselistorder") {
            return false;
        }

        if let Some(last) = self.current.instructions.last_mut() {
            if is_continuation(last, code) {
                last.0.push(' ');
                last.0.push_str(code);
                trace!("Joined continuation into `{}`", last.text());
                return false;
            }
        }

        self.current.instructions.push(Instruction::new(code));
        self.bracket_depth = bracket_delta(code).max(0);
        false
    }

    fn start_block(&mut self, label: &str) {
        let unnamed_entry = self.function.basic_blocks.is_empty()
            && self.current.label.is_none()
            && self.current.instructions.is_empty();

        if !unnamed_entry {
            let finished = std::mem::take(&mut self.current);
            self.function.basic_blocks.push(finished);
        }
        self.current.label = Some(label.to_string());
    }

    fn finish(mut self) -> Function {
        if self.current.label.is_some() || !self.current.instructions.is_empty() {
            self.function.basic_blocks.push(self.current);
        }
        self.function
    }
}

/// Cut a trailing `;` comment, ignoring semicolons inside string literals
fn strip_comment(line: &str) -> &str {
    let mut in_quote = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            ';' if !in_quote => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Net number of `[` over `]` outside string literals
fn bracket_delta(code: &str) -> i64 {
    let mut in_quote = false;
    let mut delta = 0;
    for c in code.chars() {
        match c {
            '"' => in_quote = !in_quote,
            '[' if !in_quote => delta += 1,
            ']' if !in_quote => delta -= 1,
            _ => {}
        }
    }
    delta
}

/// Operand line printed below an `invoke`, `callbr` or `landingpad`
fn is_continuation(previous: &Instruction, code: &str) -> bool {
    if !MULTI_LINE_OPCODES.contains(&previous.opcode()) {
        return false;
    }

    code.starts_with("to label ")
        || code == "cleanup"
        || code.starts_with("catch ")
        || code.starts_with("filter ")
}

fn legacy_label(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix(LEGACY_LABEL_PREFIX)?;
    rest.split(':').next().map(str::trim).filter(|label| !label.is_empty())
}

/// First double-quoted value on the line
fn quoted_value(code: &str) -> Option<String> {
    let start = code.find('"')? + 1;
    let len = code[start..].find('"')?;
    Some(code[start..start + len].to_string())
}

/// Name after the `@` sigil of a `define` header
fn function_name(header: &str) -> String {
    let Some(at) = header.find('@') else {
        return String::new();
    };
    let rest = &header[at + 1..];

    if let Some(quoted) = rest.strip_prefix('"') {
        return quoted.split('"').next().unwrap_or_default().to_string();
    }

    rest.chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '$' | '.' | '_' | '-'))
        .collect()
}
