//! Owned IR types.
//!
//! These mirror the JSON input schema and are also what the LLVM text
//! front-end builds.

use super::{IrBasicBlock, IrFunction, ProgramUnit};
use serde::{Deserialize, Serialize};

/// Top-level compilation unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Source file name (e.g. "main.c")
    #[serde(default, alias = "source_filename")]
    pub source_name: String,

    /// Functions with bodies, in definition order
    #[serde(default)]
    pub functions: Vec<Function>,
}

/// A defined function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    #[serde(default)]
    pub name: String,

    #[serde(default, alias = "blocks")]
    pub basic_blocks: Vec<BasicBlock>,
}

/// A basic block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    /// Block label, `None` for an unnamed entry block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// A single instruction, kept as its source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instruction(pub String);

impl Module {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            functions: Vec::new(),
        }
    }
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            basic_blocks: Vec::new(),
        }
    }
}

impl BasicBlock {
    /// Unnamed block with `count` placeholder instructions
    ///
    /// Handy for building synthetic programs where only the shape matters.
    pub fn with_instruction_count(count: usize) -> Self {
        Self {
            label: None,
            instructions: (0..count).map(|_| Instruction::new("nop")).collect(),
        }
    }
}

impl Instruction {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Instruction mnemonic, skipping an SSA result binding
    ///
    /// `%3 = add nsw i32 %1, %2` yields `add`, `ret void` yields `ret`.
    pub fn opcode(&self) -> &str {
        let text = self.0.trim();
        let rest = match text.split_once(" = ") {
            Some((lhs, rhs)) if lhs.starts_with('%') => rhs,
            _ => text,
        };
        rest.split_whitespace().next().unwrap_or("")
    }
}

impl IrBasicBlock for BasicBlock {
    fn instruction_count(&self) -> usize {
        self.instructions.len()
    }
}

impl IrFunction for Function {
    type Block = BasicBlock;

    fn basic_blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.basic_blocks.iter()
    }
}

impl ProgramUnit for Module {
    type Function = Function;

    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_skips_result_binding() {
        assert_eq!(Instruction::new("%3 = add nsw i32 %1, %2").opcode(), "add");
        assert_eq!(Instruction::new("  ret void").opcode(), "ret");
        assert_eq!(Instruction::new("store i32 0, ptr %x").opcode(), "store");
        assert_eq!(Instruction::new("").opcode(), "");
    }

    #[test]
    fn test_with_instruction_count() {
        let block = BasicBlock::with_instruction_count(4);
        assert_eq!(block.instruction_count(), 4);
        assert!(block.label.is_none());
    }

    #[test]
    fn test_deserialize_aliases_and_defaults() {
        let json = r#"{
            "source_filename": "a.c",
            "functions": [
                { "name": "f", "blocks": [ { "instructions": ["ret void"] } ] },
                { "name": "g" }
            ]
        }"#;
        let module: Module = serde_json::from_str(json).unwrap();

        assert_eq!(module.source_name(), "a.c");
        assert_eq!(module.functions.len(), 2);
        assert_eq!(module.functions[0].basic_blocks[0].instruction_count(), 1);
        assert!(module.functions[1].basic_blocks.is_empty());
    }
}
