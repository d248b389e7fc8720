//! Program representation consumed by the collector.
//!
//! This module defines:
//! - The traversal traits a host implements to expose its IR
//! - Owned IR types produced by the front-ends in `parser`
//!
//! The collector only ever reads through the traits, so any compiler that
//! can enumerate functions, basic blocks and instruction counts can be
//! analyzed without converting into the owned types first.

pub mod model;

pub use model::{BasicBlock, Function, Instruction, Module};

/// A basic block as seen by the collector
pub trait IrBasicBlock {
    /// Number of instructions in the block (zero is valid)
    fn instruction_count(&self) -> usize;
}

/// A function as seen by the collector
pub trait IrFunction {
    type Block: IrBasicBlock;

    /// Basic blocks in layout order
    fn basic_blocks(&self) -> impl Iterator<Item = &Self::Block>;
}

/// A compilation unit as seen by the collector and the reporter
pub trait ProgramUnit {
    type Function: IrFunction;

    /// Source name the chart file name is derived from
    fn source_name(&self) -> &str;

    /// Functions in the order the host presents them
    fn functions(&self) -> impl Iterator<Item = &Self::Function>;
}
