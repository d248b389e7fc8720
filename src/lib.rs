//! IR Block Stats
//!
//! Structural statistics for compiler IR: function counts, basic block
//! counts and a histogram of basic blocks by instruction count, rendered
//! as a chart through gnuplot.
//!
//! The analysis runs in two phases:
//!
//! ```ignore
//! let module = parse_program_file("main.ll", None)?;
//! let stats = run_analysis(&module);
//! let outcome = Renderer::default().finalize(&module, &stats);
//! ```
//!
//! Hosts with their own IR implement the traits in [`ir`] and drive
//! [`aggregator::Collector`] one function at a time.

pub mod aggregator;
pub mod commands;
pub mod ir;
pub mod output;
pub mod parser;
pub mod utils;

pub use aggregator::{run_analysis, Collector, Statistics};
pub use ir::{IrBasicBlock, IrFunction, ProgramUnit};
pub use output::{RenderOutcome, Renderer};
pub use parser::{parse_program_file, InputFormat};
