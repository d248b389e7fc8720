//! Walk a program unit and accumulate structural statistics.
//!
//! The collector is driven one function at a time so it composes with a
//! host that iterates its own IR; `run_analysis` is the convenience driver
//! for a whole program unit.

use super::statistics::Statistics;
use crate::ir::{IrBasicBlock, IrFunction, ProgramUnit};
use log::{debug, trace};

/// Accumulates `Statistics` across `visit_function` calls
///
/// **Public** - owns the statistics for the lifetime of one analysis run
#[derive(Debug, Default)]
pub struct Collector {
    stats: Statistics,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one function and all of its basic blocks
    ///
    /// **Public** - called once per function, in host traversal order
    ///
    /// A function without blocks only bumps the function count. The IR is
    /// never modified.
    pub fn visit_function<F: IrFunction>(&mut self, function: &F) {
        self.stats.record_function();

        let mut blocks = 0usize;
        for block in function.basic_blocks() {
            self.stats.record_block(block.instruction_count());
            blocks += 1;
        }

        trace!("Visited function with {} basic blocks", blocks);
    }

    /// Statistics collected so far
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Finish the run and hand the statistics over
    pub fn finish(self) -> Statistics {
        self.stats
    }
}

/// Collect statistics for every function of a program unit
///
/// **Public** - first phase of the analysis, see `output::render` for the second
///
/// # Arguments
/// * `program` - Program unit to traverse
///
/// # Returns
/// Statistics over all functions, in the order the program yields them
pub fn run_analysis<P: ProgramUnit>(program: &P) -> Statistics {
    debug!("Collecting statistics for {}", program.source_name());

    let mut collector = Collector::new();
    for function in program.functions() {
        collector.visit_function(function);
    }

    let stats = collector.finish();
    debug!("Collected: {}", stats.summary());
    stats
}
