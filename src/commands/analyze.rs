//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Parses the input program
//! 2. Collects statistics
//! 3. Writes the JSON report (if requested)
//! 4. Logs the summary and renders the chart

use super::models::AnalyzeArgs;
use crate::aggregator::{run_analysis, Statistics};
use crate::ir::ProgramUnit;
use crate::output::{
    log_summary, summary_lines, validate_output_path, write_report, RenderOutcome, Renderer,
    StatsReport,
};
use crate::parser::parse_program_file;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// What the analyze command produced
#[derive(Debug)]
pub struct AnalyzeReport {
    pub source_name: String,
    pub statistics: Statistics,
    /// `None` when rendering was disabled
    pub render: Option<RenderOutcome>,
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input that cannot be read or parsed
/// * JSON report write errors
///
/// Rendering problems are not errors; they are logged and returned in
/// `AnalyzeReport::render`.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<AnalyzeReport> {
    let start_time = Instant::now();

    info!("Step 1/3: Parsing {}...", args.input.display());
    let module = parse_program_file(&args.input, args.format)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    info!("Step 2/3: Collecting statistics...");
    let statistics = run_analysis(&module);
    debug!("{}", statistics.summary());

    if let Some(path) = &args.stats_json {
        let report = StatsReport::new(module.source_name(), &statistics);
        write_report(&report, path).context("Failed to write statistics report")?;
        info!("✓ Statistics report written to: {}", path.display());
    }

    let render = if args.render {
        info!("Step 3/3: Reporting...");
        let outcome = build_renderer(&args).finalize(&module, &statistics);
        Some(outcome)
    } else {
        info!("Step 3/3: Reporting (chart rendering disabled)...");
        log_summary(&statistics);
        None
    };

    if args.print_summary {
        println!("{}", summary_lines(&statistics).join("\n"));
    }

    info!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(AnalyzeReport {
        source_name: module.source_name().to_string(),
        statistics,
        render,
    })
}

/// Renderer configured from the command arguments
///
/// **Private** - internal helper for execute_analyze
fn build_renderer(args: &AnalyzeArgs) -> Renderer {
    let mut renderer = Renderer::new()
        .with_program(args.renderer.clone())
        .with_args(args.renderer_args.iter().cloned())
        .with_keep_data_file(args.keep_data)
        .with_chart(args.chart.clone());

    if let Some(dir) = &args.output_dir {
        renderer = renderer.with_output_dir(dir);
    }
    if let Some(dir) = &args.scratch_dir {
        renderer = renderer.with_scratch_dir(dir);
    }
    if let Some(timeout) = args.timeout {
        renderer = renderer.with_timeout(timeout);
    }

    renderer
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.render && args.renderer.trim().is_empty() {
        anyhow::bail!("Renderer cannot be empty");
    }

    if let Some(timeout) = args.timeout {
        if timeout.is_zero() {
            anyhow::bail!("Renderer timeout must be greater than 0");
        }
    }

    if args.chart.suffix.is_empty() {
        anyhow::bail!("Chart suffix cannot be empty");
    }

    if let Some(dir) = &args.output_dir {
        if dir.is_file() {
            anyhow::bail!("Output directory is a file: {}", dir.display());
        }
    }

    if let Some(path) = &args.stats_json {
        validate_output_path(path).context("Invalid statistics report path")?;
    }

    Ok(())
}
