use super::models::ScriptArgs;
use crate::aggregator::run_analysis;
use crate::ir::ProgramUnit;
use crate::output::{build_script, write_histogram_data};
use crate::parser::parse_program_file;
use crate::utils::config::{DEFAULT_RENDERER, REPORT_SCHEMA_VERSION};
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Write the histogram data file and the gnuplot script without rendering
///
/// Running the renderer on the written script produces the same chart
/// `analyze` would.
pub fn execute_script(args: ScriptArgs) -> Result<()> {
    let module = parse_program_file(&args.input, args.format)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let stats = run_analysis(&module);

    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.dat", module.source_name())));

    let mut data = BufWriter::new(
        File::create(&data_path)
            .with_context(|| format!("Failed to create {}", data_path.display()))?,
    );
    write_histogram_data(&stats, &mut data)
        .and_then(|_| data.flush())
        .with_context(|| format!("Failed to write {}", data_path.display()))?;
    info!("Histogram data written to: {}", data_path.display());

    let mut chart_path = args.chart.chart_path(module.source_name());
    if let Some(dir) = &args.output_dir {
        chart_path = dir.join(chart_path);
    }

    let script = build_script(&stats, &chart_path, &data_path, &args.chart);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &script)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Script written to: {}", path.display());
        }
        None => print!("{}", script),
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("IR Block Stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!("Default renderer: {}", DEFAULT_RENDERER);
    println!();
    println!("Function, basic block and instruction-count histogram statistics for compiler IR.");
}
