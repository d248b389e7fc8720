//! IR Block Stats CLI
//!
//! Counts functions and basic blocks in compiler IR and renders a
//! histogram of basic blocks by instruction count with gnuplot.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

use ir_block_stats::commands::{
    display_version, execute_analyze, execute_script, validate_args, AnalyzeArgs, ScriptArgs,
};
use ir_block_stats::output::ChartConfig;
use ir_block_stats::parser::InputFormat;
use ir_block_stats::utils::config::DEFAULT_RENDERER;

/// IR Block Stats - basic block statistics for compiler IR
#[derive(Parser, Debug)]
#[command(name = "ir-block-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect statistics and render the histogram chart
    Analyze {
        /// Program file (.ll or .json)
        input: PathBuf,

        /// Input format (detected from the extension by default)
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        /// Only log the statistics, do not spawn the renderer
        #[arg(long)]
        no_render: bool,

        /// Renderer executable
        #[arg(long, env = "IR_BLOCK_STATS_RENDERER", default_value = DEFAULT_RENDERER)]
        renderer: String,

        /// Extra argument for the renderer (repeatable)
        #[arg(long = "renderer-arg", allow_hyphen_values = true)]
        renderer_args: Vec<String>,

        /// gnuplot terminal, also used as the chart file extension
        #[arg(long)]
        terminal: Option<String>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Directory for the chart
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Directory for the renderer data file
        #[arg(long, env = "IR_BLOCK_STATS_SCRATCH_DIR")]
        scratch_dir: Option<PathBuf>,

        /// Seconds to wait for the renderer before killing it
        #[arg(long)]
        timeout: Option<u64>,

        /// Keep the renderer data file
        #[arg(long)]
        keep_data: bool,

        /// Output path for a JSON statistics report
        #[arg(long)]
        stats_json: Option<PathBuf>,

        /// Print the text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Write the histogram data and gnuplot script without rendering
    Script {
        /// Program file (.ll or .json)
        input: PathBuf,

        /// Input format (detected from the extension by default)
        #[arg(long, value_enum)]
        format: Option<InputFormat>,

        /// Data file path (defaults to <source name>.dat)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Script output path (defaults to stdout)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,

        /// Directory for the chart
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// gnuplot terminal, also used as the chart file extension
        #[arg(long)]
        terminal: Option<String>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            format,
            no_render,
            renderer,
            renderer_args,
            terminal,
            title,
            output_dir,
            scratch_dir,
            timeout,
            keep_data,
            stats_json,
            summary,
        } => {
            let args = AnalyzeArgs {
                input,
                format,
                render: !no_render,
                renderer,
                renderer_args,
                output_dir,
                scratch_dir,
                timeout: timeout.map(Duration::from_secs),
                keep_data,
                chart: chart_config(terminal, title),
                stats_json,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            let report = execute_analyze(args)?;
            if let Some(error) = report.render.as_ref().and_then(|outcome| outcome.error()) {
                warn!("No chart produced: {}", error);
            }
        }

        Commands::Script {
            input,
            format,
            data,
            output,
            output_dir,
            terminal,
            title,
        } => {
            execute_script(ScriptArgs {
                input,
                format,
                data,
                output,
                output_dir,
                chart: chart_config(terminal, title),
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Chart configuration from optional CLI overrides
///
/// **Private** - shared by analyze and script
fn chart_config(terminal: Option<String>, title: Option<String>) -> ChartConfig {
    let mut config = ChartConfig::new();

    if let Some(terminal) = terminal {
        config = config.with_terminal(terminal);
    }
    if let Some(title) = title {
        config = config.with_title(title);
    }

    config
}
