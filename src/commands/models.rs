use crate::output::ChartConfig;
use crate::parser::InputFormat;
use crate::utils::config::DEFAULT_RENDERER;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Program file to analyze
    pub input: PathBuf,

    /// Input format (None = detect from extension)
    pub format: Option<InputFormat>,

    /// Render the histogram chart
    pub render: bool,

    /// Renderer executable
    pub renderer: String,

    /// Extra renderer arguments
    pub renderer_args: Vec<String>,

    /// Directory for the chart (None = working directory)
    pub output_dir: Option<PathBuf>,

    /// Directory for the renderer data file (None = system temp dir)
    pub scratch_dir: Option<PathBuf>,

    /// Maximum time to wait for the renderer
    pub timeout: Option<Duration>,

    /// Keep the renderer data file
    pub keep_data: bool,

    /// Chart appearance
    pub chart: ChartConfig,

    /// Output path for a JSON statistics report (optional)
    pub stats_json: Option<PathBuf>,

    /// Print the summary to stdout as well
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            format: None,
            render: true,
            renderer: DEFAULT_RENDERER.to_string(),
            renderer_args: Vec::new(),
            output_dir: None,
            scratch_dir: None,
            timeout: None,
            keep_data: false,
            chart: ChartConfig::default(),
            stats_json: None,
            print_summary: false,
        }
    }
}

/// Arguments for the script command
#[derive(Debug, Clone)]
pub struct ScriptArgs {
    /// Program file to analyze
    pub input: PathBuf,

    /// Input format (None = detect from extension)
    pub format: Option<InputFormat>,

    /// Where to write the histogram data (None = `<source name>.dat`)
    pub data: Option<PathBuf>,

    /// Where to write the script (None = stdout)
    pub output: Option<PathBuf>,

    /// Directory for the chart (None = working directory)
    pub output_dir: Option<PathBuf>,

    pub chart: ChartConfig,
}
