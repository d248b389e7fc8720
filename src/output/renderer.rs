//! Drive the external chart renderer.
//!
//! Rendering is best effort: every failure is logged and reported through
//! `RenderOutcome`, never returned as an error. The statistics summary is
//! always logged first, so a missing renderer still leaves the numbers in
//! the log.

use super::data::create_data_file;
use super::script::{build_script, ChartConfig};
use super::summary::log_summary;
use crate::aggregator::Statistics;
use crate::ir::ProgramUnit;
use crate::utils::config::{DEFAULT_RENDERER, RENDERER_POLL_INTERVAL};
use crate::utils::error::ReportError;
use log::{debug, error, info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// Result of a rendering attempt
#[derive(Debug)]
pub enum RenderOutcome {
    /// Script delivered and the renderer exited cleanly
    Rendered {
        chart_path: PathBuf,
        /// Location of the data file when it was kept
        data_file: Option<PathBuf>,
    },

    /// Rendering was not attempted (renderer missing, data file failed)
    Skipped(ReportError),

    /// The renderer ran but the attempt failed
    Failed {
        chart_path: PathBuf,
        error: ReportError,
    },
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn error(&self) -> Option<&ReportError> {
        match self {
            Self::Rendered { .. } => None,
            Self::Skipped(error) | Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Renderer process configuration
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Executable to spawn
    pub program: String,
    /// Extra arguments, none by default
    pub args: Vec<String>,
    /// Directory for the data file, system temp dir when `None`
    pub scratch_dir: Option<PathBuf>,
    /// Directory the chart is placed in, working directory when `None`
    pub output_dir: Option<PathBuf>,
    /// Upper bound on waiting for the renderer to exit
    pub timeout: Option<Duration>,
    /// Persist the data file instead of deleting it
    pub keep_data_file: bool,
    pub chart: ChartConfig,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            program: DEFAULT_RENDERER.to_string(),
            args: Vec::new(),
            scratch_dir: None,
            output_dir: None,
            timeout: None,
            keep_data_file: false,
            chart: ChartConfig::default(),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_keep_data_file(mut self, keep: bool) -> Self {
        self.keep_data_file = keep;
        self
    }

    pub fn with_chart(mut self, chart: ChartConfig) -> Self {
        self.chart = chart;
        self
    }

    /// Where the chart for `source_name` ends up
    pub fn chart_path(&self, source_name: &str) -> PathBuf {
        let file = self.chart.chart_path(source_name);
        match &self.output_dir {
            Some(dir) => dir.join(file),
            None => file,
        }
    }

    /// Report the statistics of a finished program unit
    ///
    /// **Public** - called once after every function has been visited
    pub fn finalize<P: ProgramUnit>(&self, program: &P, stats: &Statistics) -> RenderOutcome {
        self.render(stats, program.source_name())
    }

    /// Log the summary and render the histogram chart
    ///
    /// **Public** - second phase of the analysis, works on any `Statistics`
    ///
    /// # Arguments
    /// * `stats` - Statistics to report
    /// * `output_name_hint` - Source name the chart file name is derived from
    ///
    /// # Returns
    /// What happened; failures are already logged
    pub fn render(&self, stats: &Statistics, output_name_hint: &str) -> RenderOutcome {
        log_summary(stats);

        let mut child = match self.spawn() {
            Ok(child) => child,
            Err(source) => {
                let error = ReportError::RendererUnavailable {
                    program: self.program.clone(),
                    source,
                };
                error!("{}, skipping chart rendering", error);
                return RenderOutcome::Skipped(error);
            }
        };

        let chart_path = self.chart_path(output_name_hint);
        info!(
            "{} presence detected, rendering histogram to {}",
            self.program,
            chart_path.display()
        );

        let data_file = match create_data_file(stats, self.scratch_dir.as_deref()) {
            Ok(file) => file,
            Err(error) => {
                error!("{}, skipping chart rendering", error);
                if let Err(close_error) = self.close(&mut child) {
                    warn!("{}", close_error);
                }
                return RenderOutcome::Skipped(error);
            }
        };

        if stats.is_empty() {
            warn!("Histogram is empty, the renderer may have nothing to plot");
        }

        let script = build_script(stats, &chart_path, data_file.path(), &self.chart);
        debug!("Renderer script:\n{}", script);

        let dispatch_error = dispatch(&mut child, &script)
            .err()
            .map(ReportError::ScriptDispatchError);
        if let Some(error) = &dispatch_error {
            error!("{}", error);
        }

        let close_result = self.close(&mut child);
        if let Err(error) = &close_result {
            error!("{}", error);
        }

        let kept_data_file = self.release_data_file(data_file);

        match dispatch_error.or(close_result.err()) {
            None => {
                info!("Successfully rendered output to {}", chart_path.display());
                RenderOutcome::Rendered {
                    chart_path,
                    data_file: kept_data_file,
                }
            }
            Some(error) => {
                error!("Failed to render output to {}", chart_path.display());
                RenderOutcome::Failed { chart_path, error }
            }
        }
    }

    fn spawn(&self) -> io::Result<Child> {
        debug!("Spawning renderer: {} {:?}", self.program, self.args);
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
    }

    /// Close the renderer's input and reap it
    fn close(&self, child: &mut Child) -> Result<(), ReportError> {
        drop(child.stdin.take());

        let status = match self.timeout {
            Some(timeout) => wait_with_timeout(child, timeout)?,
            None => child.wait().map_err(ReportError::RendererWait)?,
        };

        if status.success() {
            debug!("Renderer exited with {}", status);
            Ok(())
        } else {
            Err(ReportError::RendererExit(status))
        }
    }

    /// Delete the data file, or persist it when configured to
    fn release_data_file(&self, data_file: NamedTempFile) -> Option<PathBuf> {
        if self.keep_data_file {
            return match data_file.keep() {
                Ok((_, path)) => {
                    info!("Histogram data kept at {}", path.display());
                    Some(path)
                }
                Err(e) => {
                    warn!("Failed to keep histogram data file: {}", e);
                    None
                }
            };
        }

        let path = data_file.path().to_path_buf();
        if let Err(e) = data_file.close() {
            warn!("Failed to remove data file {}: {}", path.display(), e);
        }
        None
    }
}

/// Send the whole script to the renderer's standard input
fn dispatch(child: &mut Child, script: &str) -> io::Result<()> {
    let Some(mut stdin) = child.stdin.take() else {
        return Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "renderer input is not connected",
        ));
    };

    stdin.write_all(script.as_bytes())?;
    stdin.flush()
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ReportError> {
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(status) = child.try_wait().map_err(ReportError::RendererWait)? {
            return Ok(status);
        }

        if Instant::now() >= deadline {
            warn!("Renderer still running after {:?}, killing it", timeout);
            if let Err(e) = child.kill() {
                warn!("Failed to kill renderer: {}", e);
            }
            if let Err(e) = child.wait() {
                warn!("Failed to reap renderer: {}", e);
            }
            return Err(ReportError::RendererTimeout(timeout));
        }

        thread::sleep(RENDERER_POLL_INTERVAL);
    }
}

/// Render with the default gnuplot configuration
///
/// **Public** - convenience wrapper around `Renderer::render`
pub fn render(stats: &Statistics, output_name_hint: &str) -> RenderOutcome {
    Renderer::default().render(stats, output_name_hint)
}

/// Finalize a program unit with the default gnuplot configuration
pub fn finalize<P: ProgramUnit>(program: &P, stats: &Statistics) -> RenderOutcome {
    Renderer::default().finalize(program, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn scenario_stats() -> Statistics {
        Statistics::from_histogram(1, BTreeMap::from([(2, 2), (5, 1)]))
    }

    #[test]
    fn test_missing_renderer_is_skipped() {
        let renderer = Renderer::new().with_program("ir-block-stats-no-such-renderer");

        let outcome = renderer.render(&scenario_stats(), "main.c");

        assert!(outcome.is_skipped());
        assert!(matches!(
            outcome.error(),
            Some(ReportError::RendererUnavailable { .. })
        ));
    }

    #[test]
    fn test_chart_path_with_output_dir() {
        let renderer = Renderer::new().with_output_dir("charts");
        assert_eq!(renderer.chart_path("a.c"), PathBuf::from("charts/a.c.pdf"));
        assert_eq!(Renderer::new().chart_path("a.c"), PathBuf::from("a.c.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_render_deletes_data_file() {
        let scratch = tempfile::tempdir().unwrap();
        let renderer = Renderer::new()
            .with_program("sh")
            .with_args(["-c", "cat > /dev/null"])
            .with_scratch_dir(scratch.path());

        let outcome = renderer.render(&scenario_stats(), "main.c");

        assert!(outcome.is_rendered());
        assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_render_timeout_kills_renderer() {
        let renderer = Renderer::new()
            .with_program("sh")
            .with_args(["-c", "exec sleep 10"])
            .with_timeout(Duration::from_millis(100));

        let started = Instant::now();
        let outcome = renderer.render(&scenario_stats(), "main.c");

        assert!(matches!(
            outcome,
            RenderOutcome::Failed { error: ReportError::RendererTimeout(_), .. }
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
