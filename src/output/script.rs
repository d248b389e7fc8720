//! gnuplot script generation for the histogram chart.

use crate::aggregator::Statistics;
use crate::utils::config::{
    DEFAULT_CHART_SUFFIX, DEFAULT_CHART_TITLE, DEFAULT_LINE_COLOR, DEFAULT_TERMINAL,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// gnuplot terminal (output format)
    pub terminal: String,
    /// Extension appended to the source name to name the chart
    pub suffix: String,
    pub title: String,
    pub line_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            terminal: DEFAULT_TERMINAL.to_string(),
            suffix: DEFAULT_CHART_SUFFIX.to_string(),
            title: DEFAULT_CHART_TITLE.to_string(),
            line_color: DEFAULT_LINE_COLOR.to_string(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use another terminal, naming the chart after it (`png`, `svg`, ...)
    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        let terminal = terminal.into();
        self.suffix = terminal.clone();
        self.terminal = terminal;
        self
    }

    /// Chart path for a program unit: `<source name>.<suffix>`
    pub fn chart_path(&self, source_name: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", source_name, self.suffix))
    }
}

/// Build the gnuplot script that draws the histogram
///
/// **Public** - pure function, the renderer only pipes its output
///
/// # Arguments
/// * `stats` - Statistics providing the vertical range
/// * `chart_path` - Where gnuplot writes the chart
/// * `data_path` - Data file with `count occurrences` lines
/// * `config` - Chart appearance
///
/// The script ends with `exit` so the renderer never waits for more input.
pub fn build_script(
    stats: &Statistics,
    chart_path: &Path,
    data_path: &Path,
    config: &ChartConfig,
) -> String {
    let mut script = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(script, "set terminal {}", config.terminal);
    let _ = writeln!(script, "set output {}", quote(&chart_path.to_string_lossy()));
    script.push_str("set style data histograms\n");
    script.push_str("set style fill solid\n");
    let _ = writeln!(script, "set yrange [0:{}]", stats.y_range_upper());
    let _ = writeln!(
        script,
        "plot {} using 2:xtic(1) title {} linecolor {}",
        quote(&data_path.to_string_lossy()),
        quote(&config.title),
        quote(&config.line_color)
    );
    script.push_str("exit\n");

    script
}

/// Single-quoted gnuplot string literal
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_build_script() {
        let stats = Statistics::from_histogram(1, BTreeMap::from([(2, 2), (5, 1)]));
        let script = build_script(
            &stats,
            Path::new("main.c.pdf"),
            Path::new("/tmp/data.dat"),
            &ChartConfig::default(),
        );

        assert_eq!(
            script,
            "set terminal pdf\n\
             set output 'main.c.pdf'\n\
             set style data histograms\n\
             set style fill solid\n\
             set yrange [0:3]\n\
             plot '/tmp/data.dat' using 2:xtic(1) title 'Basic blocks by instruction count' linecolor 'black'\n\
             exit\n"
        );
    }

    #[test]
    fn test_empty_histogram_range() {
        let script = build_script(
            &Statistics::new(),
            Path::new("e.pdf"),
            Path::new("d"),
            &ChartConfig::default(),
        );
        assert!(script.contains("set yrange [0:1]\n"));
    }

    #[test]
    fn test_quote_escapes_single_quotes() {
        assert_eq!(quote("it's"), "'it''s'");
    }

    #[test]
    fn test_chart_path() {
        assert_eq!(ChartConfig::new().chart_path("src/a.c"), PathBuf::from("src/a.c.pdf"));
        assert_eq!(
            ChartConfig::new().with_terminal("png").chart_path("a.c"),
            PathBuf::from("a.c.png")
        );
    }
}
