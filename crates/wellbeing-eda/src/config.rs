//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! Every field has a default matching the published analysis (sleep
//! buckets, chart size, output file names).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location of the published student wellbeing dataset.
pub const DEFAULT_DATASET_URL: &str = "https://www.dropbox.com/scl/fi/d5v08knbo3gha4xn2a44h/student_wellbeing_dataset.csv?rlkey=72iirijqpk6g2290myzng7pvi&e=1&st=kwwvfj6i&dl=1";

/// File name of the exported cleaned dataset.
pub const DEFAULT_CLEANED_FILE_NAME: &str = "cleaned_student_data.csv";

/// File name of the optional JSON run report.
pub const REPORT_FILE_NAME: &str = "eda_report.json";

/// Sleep hour bin edges: (0, 6], (6, 8], (8, 24].
pub const DEFAULT_SLEEP_BIN_EDGES: [f64; 4] = [0.0, 6.0, 8.0, 24.0];

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use wellbeing_eda::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .output_dir("results")
///     .render_charts(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory receiving the charts, the cleaned CSV and the JSON report.
    /// Default: "."
    pub output_dir: PathBuf,

    /// File name of the cleaned dataset export.
    /// Default: "cleaned_student_data.csv"
    pub cleaned_file_name: String,

    /// Number of rows shown in head previews.
    /// Default: 5
    pub head_rows: usize,

    /// Whether to render the six insight charts.
    /// Default: true
    pub render_charts: bool,

    /// Chart width in pixels.
    /// Default: 800
    pub chart_width: u32,

    /// Chart height in pixels.
    /// Default: 500
    pub chart_height: u32,

    /// Whether charts carry titles, axis descriptions and tick labels.
    /// Text needs a system sans-serif font; without one, charts are drawn
    /// without text regardless of this flag.
    /// Default: true
    pub chart_text: bool,

    /// Bin edges for the sleep buckets. Bins are open on the low end and
    /// closed on the high end.
    /// Default: [0, 6, 8, 24]
    pub sleep_bin_edges: [f64; 4],

    /// Whether to write `eda_report.json` next to the other outputs.
    /// Default: false
    pub emit_report: bool,

    /// Whether to print the human-readable console report.
    /// Default: true
    pub print_console: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            cleaned_file_name: DEFAULT_CLEANED_FILE_NAME.to_string(),
            head_rows: 5,
            render_charts: true,
            chart_width: 800,
            chart_height: 500,
            chart_text: true,
            sleep_bin_edges: DEFAULT_SLEEP_BIN_EDGES,
            emit_report: false,
            print_console: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Full path of the cleaned dataset export.
    pub fn cleaned_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file_name)
    }

    /// Full path of the JSON run report.
    pub fn report_output_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.sleep_bin_edges.iter().any(|edge| !edge.is_finite())
            || self.sleep_bin_edges.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(ConfigValidationError::InvalidBinEdges(
                self.sleep_bin_edges.to_vec(),
            ));
        }

        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigValidationError::InvalidChartSize {
                width: self.chart_width,
                height: self.chart_height,
            });
        }

        if self.head_rows == 0 {
            return Err(ConfigValidationError::InvalidHeadRows);
        }

        if self.cleaned_file_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sleep bin edges {0:?} (must be finite and strictly increasing)")]
    InvalidBinEdges(Vec<f64>),

    #[error("Invalid chart size {width}x{height} (both dimensions must be positive)")]
    InvalidChartSize { width: u32, height: u32 },

    #[error("Invalid head rows: 0 (must be at least 1)")]
    InvalidHeadRows,

    #[error("Cleaned dataset file name must not be empty")]
    EmptyFileName,
}

impl From<ConfigValidationError> for crate::error::EdaError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::EdaError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    output_dir: Option<PathBuf>,
    cleaned_file_name: Option<String>,
    head_rows: Option<usize>,
    render_charts: Option<bool>,
    chart_width: Option<u32>,
    chart_height: Option<u32>,
    chart_text: Option<bool>,
    sleep_bin_edges: Option<[f64; 4]>,
    emit_report: Option<bool>,
    print_console: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the output directory for charts, export and report.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the file name of the cleaned dataset export.
    pub fn cleaned_file_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_file_name = Some(name.into());
        self
    }

    /// Set the number of rows shown in head previews.
    pub fn head_rows(mut self, rows: usize) -> Self {
        self.head_rows = Some(rows);
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Set the chart size in pixels.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = Some(width);
        self.chart_height = Some(height);
        self
    }

    /// Enable or disable chart titles and axis labels.
    pub fn chart_text(mut self, text: bool) -> Self {
        self.chart_text = Some(text);
        self
    }

    /// Set the sleep bin edges.
    ///
    /// # Arguments
    /// * `edges` - Four strictly increasing values delimiting three bins
    pub fn sleep_bin_edges(mut self, edges: [f64; 4]) -> Self {
        self.sleep_bin_edges = Some(edges);
        self
    }

    /// Enable or disable writing the JSON run report.
    pub fn emit_report(mut self, emit: bool) -> Self {
        self.emit_report = Some(emit);
        self
    }

    /// Enable or disable the human-readable console report.
    pub fn print_console(mut self, print: bool) -> Self {
        self.print_console = Some(print);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            cleaned_file_name: self.cleaned_file_name.unwrap_or(defaults.cleaned_file_name),
            head_rows: self.head_rows.unwrap_or(defaults.head_rows),
            render_charts: self.render_charts.unwrap_or(defaults.render_charts),
            chart_width: self.chart_width.unwrap_or(defaults.chart_width),
            chart_height: self.chart_height.unwrap_or(defaults.chart_height),
            chart_text: self.chart_text.unwrap_or(defaults.chart_text),
            sleep_bin_edges: self.sleep_bin_edges.unwrap_or(defaults.sleep_bin_edges),
            emit_report: self.emit_report.unwrap_or(defaults.emit_report),
            print_console: self.print_console.unwrap_or(defaults.print_console),
        };

        config.validate()?;
        Ok(config)
    }
}
