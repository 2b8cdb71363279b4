//! Custom error types for the wellbeing analysis pipeline.
//!
//! This module provides the error hierarchy using `thiserror` so every stage
//! (loading, cleaning, analysis, reporting) can propagate failures with `?`.
//!
//! Errors are serializable so the JSON run report and `--json` output can
//! carry them in a stable `{code, message}` shape.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum EdaError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The loaded dataset is missing one or more expected columns.
    #[error("Dataset is missing expected columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The dataset has no rows to analyze.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// The data source could not be read.
    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A chart could not be rendered or saved.
    #[error("Failed to render chart '{chart}': {reason}")]
    ChartFailed { chart: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error while downloading the dataset.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code, used in the JSON report.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::SourceUnavailable(_) => "SOURCE_UNAVAILABLE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ChartFailed { .. } => "CHART_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Http(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error happened before any data was available.
    pub fn is_source_error(&self) -> bool {
        match self {
            Self::SourceUnavailable(_) | Self::Http(_) => true,
            Self::WithContext { source, .. } => source.is_source_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl EdaError {
    /// Pretty JSON document `{"error": {"code", "message"}}` for machine
    /// consumers of a failed run.
    pub fn failure_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({ "error": self }))
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Io(e).with_context(context))
    }
}
