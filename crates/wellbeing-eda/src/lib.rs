//! Student Wellbeing EDA Library
//!
//! Exploratory data analysis of a student wellbeing dataset, built on Polars.
//!
//! # Overview
//!
//! A single sequential pipeline with four stages:
//!
//! - **Loading**: Fetch the CSV from a URL, a local path or in-memory bytes
//! - **Cleaning**: Remove duplicate rows, median-fill numeric gaps, and build
//!   an encoded analysis view
//! - **Analysis**: Correlations with CGPA, grouped CGPA statistics by stress
//!   level and extracurricular participation, descriptive statistics
//! - **Reporting**: Six written insights with PNG charts, the cleaned CSV,
//!   and an optional JSON run report
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use wellbeing_eda::{AnalysisConfig, DataSource, Pipeline};
//!
//! let config = AnalysisConfig::builder()
//!     .output_dir("outputs")
//!     .emit_report(true)
//!     .build()?;
//!
//! let outcome = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run(&DataSource::parse("student_wellbeing_dataset.csv"))?;
//!
//! for line in outcome.insights.summaries() {
//!     println!("{line}");
//! }
//! ```
//!
//! Or with every default, reading from the published dataset:
//!
//! ```rust,ignore
//! use wellbeing_eda::{DataSource, DEFAULT_DATASET_URL};
//!
//! wellbeing_eda::run(&DataSource::parse(DEFAULT_DATASET_URL), ".")?;
//! ```

pub mod analysis;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod insights;
pub mod loader;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::Analyzer;
pub use cleaner::{DataCleaner, EncodedView, encode_analysis_view};
pub use config::{
    AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, DEFAULT_CLEANED_FILE_NAME,
    DEFAULT_DATASET_URL,
};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use insights::{ChartKind, ChartSpec, InsightSet, SleepBin, derive_insights};
pub use loader::{DataSource, load_dataset};
pub use pipeline::{
    AnalysisStage, ClosureProgressReporter, EdaOutcome, Pipeline, PipelineBuilder,
    ProgressReporter, ProgressUpdate, run,
};
pub use profiler::DataProfiler;
pub use reporting::RunReport;
pub use types::{
    AnalysisResult, CleaningReport, CorrelationEntry, DescriptiveStats, ExplorationSummary,
    Extracurricular, GroupStats, MedianFill, StressLevel,
};
