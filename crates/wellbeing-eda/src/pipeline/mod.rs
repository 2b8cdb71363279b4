//! Pipeline module.
//!
//! Wires the loader, cleaner, analyzer and reporter into one sequential run.

mod builder;
pub mod progress;

pub use builder::{EdaOutcome, Pipeline, PipelineBuilder};
pub use progress::{AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader::DataSource;
use std::path::PathBuf;

/// Run the full analysis with default settings, writing into `output_dir`.
pub fn run(source: &DataSource, output_dir: impl Into<PathBuf>) -> Result<EdaOutcome> {
    let config = AnalysisConfig::builder().output_dir(output_dir).build()?;
    Pipeline::builder().config(config).build()?.run(source)
}
