//! Progress reporting for the analysis pipeline.
//!
//! The pipeline runs to completion on the calling thread; reporters only
//! observe it. There is no cancellation.
//!
//! # Example
//!
//! ```rust,ignore
//! use wellbeing_eda::{DataSource, Pipeline};
//!
//! let outcome = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run(&DataSource::parse("students.csv"))?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the analysis pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Fetching and parsing the CSV
    Loading,
    /// Gathering exploration diagnostics on the raw data
    Exploring,
    /// Removing duplicates and median-filling numeric gaps
    Cleaning,
    /// Building the encoded analysis view
    Encoding,
    /// Correlations, grouped aggregates and key statistics
    Analyzing,
    /// Deriving insights and rendering charts
    Insights,
    /// Writing the cleaned CSV and run report
    Exporting,
    Complete,
    Failed,
}

impl AnalysisStage {
    /// Stages that do work, in order.
    pub const ORDERED: [AnalysisStage; 7] = [
        Self::Loading,
        Self::Exploring,
        Self::Cleaning,
        Self::Encoding,
        Self::Analyzing,
        Self::Insights,
        Self::Exporting,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Dataset",
            Self::Exploring => "Exploring Data",
            Self::Cleaning => "Cleaning Data",
            Self::Encoding => "Encoding Categories",
            Self::Analyzing => "Analyzing",
            Self::Insights => "Deriving Insights",
            Self::Exporting => "Exporting Results",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the overall run taken by this stage (0.0 - 1.0).
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.15,
            Self::Exploring => 0.10,
            Self::Cleaning => 0.10,
            Self::Encoding => 0.05,
            Self::Analyzing => 0.15,
            Self::Insights => 0.30,
            Self::Exporting => 0.15,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Exploring => 0.15,
            Self::Cleaning => 0.25,
            Self::Encoding => 0.35,
            Self::Analyzing => 0.40,
            Self::Insights => 0.55,
            Self::Exporting => 0.85,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// One progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: AnalysisStage,
    /// Overall progress (0.0 - 1.0)
    pub progress: f32,
    /// Progress within the current stage (0.0 - 1.0)
    pub stage_progress: f32,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: AnalysisStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let stage_progress = stage_progress.clamp(0.0, 1.0);
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress,
            message: message.into(),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Complete,
            progress: 1.0,
            stage_progress: 1.0,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Failed,
            progress: 0.0,
            stage_progress: 0.0,
            message: message.into(),
        }
    }
}

/// Receiver of progress updates.
///
/// Implementations must be `Send + Sync` so a pipeline can be moved to a
/// worker thread together with its reporter.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
