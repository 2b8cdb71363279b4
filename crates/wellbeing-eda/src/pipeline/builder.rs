//! The analysis pipeline and its builder.

use crate::analysis::Analyzer;
use crate::cleaner::{DataCleaner, encode_analysis_view};
use crate::config::{AnalysisConfig, ConfigValidationError};
use crate::error::{Result, ResultExt};
use crate::insights::{InsightSet, derive_insights};
use crate::loader::{DataSource, load_dataset};
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::profiler::DataProfiler;
use crate::reporting::{ChartOptions, RunReport, console, export_cleaned_csv, render_charts, write_report};
use crate::types::{AnalysisResult, CleaningReport, ExplorationSummary};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct EdaOutcome {
    /// Display form of the data source.
    pub source: String,
    pub exploration: ExplorationSummary,
    pub cleaning: CleaningReport,
    pub analysis: AnalysisResult,
    pub insights: InsightSet,
    /// Cleaned dataset with original labels, as exported.
    pub cleaned: DataFrame,
    /// Encoded view, including the derived `Sleep_Bin` column.
    pub analysis_view: DataFrame,
    /// Charts, cleaned CSV and (optionally) the run report, in write order.
    pub written_files: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl EdaOutcome {
    /// Serializable summary of this run, stamped with the current time.
    pub fn to_report(&self) -> RunReport {
        RunReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: self.source.clone(),
            exploration: self.exploration.clone(),
            cleaning: self.cleaning.clone(),
            analysis: self.analysis.clone(),
            insights: self.insights.clone(),
            insight_summaries: self.insights.summaries(),
            written_files: self.written_files.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

/// The load, clean, analyze and report pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use wellbeing_eda::{AnalysisConfig, DataSource, Pipeline};
///
/// let config = AnalysisConfig::builder()
///     .output_dir("out")
///     .render_charts(false)
///     .build()?;
///
/// let outcome = Pipeline::builder()
///     .config(config)
///     .build()?
///     .run(&DataSource::parse("students.csv"))?;
///
/// println!("{} rows after cleaning", outcome.cleaning.rows_after);
/// ```
pub struct Pipeline {
    config: AnalysisConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: DataCleaner,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every stage against `source`.
    ///
    /// Any failure aborts the run; files already written stay on disk.
    pub fn run(&self, source: &DataSource) -> Result<EdaOutcome> {
        match self.run_internal(source) {
            Ok(outcome) => {
                self.report_progress(ProgressUpdate::complete("Analysis completed successfully"));
                Ok(outcome)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn enter(&self, stage: AnalysisStage, message: &str) {
        info!("{}", message);
        self.report_progress(ProgressUpdate::new(stage, 0.0, message));
    }

    fn run_internal(&self, source: &DataSource) -> Result<EdaOutcome> {
        let start_time = Instant::now();
        let config = &self.config;
        let mut written_files = Vec::new();

        self.enter(AnalysisStage::Loading, "Loading dataset...");
        let raw = load_dataset(source).context(format!("Loading {}", source))?;

        self.enter(AnalysisStage::Exploring, "Exploring raw dataset...");
        let exploration = DataProfiler::explore(&raw)?;
        if config.print_console {
            console::print_exploration(&exploration, &raw, config.head_rows);
        }

        self.enter(AnalysisStage::Cleaning, "Cleaning dataset...");
        let (cleaned, mut cleaning) = self.cleaner.clean(raw)?;

        self.enter(AnalysisStage::Encoding, "Encoding analysis view...");
        let encoded = encode_analysis_view(&cleaned)?;
        cleaning.unmapped_labels = encoded.unmapped_labels;
        let mut view = encoded.frame;
        if config.print_console {
            console::print_cleaning(&cleaning, cleaned.width());
        }

        self.enter(AnalysisStage::Analyzing, "Analyzing...");
        let analysis = Analyzer::analyze(&view).context("Analyzing dataset")?;
        if config.print_console {
            console::print_analysis(&analysis);
        }

        self.enter(AnalysisStage::Insights, "Deriving insights...");
        let insights = derive_insights(&mut view, &analysis, &config.sleep_bin_edges)?;
        if config.print_console {
            console::print_insights(&insights);
        }

        std::fs::create_dir_all(&config.output_dir)
            .context(format!("Creating {}", config.output_dir.display()))?;

        if config.render_charts {
            let charts = render_charts(
                &insights.charts(),
                &config.output_dir,
                ChartOptions::from_config(config),
            )?;
            info!("Rendered {} charts", charts.len());
            written_files.extend(charts);
        } else {
            warn!("Chart rendering disabled; no PNG files written");
        }

        self.enter(AnalysisStage::Exporting, "Exporting cleaned dataset...");
        let cleaned_path = config.cleaned_output_path();
        export_cleaned_csv(&cleaned, &cleaned_path)?;
        written_files.push(cleaned_path.clone());
        if config.print_console {
            console::print_export(&cleaned, &cleaned_path, config.head_rows);
        }

        let report_path = config.report_output_path();
        if config.emit_report {
            written_files.push(report_path.clone());
        }

        let outcome = EdaOutcome {
            source: source.to_string(),
            exploration,
            cleaning,
            analysis,
            insights,
            cleaned,
            analysis_view: view,
            written_files,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        if config.emit_report {
            write_report(&outcome.to_report(), &report_path)?;
        }

        info!("Analysis finished in {} ms", outcome.duration_ms);
        Ok(outcome)
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<AnalysisConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            cleaner: DataCleaner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
Student_ID,Hours_Study,Sleep_Hours,Screen_Time,Attendance,CGPA,Extracurricular,Stress_Level
1,2.0,5.0,5.0,60,2.4,No,High
2,4.0,7.0,3.0,80,3.1,Yes,Medium
2,4.0,7.0,3.0,80,3.1,Yes,Medium
3,,7.5,2.0,90,3.5,Yes,Low
4,6.0,9.0,1.0,95,3.8,No,Low
";

    fn quiet_config(dir: &TempDir) -> AnalysisConfig {
        AnalysisConfig::builder()
            .output_dir(dir.path())
            .render_charts(false)
            .print_console(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = Pipeline::builder().build().unwrap();
        assert_eq!(pipeline.config(), &AnalysisConfig::default());
        assert!(pipeline.progress_reporter.is_none());
    }

    #[test]
    fn test_pipeline_builder_rejects_invalid_config() {
        let config = AnalysisConfig {
            head_rows: 0,
            ..AnalysisConfig::default()
        };
        assert!(Pipeline::builder().config(config).build().is_err());
    }

    #[test]
    fn test_run_reports_stages_in_order() {
        let dir = TempDir::new().unwrap();
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();

        let pipeline = Pipeline::builder()
            .config(quiet_config(&dir))
            .on_progress(move |update| stages_clone.lock().unwrap().push(update.stage))
            .build()
            .unwrap();

        pipeline
            .run(&DataSource::Bytes(SAMPLE.as_bytes().to_vec()))
            .unwrap();

        let mut expected = AnalysisStage::ORDERED.to_vec();
        expected.push(AnalysisStage::Complete);
        assert_eq!(*stages.lock().unwrap(), expected);
    }

    #[test]
    fn test_run_outcome() {
        let dir = TempDir::new().unwrap();
        let outcome = Pipeline::builder()
            .config(quiet_config(&dir))
            .build()
            .unwrap()
            .run(&DataSource::Bytes(SAMPLE.as_bytes().to_vec()))
            .unwrap();

        assert_eq!(outcome.exploration.duplicate_rows, 1);
        assert_eq!(outcome.cleaning.rows_after, 4);
        assert_eq!(outcome.cleaning.median_fills[0].median, 4.0);
        assert_eq!(outcome.cleaned.width(), 8);
        assert!(outcome.analysis_view.column("Student_ID").is_err());
        assert!(outcome.analysis_view.column("Sleep_Bin").is_ok());
        assert_eq!(outcome.written_files, vec![dir.path().join("cleaned_student_data.csv")]);
    }

    #[test]
    fn test_run_failure_reports_failed_stage() {
        let dir = TempDir::new().unwrap();
        let last = Arc::new(Mutex::new(None));
        let last_clone = last.clone();

        let pipeline = Pipeline::builder()
            .config(quiet_config(&dir))
            .on_progress(move |update| *last_clone.lock().unwrap() = Some(update.stage))
            .build()
            .unwrap();

        let result = pipeline.run(&DataSource::Bytes(b"Student_ID,CGPA\n1,3.0\n".to_vec()));

        assert!(result.is_err());
        assert_eq!(*last.lock().unwrap(), Some(AnalysisStage::Failed));
    }

    #[test]
    fn test_run_writes_report_when_enabled() {
        let dir = TempDir::new().unwrap();
        let config = AnalysisConfig::builder()
            .output_dir(dir.path())
            .render_charts(false)
            .print_console(false)
            .emit_report(true)
            .build()
            .unwrap();

        let outcome = Pipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .run(&DataSource::Bytes(SAMPLE.as_bytes().to_vec()))
            .unwrap();

        let report_path = dir.path().join("eda_report.json");
        assert!(outcome.written_files.contains(&report_path));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(json["cleaning"]["duplicates_removed"], 1);
        assert_eq!(json["insight_summaries"].as_array().unwrap().len(), 6);
    }
}
