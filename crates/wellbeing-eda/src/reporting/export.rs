//! File outputs: the cleaned CSV and the JSON run report.

use crate::error::{Result, ResultExt};
use crate::insights::InsightSet;
use crate::types::{AnalysisResult, CleaningReport, ExplorationSummary};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the cleaned dataset as CSV with a header row and no index column.
///
/// Missing categorical labels are written as empty fields.
pub fn export_cleaned_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).context(format!("Creating {}", path.display()))?;
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .context(format!("Writing {}", path.display()))?;
    info!("Exported {} rows to {}", df.height(), path.display());
    Ok(())
}

/// Machine-readable summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub source: String,
    pub exploration: ExplorationSummary,
    pub cleaning: CleaningReport,
    pub analysis: AnalysisResult,
    pub insights: InsightSet,
    pub insight_summaries: Vec<String>,
    pub written_files: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the run report as pretty-printed JSON.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    std::fs::write(path, report.to_json()?).context(format!("Writing {}", path.display()))?;
    info!("Run report written to {}", path.display());
    Ok(())
}
