//! Statistical analysis over the encoded analysis view.
//!
//! Every computation here is a pure read of the view:
//! - Pearson correlation of each study/lifestyle feature against CGPA
//! - CGPA mean/count/std per stress level and per extracurricular group
//! - Rounded descriptive statistics for the key features

pub mod grouping;

use crate::error::Result;
use crate::profiler::DataProfiler;
use crate::profiler::statistics::pearson;
use crate::types::columns::{CGPA, EXTRACURRICULAR, STRESS_LEVEL};
use crate::types::{
    AnalysisResult, CORRELATION_FEATURES, CorrelationEntry, Extracurricular, KEY_STAT_COLUMNS,
    StressLevel,
};
use crate::utils::require_column;
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Runs the analysis stage.
pub struct Analyzer;

impl Analyzer {
    /// Compute correlations, grouped aggregates and key statistics.
    pub fn analyze(view: &DataFrame) -> Result<AnalysisResult> {
        info!("Analyzing {} rows...", view.height());

        let correlations = Self::correlations_with_target(view, &CORRELATION_FEATURES, CGPA)?;
        for entry in &correlations {
            debug!("corr({}, {}) = {:.4}", entry.column, CGPA, entry.correlation);
        }

        let stress_groups = grouping::aggregate_by_code(view, STRESS_LEVEL, CGPA, |code| {
            StressLevel::from_code(code)
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| code.to_string())
        })?;
        let extracurricular_groups =
            grouping::aggregate_by_code(view, EXTRACURRICULAR, CGPA, |code| {
                Extracurricular::from_code(code)
                    .map(|e| e.label().to_string())
                    .unwrap_or_else(|| code.to_string())
            })?;

        let key_stats = DataProfiler::describe_columns(view, &KEY_STAT_COLUMNS)?;

        Ok(AnalysisResult {
            correlations,
            stress_groups,
            extracurricular_groups,
            key_stats,
        })
    }

    /// Correlation of each feature with the target, sorted descending.
    ///
    /// NaN correlations (constant columns) sort last.
    pub fn correlations_with_target(
        view: &DataFrame,
        features: &[&str],
        target: &str,
    ) -> Result<Vec<CorrelationEntry>> {
        let target_values = require_column(view, target)?.as_materialized_series();
        let mut entries = features
            .iter()
            .map(|feature| {
                let values = require_column(view, feature)?.as_materialized_series();
                Ok(CorrelationEntry {
                    column: feature.to_string(),
                    correlation: pearson(values, target_values)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        entries.sort_by(|a, b| descending_nan_last(a.correlation, b.correlation));
        Ok(entries)
    }
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}
