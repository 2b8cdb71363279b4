//! Dataset exploration for the raw, freshly loaded data.
//!
//! The profiler only reads: it reports shape, schema, missing counts,
//! duplicates, category labels and numeric summaries. Nothing it computes
//! feeds into later stages.

pub mod statistics;

use crate::error::Result;
use crate::types::columns::{EXTRACURRICULAR, STRESS_LEVEL};
use crate::types::{ColumnInfo, DescriptiveStats, ExplorationSummary};
use crate::utils::{
    count_duplicates, is_numeric_dtype, require_column, string_values, unique_in_order,
};
use polars::prelude::*;
use tracing::debug;

/// Exploration diagnostics over a loaded dataset.
pub struct DataProfiler;

impl DataProfiler {
    /// Gather the exploration summary of a dataset.
    pub fn explore(df: &DataFrame) -> Result<ExplorationSummary> {
        let columns: Vec<ColumnInfo> = df
            .get_columns()
            .iter()
            .map(|c| ColumnInfo {
                name: c.name().to_string(),
                dtype: c.dtype().to_string(),
                non_null_count: c.len() - c.null_count(),
            })
            .collect();

        let missing_counts: Vec<(String, usize)> = df
            .get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect();

        let duplicate_rows = count_duplicates(df)?;
        debug!("Found {} duplicate rows", duplicate_rows);

        let extracurricular_values = unique_in_order(&string_values(df, EXTRACURRICULAR)?);
        let stress_level_values = unique_in_order(&string_values(df, STRESS_LEVEL)?);

        Ok(ExplorationSummary {
            shape: df.shape(),
            columns,
            missing_counts,
            duplicate_rows,
            extracurricular_values,
            stress_level_values,
            numeric_stats: Self::describe_numeric(df)?,
        })
    }

    /// Descriptive statistics for every numeric column, in schema order.
    pub fn describe_numeric(df: &DataFrame) -> Result<Vec<DescriptiveStats>> {
        df.get_columns()
            .iter()
            .filter(|c| is_numeric_dtype(c.dtype()))
            .map(|c| statistics::describe(c.as_materialized_series()))
            .collect()
    }

    /// Descriptive statistics for selected columns, rounded to 2 decimals.
    pub fn describe_columns(df: &DataFrame, names: &[&str]) -> Result<Vec<DescriptiveStats>> {
        names
            .iter()
            .map(|name| {
                let series = require_column(df, name)?.as_materialized_series();
                Ok(statistics::describe(series)?.rounded())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame() -> DataFrame {
        df![
            "Student_ID" => [1i64, 2, 3, 3],
            "Hours_Study" => [Some(2.0), None, Some(4.0), Some(4.0)],
            "Extracurricular" => [Some("Yes"), Some("No"), None, None],
            "Stress_Level" => [Some("High"), Some("Low"), Some("High"), Some("High")],
        ]
        .unwrap()
    }

    #[test]
    fn test_explore_shape_and_missing() {
        let summary = DataProfiler::explore(&raw_frame()).unwrap();
        assert_eq!(summary.shape, (4, 4));
        assert_eq!(
            summary.missing_counts,
            vec![
                ("Hours_Study".to_string(), 1),
                ("Extracurricular".to_string(), 2)
            ]
        );
        assert_eq!(summary.duplicate_rows, 1);
    }

    #[test]
    fn test_explore_column_info() {
        let summary = DataProfiler::explore(&raw_frame()).unwrap();
        let hours = &summary.columns[1];
        assert_eq!(hours.name, "Hours_Study");
        assert_eq!(hours.non_null_count, 3);
    }

    #[test]
    fn test_explore_category_values_first_seen() {
        let summary = DataProfiler::explore(&raw_frame()).unwrap();
        assert_eq!(
            summary.extracurricular_values,
            vec![Some("Yes".to_string()), Some("No".to_string()), None]
        );
        assert_eq!(
            summary.stress_level_values,
            vec![Some("High".to_string()), Some("Low".to_string())]
        );
    }

    #[test]
    fn test_describe_numeric_skips_text_columns() {
        let stats = DataProfiler::describe_numeric(&raw_frame()).unwrap();
        let names: Vec<&str> = stats.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(names, vec!["Student_ID", "Hours_Study"]);
        assert_eq!(stats[1].count, 3);
    }

    #[test]
    fn test_describe_columns_rounds() {
        let df = df!["x" => [1.0, 2.0, 2.0]].unwrap();
        let stats = DataProfiler::describe_columns(&df, &["x"]).unwrap();
        assert_eq!(stats[0].mean, 1.67);
        assert_eq!(stats[0].std, 0.58);
    }
}
