//! Shared utilities for the analysis pipeline.
//!
//! Column extraction into plain vectors, missing-value markers, and
//! full-row duplicate handling used by both the profiler and the cleaner.

use crate::error::{EdaError, Result};
use polars::prelude::*;
use std::collections::HashSet;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Missing Value Markers
// =============================================================================

/// Text read as a missing value in any column.
pub const MISSING_MARKERS: [&str; 9] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None",
];

/// Check if a raw cell is a missing-value marker.
///
/// # Example
///
/// ```rust,ignore
/// assert!(is_missing_marker("N/A"));
/// assert!(!is_missing_marker("Medium"));
/// ```
pub fn is_missing_marker(s: &str) -> bool {
    let trimmed = s.trim();
    MISSING_MARKERS.iter().any(|&marker| trimmed == marker)
}

// =============================================================================
// Column Extraction
// =============================================================================

/// Look up a column, mapping absence to [`EdaError::ColumnNotFound`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
}

/// Extract a column as `f64` values, keeping nulls as `None`.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = require_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Extract a column as owned strings, keeping nulls as `None`.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = require_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Extract an encoded category column as `i32` codes.
pub fn code_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>> {
    let series = require_column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    Ok(series.i32()?.into_iter().collect())
}

/// Distinct values in first-seen order.
pub fn unique_in_order(values: &[Option<String>]) -> Vec<Option<String>> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert((*v).clone()))
        .cloned()
        .collect()
}

// =============================================================================
// Duplicate Detection
// =============================================================================

/// Drop rows that exactly repeat an earlier row.
///
/// Null equals null. The first occurrence is kept and row order is
/// preserved.
pub fn drop_duplicate_rows(df: &DataFrame) -> Result<DataFrame> {
    Ok(df.unique_stable(None, UniqueKeepStrategy::First, None)?)
}

/// Count rows that repeat an earlier row exactly.
pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
    Ok(df.height() - drop_duplicate_rows(df)?.height())
}

/// Total number of missing values across all columns.
pub fn total_missing(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|c| c.null_count()).sum()
}
