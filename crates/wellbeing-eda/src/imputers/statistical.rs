//! Statistical imputation methods.
//!
//! Median imputation for numeric columns.

use crate::error::{EdaError, Result};
use crate::types::MedianFill;
use crate::utils::require_column;
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing values of a numeric column with the column median.
    ///
    /// The median is taken over the current non-null values. Returns `None`
    /// when the column has no missing values and is left untouched.
    ///
    /// # Errors
    ///
    /// [`EdaError::ColumnNotFound`] if the column is absent, and
    /// [`EdaError::NoValidValues`] if every value is missing.
    pub fn apply_numeric_median(df: &mut DataFrame, col_name: &str) -> Result<Option<MedianFill>> {
        let series = require_column(df, col_name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let missing = series.null_count();
        if missing == 0 {
            return Ok(None);
        }

        let median_val = series
            .median()
            .ok_or_else(|| EdaError::NoValidValues(col_name.to_string()))?;

        Self::fill_with_value(df, col_name, median_val, &series)?;
        debug!(
            "Filled {} missing values in '{}' with median {}",
            missing, col_name, median_val
        );

        Ok(Some(MedianFill {
            column: col_name.to_string(),
            median: median_val,
            filled_count: missing,
        }))
    }

    /// Replace a numeric column with its values, nulls set to `fill_value`.
    fn fill_with_value(
        df: &mut DataFrame,
        col_name: &str,
        fill_value: f64,
        series: &Series,
    ) -> Result<()> {
        let filled = series.f64()?.fill_null_with_values(fill_value)?;
        df.replace(col_name, filled.into_series())?;
        Ok(())
    }
}
