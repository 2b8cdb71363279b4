//! Data cleaning for the loaded dataset.
//!
//! This module provides functionality for:
//! - Removing exact duplicate rows (first occurrence kept, order preserved)
//! - Filling missing numeric values with per-column medians
//! - Building the encoded analysis view (see [`encoder`])

pub mod encoder;

pub use encoder::{EncodedView, encode_analysis_view};

use crate::error::Result;
use crate::imputers::StatisticalImputer;
use crate::types::{CleaningReport, MedianFill, NUMERIC_COLUMNS};
use crate::utils::{drop_duplicate_rows, total_missing};
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner for the student dataset.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a dataset: drop duplicates, then median-fill numeric columns.
    ///
    /// Medians are computed after duplicate removal, one column at a time in
    /// [`NUMERIC_COLUMNS`] order. Categorical gaps are left as they are.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        info!("Performing data cleaning...");
        let rows_before = df.height();

        let (mut df, duplicates_removed) = Self::remove_duplicates(df)?;
        if duplicates_removed > 0 {
            debug!("Removed {} duplicate rows", duplicates_removed);
        } else {
            debug!("No duplicate rows found");
        }

        let median_fills = Self::fill_numeric_medians(&mut df)?;
        let remaining_missing = total_missing(&df);

        let report = CleaningReport {
            rows_before,
            rows_after: df.height(),
            duplicates_removed,
            median_fills,
            remaining_missing,
            unmapped_labels: 0,
        };

        Ok((df, report))
    }

    /// Remove rows that exactly repeat an earlier row.
    ///
    /// Returns the deduplicated frame and the number of rows removed.
    pub fn remove_duplicates(df: DataFrame) -> Result<(DataFrame, usize)> {
        let deduped = drop_duplicate_rows(&df)?;
        let duplicates = df.height() - deduped.height();
        Ok((deduped, duplicates))
    }

    /// Fill missing values of every numeric column with its median.
    pub fn fill_numeric_medians(df: &mut DataFrame) -> Result<Vec<MedianFill>> {
        let mut fills = Vec::new();
        for col in NUMERIC_COLUMNS {
            if let Some(fill) = StatisticalImputer::apply_numeric_median(df, col)? {
                fills.push(fill);
            }
        }
        Ok(fills)
    }
}
