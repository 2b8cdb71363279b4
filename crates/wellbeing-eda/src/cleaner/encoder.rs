//! Analysis view encoding.
//!
//! The analysis view is a copy of the cleaned dataset where
//! `Extracurricular` becomes {No: 0, Yes: 1}, `Stress_Level` becomes
//! {Low: 0, Medium: 1, High: 2}, and `Student_ID` is dropped.
//!
//! Labels outside those sets are encoded as null rather than rejected.
//! They are counted and logged, nothing more.

use crate::error::Result;
use crate::types::columns::{EXTRACURRICULAR, STRESS_LEVEL, STUDENT_ID};
use crate::types::{Extracurricular, StressLevel};
use crate::utils::string_values;
use polars::prelude::*;
use tracing::{info, warn};

/// Encoded, identifier-free copy of the cleaned dataset.
#[derive(Debug, Clone)]
pub struct EncodedView {
    pub frame: DataFrame,
    /// Non-null labels that had no code and became null.
    pub unmapped_labels: usize,
}

/// Encode one categorical column with the given label parser.
fn encode_column(
    df: &DataFrame,
    name: &str,
    encode: impl Fn(&str) -> Option<i32>,
) -> Result<(Series, usize)> {
    let mut unmapped = 0;
    let codes: Vec<Option<i32>> = string_values(df, name)?
        .iter()
        .map(|label| match label {
            Some(label) => {
                let code = encode(label);
                if code.is_none() {
                    unmapped += 1;
                }
                code
            }
            None => None,
        })
        .collect();

    if unmapped > 0 {
        warn!(
            "{} value(s) in '{}' have no numeric code and were encoded as null",
            unmapped, name
        );
    }

    Ok((Series::new(name.into(), codes), unmapped))
}

/// Build the analysis view from a cleaned dataset.
///
/// The input frame is not modified.
pub fn encode_analysis_view(df: &DataFrame) -> Result<EncodedView> {
    info!("Encoding categorical columns for analysis...");
    let mut view = df.clone();

    let (extra, extra_unmapped) = encode_column(df, EXTRACURRICULAR, |label| {
        Extracurricular::from_label(label).map(Extracurricular::code)
    })?;
    let (stress, stress_unmapped) = encode_column(df, STRESS_LEVEL, |label| {
        StressLevel::from_label(label).map(StressLevel::code)
    })?;

    view.replace(EXTRACURRICULAR, extra)?;
    view.replace(STRESS_LEVEL, stress)?;
    let view = view.drop(STUDENT_ID)?;

    Ok(EncodedView {
        frame: view,
        unmapped_labels: extra_unmapped + stress_unmapped,
    })
}
