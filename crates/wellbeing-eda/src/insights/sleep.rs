//! Sleep duration buckets.

use crate::error::Result;
use crate::types::columns::{SLEEP_BIN, SLEEP_HOURS};
use crate::utils::numeric_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Sleep bucket of one student, bounded by the configured bin edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepBin {
    Short,
    Optimal,
    Long,
}

impl SleepBin {
    pub const ALL: [SleepBin; 3] = [Self::Short, Self::Optimal, Self::Long];

    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "<6h",
            Self::Optimal => "6-8h",
            Self::Long => ">8h",
        }
    }
}

/// Place a sleep duration into a bucket.
///
/// Buckets are open on the low edge and closed on the high edge:
/// `(e0, e1]`, `(e1, e2]`, `(e2, e3]`. Values outside `(e0, e3]` and NaN
/// have no bucket.
pub fn assign_sleep_bin(hours: f64, edges: &[f64; 4]) -> Option<SleepBin> {
    SleepBin::ALL
        .into_iter()
        .zip(edges.windows(2))
        .find(|(_, bounds)| hours > bounds[0] && hours <= bounds[1])
        .map(|(bin, _)| bin)
}

/// Add the `Sleep_Bin` label column to the analysis view.
///
/// Returns the bucket of each row, in row order.
pub fn add_sleep_bin_column(view: &mut DataFrame, edges: &[f64; 4]) -> Result<Vec<Option<SleepBin>>> {
    let bins: Vec<Option<SleepBin>> = numeric_values(view, SLEEP_HOURS)?
        .into_iter()
        .map(|hours| hours.and_then(|h| assign_sleep_bin(h, edges)))
        .collect();

    let labels: Vec<Option<&str>> = bins.iter().map(|b| b.map(SleepBin::label)).collect();
    view.with_column(Series::new(SLEEP_BIN.into(), labels))?;

    Ok(bins)
}
