//! The six written insights and the charts that illustrate them.
//!
//! Each insight is computed independently from the analysis view (and, for
//! the grouped ones, from the analyzer's aggregates). Insights only carry
//! numbers, their sentence, and a [`ChartSpec`]; drawing and printing happen
//! in [`crate::reporting`].
//!
//! | # | Statistic | Chart |
//! |---|-----------|-------|
//! | 1 | corr(Hours_Study, CGPA) | scatter |
//! | 2 | mean CGPA per sleep bucket | bar |
//! | 3 | mean CGPA at or below / above median screen time | bar |
//! | 4 | corr(Attendance, CGPA) | scatter |
//! | 5 | mean CGPA for Low vs High stress | bar (all three levels) |
//! | 6 | Yes minus No extracurricular mean CGPA | bar |

pub mod chart;
pub mod sleep;

pub use chart::{CHART_FILES, ChartKind, ChartSpec};
pub use sleep::{SleepBin, add_sleep_bin_column, assign_sleep_bin};

use crate::error::Result;
use crate::profiler::statistics::{pearson, round2};
use crate::types::columns::{ATTENDANCE, CGPA, HOURS_STUDY, SCREEN_TIME};
use crate::types::{AnalysisResult, Extracurricular, StressLevel};
use crate::utils::{numeric_values, require_column};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

// =============================================================================
// Insight Types
// =============================================================================

/// Correlation of one feature with CGPA, plotted as a scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationInsight {
    pub feature: String,
    pub correlation: f64,
    #[serde(skip)]
    pub points: Vec<(f64, f64)>,
}

/// Rounded mean CGPA of one sleep bucket. NaN when the bucket is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepBinMean {
    pub bin: SleepBin,
    pub label: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepBinInsight {
    /// All three buckets, in `<6h`, `6-8h`, `>8h` order.
    pub bins: Vec<SleepBinMean>,
    /// Bucket with the highest mean, if any bucket has data.
    pub best: Option<SleepBin>,
}

/// CGPA on either side of the median screen time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenTimeInsight {
    pub median: f64,
    /// Rows with screen time at or below the median.
    pub low_mean: f64,
    pub low_count: usize,
    /// Rows with screen time strictly above the median.
    pub high_mean: f64,
    pub high_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressInsight {
    pub low_mean: f64,
    pub high_mean: f64,
    /// Mean per level (Low, Medium, High) for the chart.
    pub level_means: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtracurricularInsight {
    pub no_mean: f64,
    pub yes_mean: f64,
    /// `yes_mean - no_mean`
    pub difference: f64,
}

/// The six insights, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSet {
    pub study: CorrelationInsight,
    pub sleep: SleepBinInsight,
    pub screen_time: ScreenTimeInsight,
    pub attendance: CorrelationInsight,
    pub stress: StressInsight,
    pub extracurricular: ExtracurricularInsight,
}

// =============================================================================
// Derivation
// =============================================================================

/// Derive all six insights.
///
/// Adds the `Sleep_Bin` column to `view` as a side effect.
pub fn derive_insights(
    view: &mut DataFrame,
    analysis: &AnalysisResult,
    sleep_bin_edges: &[f64; 4],
) -> Result<InsightSet> {
    info!("Deriving insights...");

    let study = correlation_insight(view, HOURS_STUDY)?;
    let sleep = sleep_insight(view, sleep_bin_edges)?;
    let screen_time = screen_time_insight(view)?;
    let attendance = correlation_insight(view, ATTENDANCE)?;
    let stress = stress_insight(analysis);
    let extracurricular = extracurricular_insight(analysis);

    debug!(
        "Insights: study corr {:.3}, attendance corr {:.3}, screen median {}",
        study.correlation, attendance.correlation, screen_time.median
    );

    Ok(InsightSet {
        study,
        sleep,
        screen_time,
        attendance,
        stress,
        extracurricular,
    })
}

fn correlation_insight(view: &DataFrame, feature: &str) -> Result<CorrelationInsight> {
    let x = numeric_values(view, feature)?;
    let y = numeric_values(view, CGPA)?;
    let points = x
        .iter()
        .zip(&y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    Ok(CorrelationInsight {
        feature: feature.to_string(),
        correlation: pearson(
            require_column(view, feature)?.as_materialized_series(),
            require_column(view, CGPA)?.as_materialized_series(),
        )?,
        points,
    })
}

/// Mean and non-null count of `values` where `mask` is true.
fn masked_mean(values: &Series, mask: &BooleanChunked) -> Result<(f64, usize)> {
    let selected = values.filter(mask)?;
    let mean = selected.mean().unwrap_or(f64::NAN);
    Ok((mean, selected.len() - selected.null_count()))
}

fn float_column(view: &DataFrame, name: &str) -> Result<Series> {
    Ok(require_column(view, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?)
}

fn sleep_insight(view: &mut DataFrame, edges: &[f64; 4]) -> Result<SleepBinInsight> {
    let assigned = add_sleep_bin_column(view, edges)?;
    let cgpa = float_column(view, CGPA)?;

    let bins = SleepBin::ALL
        .into_iter()
        .map(|bin| {
            let mask: BooleanChunked = assigned.iter().map(|b| Some(*b == Some(bin))).collect();
            let (mean, count) = masked_mean(&cgpa, &mask)?;
            Ok(SleepBinMean {
                bin,
                label: bin.label().to_string(),
                mean: round2(mean),
                count,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let best = bins
        .iter()
        .filter(|b| !b.mean.is_nan())
        .fold(None::<&SleepBinMean>, |best, b| match best {
            Some(current) if current.mean >= b.mean => Some(current),
            _ => Some(b),
        })
        .map(|b| b.bin);

    Ok(SleepBinInsight { bins, best })
}

fn screen_time_insight(view: &DataFrame) -> Result<ScreenTimeInsight> {
    let screen = float_column(view, SCREEN_TIME)?;
    let cgpa = float_column(view, CGPA)?;
    let median = screen.median().unwrap_or(f64::NAN);

    let (low_mean, low_count) = masked_mean(&cgpa, &screen.lt_eq(median)?)?;
    let (high_mean, high_count) = masked_mean(&cgpa, &screen.gt(median)?)?;

    Ok(ScreenTimeInsight {
        median,
        low_mean: round2(low_mean),
        low_count,
        high_mean: round2(high_mean),
        high_count,
    })
}

fn stress_insight(analysis: &AnalysisResult) -> StressInsight {
    StressInsight {
        low_mean: analysis.stress_mean(StressLevel::Low),
        high_mean: analysis.stress_mean(StressLevel::High),
        level_means: StressLevel::ALL
            .into_iter()
            .map(|level| {
                (
                    format!("{} ({})", level.label(), level.code()),
                    analysis.stress_mean(level),
                )
            })
            .collect(),
    }
}

fn extracurricular_insight(analysis: &AnalysisResult) -> ExtracurricularInsight {
    let no_mean = analysis.extracurricular_mean(Extracurricular::No);
    let yes_mean = analysis.extracurricular_mean(Extracurricular::Yes);
    ExtracurricularInsight {
        no_mean,
        yes_mean,
        difference: yes_mean - no_mean,
    }
}

// =============================================================================
// Sentences and Charts
// =============================================================================

impl InsightSet {
    /// The printed interpretation of each insight, in order.
    pub fn summaries(&self) -> Vec<String> {
        let sleep_table: String = self
            .sleep
            .bins
            .iter()
            .map(|b| format!("\n   {:<5} {}", b.label, b.mean))
            .collect();
        let sleep_verdict = match self.sleep.best {
            Some(best) => format!("   - Optimal sleep ({}) yields the highest CGPA.", best.label()),
            None => "   - No sleep bucket has CGPA data.".to_string(),
        };

        vec![
            format!(
                "1. Hours_Study strongly correlate with CGPA (correlation: {:.3}). Higher study time links to better grades.",
                self.study.correlation
            ),
            format!("2. Average CGPA by Sleep Bins:{}\n{}", sleep_table, sleep_verdict),
            format!(
                "3. High screen time (>median {:.1}h) CGPA: {} vs Low: {}. More screen time lowers performance.",
                self.screen_time.median, self.screen_time.high_mean, self.screen_time.low_mean
            ),
            format!(
                "4. Attendance has a strong positive correlation with CGPA ({:.3}). Regular attendance boosts grades.",
                self.attendance.correlation
            ),
            format!(
                "5. Low stress students average {:.2} CGPA vs High stress: {:.2}. Managing stress improves outcomes.",
                self.stress.low_mean, self.stress.high_mean
            ),
            format!(
                "6. Students with extracurriculars have {:.2} higher average CGPA than those without.",
                self.extracurricular.difference
            ),
        ]
    }

    /// One chart per insight, in order.
    pub fn charts(&self) -> Vec<ChartSpec> {
        vec![
            ChartSpec {
                file_name: chart::STUDY_CHART_FILE,
                title: format!("Hours_Study vs CGPA (Corr: {:.3})", self.study.correlation),
                x_label: Some(HOURS_STUDY.to_string()),
                y_label: CGPA.to_string(),
                kind: ChartKind::Scatter {
                    points: self.study.points.clone(),
                },
            },
            ChartSpec {
                file_name: chart::SLEEP_CHART_FILE,
                title: "Average CGPA by Sleep Bins".to_string(),
                x_label: Some("Sleep_Hours".to_string()),
                y_label: "Average CGPA".to_string(),
                kind: ChartKind::Bar {
                    bars: self
                        .sleep
                        .bins
                        .iter()
                        .map(|b| (b.label.clone(), b.mean))
                        .collect(),
                },
            },
            ChartSpec {
                file_name: chart::SCREEN_CHART_FILE,
                title: "CGPA by Screen_Time Level".to_string(),
                x_label: None,
                y_label: "Average CGPA".to_string(),
                kind: ChartKind::Bar {
                    bars: vec![
                        ("Low Screen Time".to_string(), self.screen_time.low_mean),
                        ("High Screen Time".to_string(), self.screen_time.high_mean),
                    ],
                },
            },
            ChartSpec {
                file_name: chart::ATTENDANCE_CHART_FILE,
                title: format!("Attendance vs CGPA (Corr: {:.3})", self.attendance.correlation),
                x_label: Some("Attendance (%)".to_string()),
                y_label: CGPA.to_string(),
                kind: ChartKind::Scatter {
                    points: self.attendance.points.clone(),
                },
            },
            ChartSpec {
                file_name: chart::STRESS_CHART_FILE,
                title: "Average CGPA by Stress_Level".to_string(),
                x_label: None,
                y_label: "Average CGPA".to_string(),
                kind: ChartKind::Bar {
                    bars: self.stress.level_means.clone(),
                },
            },
            ChartSpec {
                file_name: chart::EXTRACURRICULAR_CHART_FILE,
                title: "Average CGPA by Extracurricular".to_string(),
                x_label: None,
                y_label: "Average CGPA".to_string(),
                kind: ChartKind::Bar {
                    bars: Extracurricular::ALL
                        .into_iter()
                        .map(|v| {
                            (
                                format!("{} ({})", v.label(), v.code()),
                                if v == Extracurricular::Yes {
                                    self.extracurricular.yes_mean
                                } else {
                                    self.extracurricular.no_mean
                                },
                            )
                        })
                        .collect(),
                },
            },
        ]
    }
}
