//! Core types for the wellbeing analysis.
//!
//! Column names, the two categorical encodings, and the serializable results
//! produced by each pipeline stage.

use serde::{Deserialize, Serialize};

/// Column names of the student wellbeing dataset.
pub mod columns {
    pub const STUDENT_ID: &str = "Student_ID";
    pub const HOURS_STUDY: &str = "Hours_Study";
    pub const SLEEP_HOURS: &str = "Sleep_Hours";
    pub const SCREEN_TIME: &str = "Screen_Time";
    pub const ATTENDANCE: &str = "Attendance";
    pub const CGPA: &str = "CGPA";
    pub const EXTRACURRICULAR: &str = "Extracurricular";
    pub const STRESS_LEVEL: &str = "Stress_Level";

    /// Derived column added to the analysis view for the sleep insight.
    pub const SLEEP_BIN: &str = "Sleep_Bin";
}

use columns::*;

/// Every column the loader requires, in source order.
pub const EXPECTED_COLUMNS: [&str; 8] = [
    STUDENT_ID,
    HOURS_STUDY,
    SLEEP_HOURS,
    SCREEN_TIME,
    ATTENDANCE,
    CGPA,
    EXTRACURRICULAR,
    STRESS_LEVEL,
];

/// Numeric columns, in the order medians are computed and filled.
pub const NUMERIC_COLUMNS: [&str; 5] = [HOURS_STUDY, SLEEP_HOURS, SCREEN_TIME, ATTENDANCE, CGPA];

/// Categorical columns kept as labels in the cleaned dataset.
pub const CATEGORICAL_COLUMNS: [&str; 2] = [EXTRACURRICULAR, STRESS_LEVEL];

/// Features correlated against CGPA.
pub const CORRELATION_FEATURES: [&str; 4] = [HOURS_STUDY, SLEEP_HOURS, SCREEN_TIME, ATTENDANCE];

/// Columns summarized in the key statistics table.
pub const KEY_STAT_COLUMNS: [&str; 4] = [HOURS_STUDY, SLEEP_HOURS, SCREEN_TIME, CGPA];

/// Extracurricular participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extracurricular {
    No,
    Yes,
}

impl Extracurricular {
    pub const ALL: [Extracurricular; 2] = [Self::No, Self::Yes];

    /// Parse a source label. Anything other than "Yes"/"No" is unmapped.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "No" => Some(Self::No),
            "Yes" => Some(Self::Yes),
            _ => None,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.code() == code)
    }

    /// Numeric code used in the analysis view.
    pub fn code(self) -> i32 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }
}

/// Self-reported stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// Parse a source label. Anything other than "Low"/"Medium"/"High" is unmapped.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.code() == code)
    }

    /// Numeric code used in the analysis view.
    pub fn code(self) -> i32 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

// =============================================================================
// Exploration
// =============================================================================

/// Schema line of the dataset info table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null_count: usize,
}

/// Count, mean, std, min, quartiles and max of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl DescriptiveStats {
    /// Round every statistic to 2 decimal places.
    pub fn rounded(&self) -> Self {
        use crate::profiler::statistics::round2;
        Self {
            column: self.column.clone(),
            count: self.count,
            mean: round2(self.mean),
            std: round2(self.std),
            min: round2(self.min),
            q25: round2(self.q25),
            median: round2(self.median),
            q75: round2(self.q75),
            max: round2(self.max),
        }
    }
}

/// Diagnostics gathered from the raw dataset right after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSummary {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<ColumnInfo>,
    /// Only columns with at least one missing value.
    pub missing_counts: Vec<(String, usize)>,
    pub duplicate_rows: usize,
    /// Distinct labels in first-seen order; `None` is a missing label.
    pub extracurricular_values: Vec<Option<String>>,
    pub stress_level_values: Vec<Option<String>>,
    pub numeric_stats: Vec<DescriptiveStats>,
}

// =============================================================================
// Cleaning
// =============================================================================

/// One median imputation applied to a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedianFill {
    pub column: String,
    pub median: f64,
    pub filled_count: usize,
}

/// Outcome of the cleaning stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
    pub median_fills: Vec<MedianFill>,
    /// Missing values left in any column (categorical gaps are not filled).
    pub remaining_missing: usize,
    /// Non-null category labels with no numeric code in the analysis view.
    pub unmapped_labels: usize,
}

// =============================================================================
// Analysis
// =============================================================================

/// Pearson correlation of one feature against CGPA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub column: String,
    pub correlation: f64,
}

/// CGPA aggregates for one encoded category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub code: i32,
    pub label: String,
    pub mean: f64,
    pub count: usize,
    pub std: f64,
}

/// Everything the analyzer computes over the analysis view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sorted by correlation, descending; NaN last.
    pub correlations: Vec<CorrelationEntry>,
    pub stress_groups: Vec<GroupStats>,
    pub extracurricular_groups: Vec<GroupStats>,
    pub key_stats: Vec<DescriptiveStats>,
}

impl AnalysisResult {
    /// Rounded mean CGPA of a stress group, NaN when the group is empty.
    pub fn stress_mean(&self, level: StressLevel) -> f64 {
        group_mean(&self.stress_groups, level.code())
    }

    /// Rounded mean CGPA of an extracurricular group, NaN when the group is empty.
    pub fn extracurricular_mean(&self, value: Extracurricular) -> f64 {
        group_mean(&self.extracurricular_groups, value.code())
    }

    pub fn correlation(&self, column: &str) -> Option<f64> {
        self.correlations
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.correlation)
    }
}

fn group_mean(groups: &[GroupStats], code: i32) -> f64 {
    groups
        .iter()
        .find(|g| g.code == code)
        .map(|g| g.mean)
        .unwrap_or(f64::NAN)
}
