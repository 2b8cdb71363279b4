//! Chart descriptions produced by the insights and drawn by the reporter.

/// Shape and data of one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// One point per row with both coordinates present.
    Scatter { points: Vec<(f64, f64)> },
    /// One bar per group, in display order. NaN heights draw no bar.
    Bar { bars: Vec<(String, f64)> },
}

/// Everything needed to render one insight chart to a PNG file.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub file_name: &'static str,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: String,
    pub kind: ChartKind,
}

pub const STUDY_CHART_FILE: &str = "insight1_study_corr.png";
pub const SLEEP_CHART_FILE: &str = "insight2_sleep_bins.png";
pub const SCREEN_CHART_FILE: &str = "insight3_screen_time.png";
pub const ATTENDANCE_CHART_FILE: &str = "insight4_attendance_corr.png";
pub const STRESS_CHART_FILE: &str = "insight5_stress_level.png";
pub const EXTRACURRICULAR_CHART_FILE: &str = "insight6_extracurricular.png";

/// Chart file names in insight order.
pub const CHART_FILES: [&str; 6] = [
    STUDY_CHART_FILE,
    SLEEP_CHART_FILE,
    SCREEN_CHART_FILE,
    ATTENDANCE_CHART_FILE,
    STRESS_CHART_FILE,
    EXTRACURRICULAR_CHART_FILE,
];
