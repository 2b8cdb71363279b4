//! Integration tests for the student wellbeing analysis pipeline.
//!
//! These tests run the pipeline end to end over small CSV fixtures and
//! inspect both the in-memory outcome and the files written to disk.

use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wellbeing_eda::insights::{CHART_FILES, assign_sleep_bin};
use wellbeing_eda::types::NUMERIC_COLUMNS;
use wellbeing_eda::utils::{code_values, count_duplicates};
use wellbeing_eda::{
    AnalysisConfig, AnalysisStage, DataCleaner, DataSource, EdaError, EdaOutcome, MedianFill,
    Pipeline, SleepBin, StressLevel, load_dataset,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(filename: &str) -> DataSource {
    DataSource::Path(fixtures_path().join(filename))
}

fn quiet_config(dir: &TempDir) -> AnalysisConfig {
    AnalysisConfig::builder()
        .output_dir(dir.path())
        .render_charts(false)
        .print_console(false)
        .build()
        .unwrap()
}

fn run_quiet(source: &DataSource, dir: &TempDir) -> wellbeing_eda::EdaResult<EdaOutcome> {
    Pipeline::builder()
        .config(quiet_config(dir))
        .build()
        .unwrap()
        .run(source)
}

fn student_csv(rows: &[&str]) -> DataSource {
    let mut csv = String::from(
        "Student_ID,Hours_Study,Sleep_Hours,Screen_Time,Attendance,CGPA,Extracurricular,Stress_Level\n",
    );
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    DataSource::Bytes(csv.into_bytes())
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_sample() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_sample.csv"), &dir).unwrap();

    assert_eq!(outcome.exploration.shape, (11, 8));
    assert_eq!(outcome.exploration.duplicate_rows, 1);
    assert_eq!(outcome.cleaning.rows_before, 11);
    assert_eq!(outcome.cleaning.rows_after, 10);
    assert_eq!(outcome.cleaning.duplicates_removed, 1);
    assert_eq!(
        outcome.cleaning.median_fills,
        vec![
            MedianFill {
                column: "Hours_Study".to_string(),
                median: 4.5,
                filled_count: 1,
            },
            MedianFill {
                column: "Sleep_Hours".to_string(),
                median: 7.0,
                filled_count: 1,
            },
        ]
    );
    // The missing Extracurricular label is left alone.
    assert_eq!(outcome.cleaning.remaining_missing, 1);
    assert_eq!(outcome.cleaning.unmapped_labels, 0);
}

#[test]
fn test_cleaned_dataset_postconditions() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_sample.csv"), &dir).unwrap();

    assert_eq!(count_duplicates(&outcome.cleaned).unwrap(), 0);
    for col in NUMERIC_COLUMNS {
        assert_eq!(outcome.cleaned.column(col).unwrap().null_count(), 0, "{col}");
    }
    assert_eq!(
        outcome.cleaned.column("Stress_Level").unwrap().dtype(),
        &DataType::String
    );
}

#[test]
fn test_cleaning_twice_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_sample.csv"), &dir).unwrap();

    let (again, report) = DataCleaner.clean(outcome.cleaned.clone()).unwrap();

    assert_eq!(report.duplicates_removed, 0);
    assert!(report.median_fills.is_empty());
    assert!(again.equals_missing(&outcome.cleaned));
}

#[test]
fn test_analysis_view_encoding() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_sample.csv"), &dir).unwrap();
    let view = &outcome.analysis_view;

    assert!(view.column("Student_ID").is_err());
    let extra = code_values(view, "Extracurricular").unwrap();
    let stress = code_values(view, "Stress_Level").unwrap();
    assert!(extra.iter().flatten().all(|c| [0, 1].contains(c)));
    assert!(stress.iter().flatten().all(|c| [0, 1, 2].contains(c)));
    assert_eq!(stress.iter().filter(|c| c.is_none()).count(), 0);
}

#[test]
fn test_analysis_results() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_sample.csv"), &dir).unwrap();
    let analysis = &outcome.analysis;

    assert_eq!(analysis.correlations.len(), 4);
    for pair in analysis.correlations.windows(2) {
        assert!(pair[0].correlation >= pair[1].correlation);
    }
    for entry in &analysis.correlations {
        assert!((-1.0..=1.0).contains(&entry.correlation), "{}", entry.column);
    }
    assert!(analysis.correlation("Hours_Study").unwrap() > 0.9);
    assert!(analysis.correlation("Screen_Time").unwrap() < -0.9);

    let counts: Vec<(i32, usize)> = analysis
        .stress_groups
        .iter()
        .map(|g| (g.code, g.count))
        .collect();
    assert_eq!(counts, vec![(0, 4), (1, 3), (2, 3)]);
    assert_eq!(analysis.stress_mean(StressLevel::High), 2.42);
    assert!(analysis.stress_mean(StressLevel::Low) > analysis.stress_mean(StressLevel::High));

    let key_columns: Vec<&str> = analysis.key_stats.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(key_columns, vec!["Hours_Study", "Sleep_Hours", "Screen_Time", "CGPA"]);
    assert!(analysis.key_stats.iter().all(|s| s.count == 10));
}

#[test]
fn test_analysis_is_deterministic() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let first = run_quiet(&fixture("students_sample.csv"), &first_dir).unwrap();
    let second = run_quiet(&fixture("students_sample.csv"), &second_dir).unwrap();

    assert_eq!(
        format!("{:?}", first.analysis),
        format!("{:?}", second.analysis)
    );
    assert_eq!(first.insights.summaries(), second.insights.summaries());
}

// ============================================================================
// Insight Scenarios
// ============================================================================

#[test]
fn test_sleep_hours_bucketing() {
    let edges = AnalysisConfig::default().sleep_bin_edges;
    let bins: Vec<Option<SleepBin>> = [5.0, 7.0, 9.0]
        .into_iter()
        .map(|h| assign_sleep_bin(h, &edges))
        .collect();
    let labels: Vec<&str> = bins.into_iter().flatten().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["<6h", "6-8h", ">8h"]);
}

#[test]
fn test_sleep_bin_column_in_view() {
    let dir = TempDir::new().unwrap();
    let source = student_csv(&[
        "1,3.0,5.0,3.0,80,2.8,Yes,Low",
        "2,4.0,7.0,4.0,75,3.2,No,Medium",
        "3,5.0,9.0,2.0,90,3.0,No,High",
    ]);
    let outcome = run_quiet(&source, &dir).unwrap();

    let bins: Vec<Option<String>> = outcome
        .analysis_view
        .column("Sleep_Bin")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    assert_eq!(
        bins,
        vec![
            Some("<6h".to_string()),
            Some("6-8h".to_string()),
            Some(">8h".to_string())
        ]
    );
    assert_eq!(outcome.insights.sleep.best, Some(SleepBin::Optimal));
}

#[test]
fn test_screen_time_median_split() {
    let dir = TempDir::new().unwrap();
    let source = student_csv(&[
        "1,6.0,7.0,1,95,3.8,Yes,Low",
        "2,5.0,7.0,2,90,3.6,Yes,Low",
        "3,4.0,7.0,3,85,3.2,No,Medium",
        "4,3.0,7.0,4,80,2.9,No,High",
        "5,2.0,7.0,5,70,2.5,No,High",
    ]);
    let outcome = run_quiet(&source, &dir).unwrap();
    let screen = &outcome.insights.screen_time;

    assert_eq!(screen.median, 3.0);
    assert_eq!(screen.low_count, 3);
    assert_eq!(screen.high_count, 2);
    assert_eq!(screen.low_mean, 3.53);
    assert_eq!(screen.high_mean, 2.7);
}

#[test]
fn test_insight_summaries() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_sample.csv"), &dir).unwrap();
    let summaries = outcome.insights.summaries();

    assert_eq!(summaries.len(), 6);
    for (i, summary) in summaries.iter().enumerate() {
        assert!(summary.starts_with(&format!("{}. ", i + 1)), "{summary}");
    }
    assert!(summaries[4].contains("High stress: 2.42"));
}

// ============================================================================
// Unknown Labels
// ============================================================================

#[test]
fn test_unknown_labels_become_null() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_unknown_labels.csv"), &dir).unwrap();

    assert_eq!(outcome.cleaning.unmapped_labels, 2);
    assert_eq!(
        code_values(&outcome.analysis_view, "Extracurricular").unwrap(),
        vec![Some(1), None, Some(0), Some(0)]
    );
    assert_eq!(
        code_values(&outcome.analysis_view, "Stress_Level").unwrap(),
        vec![Some(0), Some(1), None, Some(2)]
    );
    // The exported dataset keeps the original labels.
    let reloaded = load_dataset(&DataSource::Path(dir.path().join("cleaned_student_data.csv"))).unwrap();
    let labels: Vec<Option<&str>> = reloaded
        .column("Stress_Level")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(labels, vec![Some("Low"), Some("Medium"), Some("Extreme"), Some("High")]);
}

// ============================================================================
// Export Tests
// ============================================================================

#[test]
fn test_exported_csv_round_trips() {
    let dir = TempDir::new().unwrap();
    let outcome = run_quiet(&fixture("students_sample.csv"), &dir).unwrap();
    let path = dir.path().join("cleaned_student_data.csv");

    assert!(path.exists());
    assert_eq!(outcome.written_files, vec![path.clone()]);

    let header = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();
    assert_eq!(
        header,
        "Student_ID,Hours_Study,Sleep_Hours,Screen_Time,Attendance,CGPA,Extracurricular,Stress_Level"
    );

    let reloaded = load_dataset(&DataSource::Path(path)).unwrap();
    assert_eq!(reloaded.shape(), outcome.cleaned.shape());
    assert_eq!(reloaded.get_column_names(), outcome.cleaned.get_column_names());
    assert_eq!(reloaded.column("Extracurricular").unwrap().null_count(), 1);
}

#[test]
fn test_custom_cleaned_file_name() {
    let dir = TempDir::new().unwrap();
    let config = AnalysisConfig::builder()
        .output_dir(dir.path().join("nested"))
        .cleaned_file_name("students_clean.csv")
        .render_charts(false)
        .print_console(false)
        .build()
        .unwrap();

    Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run(&fixture("students_sample.csv"))
        .unwrap();

    assert!(dir.path().join("nested/students_clean.csv").exists());
}

#[test]
fn test_run_report_written() {
    let dir = TempDir::new().unwrap();
    let config = AnalysisConfig::builder()
        .output_dir(dir.path())
        .render_charts(false)
        .print_console(false)
        .emit_report(true)
        .build()
        .unwrap();

    let outcome = Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run(&fixture("students_sample.csv"))
        .unwrap();

    let report_path = dir.path().join("eda_report.json");
    assert!(outcome.written_files.contains(&report_path));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["cleaning"]["rows_after"], 10);
    assert_eq!(report["analysis"]["correlations"].as_array().unwrap().len(), 4);
    assert!(report["generated_at"].as_str().unwrap().contains('T'));
    assert!(report["source"].as_str().unwrap().ends_with("students_sample.csv"));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_missing_column_fails() {
    let err = load_dataset(&fixture("students_missing_column.csv")).unwrap_err();
    match err {
        EdaError::MissingColumns(columns) => assert_eq!(columns, vec!["Attendance".to_string()]),
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_header_only_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let err = run_quiet(&fixture("students_header_only.csv"), &dir).unwrap_err();
    assert_eq!(err.error_code(), "EMPTY_DATASET");
}

#[test]
fn test_missing_source_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let err = run_quiet(&fixture("does_not_exist.csv"), &dir).unwrap_err();

    assert!(err.is_source_error());
    assert!(!dir.path().join("cleaned_student_data.csv").exists());
}

#[test]
fn test_progress_reports_failure() {
    let dir = TempDir::new().unwrap();
    let stages = Arc::new(Mutex::new(Vec::new()));
    let stages_clone = stages.clone();

    let result = Pipeline::builder()
        .config(quiet_config(&dir))
        .on_progress(move |update| stages_clone.lock().unwrap().push(update.stage))
        .build()
        .unwrap()
        .run(&fixture("students_missing_column.csv"));

    assert!(result.is_err());
    assert_eq!(
        *stages.lock().unwrap(),
        vec![AnalysisStage::Loading, AnalysisStage::Failed]
    );
}

#[test]
fn test_nan_tokens_are_filled_like_missing_values() {
    let dir = TempDir::new().unwrap();
    let source = student_csv(&[
        "1,2.0,7.0,3.0,90,3.4,Yes,Low",
        "2,NaN,6.0,nan,85,3.1,No,High",
        "3,6.0,8.0,5.0,80,2.8,No,Medium",
    ]);
    let outcome = run_quiet(&source, &dir).unwrap();

    let hours = outcome
        .cleaning
        .median_fills
        .iter()
        .find(|fill| fill.column == "Hours_Study")
        .unwrap();
    assert_eq!(hours.median, 4.0);
    assert_eq!(hours.filled_count, 1);

    for name in NUMERIC_COLUMNS {
        let column = outcome.cleaned.column(name).unwrap();
        assert_eq!(column.null_count(), 0, "{name}");
        let values = column.as_materialized_series().cast(&DataType::Float64).unwrap();
        assert!(values.f64().unwrap().into_no_null_iter().all(|v| !v.is_nan()), "{name}");
    }
    assert_eq!(outcome.cleaning.remaining_missing, 0);
}

// ============================================================================
// Chart Tests
// ============================================================================

fn assert_png(path: &std::path::Path) {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a PNG", path.display());
}

#[test]
fn test_pipeline_renders_all_charts() {
    let dir = TempDir::new().unwrap();
    let config = AnalysisConfig::builder()
        .output_dir(dir.path())
        .chart_text(false)
        .print_console(false)
        .build()
        .unwrap();

    let outcome = Pipeline::builder()
        .config(config)
        .build()
        .unwrap()
        .run(&fixture("students_sample.csv"))
        .unwrap();

    for file in CHART_FILES {
        assert_png(&dir.path().join(file));
    }
    assert_eq!(outcome.written_files.len(), 7);
    assert_eq!(
        outcome.written_files.last().unwrap(),
        &dir.path().join("cleaned_student_data.csv")
    );
}

#[test]
fn test_run_entry_point() {
    let dir = TempDir::new().unwrap();
    let outcome = wellbeing_eda::run(&fixture("students_sample.csv"), dir.path()).unwrap();

    assert_eq!(outcome.cleaning.rows_after, 10);
    for file in CHART_FILES {
        assert_png(&dir.path().join(file));
    }
    assert!(dir.path().join("cleaned_student_data.csv").exists());
    assert_eq!(outcome.written_files.len(), 7);
}
