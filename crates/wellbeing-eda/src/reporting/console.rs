//! Human-readable console output for each stage.
//!
//! Everything here goes to stdout with `println!`. Logging stays on stderr
//! through `tracing`, so the two never interleave in redirected output.

use crate::insights::InsightSet;
use crate::types::{AnalysisResult, CleaningReport, DescriptiveStats, ExplorationSummary, GroupStats};
use polars::prelude::*;
use std::path::Path;

/// Render a label list the way the exploration summary prints it.
fn format_labels(values: &[Option<String>]) -> String {
    let labels: Vec<String> = values
        .iter()
        .map(|v| match v {
            Some(label) => format!("'{}'", label),
            None => "null".to_string(),
        })
        .collect();
    format!("[{}]", labels.join(", "))
}

/// Describe-style table: one row per statistic, one column per feature.
pub fn format_stats_table(stats: &[DescriptiveStats]) -> String {
    let mut out = format!("{:<8}", "");
    for s in stats {
        out.push_str(&format!("{:>14}", s.column));
    }

    let rows: [(&str, fn(&DescriptiveStats) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.median),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (name, value) in rows {
        out.push('\n');
        out.push_str(&format!("{:<8}", name));
        for s in stats {
            out.push_str(&format!("{:>14.4}", value(s)));
        }
    }
    out
}

fn format_group_table(key: &str, groups: &[GroupStats]) -> String {
    let mut out = format!("{:<16}{:>8}{:>8}{:>8}", key, "mean", "count", "std");
    for g in groups {
        out.push_str(&format!(
            "\n{:<16}{:>8}{:>8}{:>8}",
            format!("{} ({})", g.code, g.label),
            g.mean,
            g.count,
            g.std
        ));
    }
    out
}

pub fn print_exploration(summary: &ExplorationSummary, raw: &DataFrame, head_rows: usize) {
    println!("=== Data Exploration ===");
    println!("Dataset Shape (rows, columns): {:?}", summary.shape);

    println!("\nFirst {} rows:", head_rows);
    println!("{}", raw.head(Some(head_rows)));

    println!("\nDataset Info (data types and non-null counts):");
    println!(" #  {:<18}{:>16}  {}", "Column", "Non-Null Count", "Dtype");
    for (i, column) in summary.columns.iter().enumerate() {
        println!(
            "{:>2}  {:<18}{:>16}  {}",
            i, column.name, column.non_null_count, column.dtype
        );
    }

    println!("\nDataset Description (stats for numerical columns):");
    println!("{}", format_stats_table(&summary.numeric_stats));

    println!("\nMissing Values (count per column):");
    if summary.missing_counts.is_empty() {
        println!("None");
    }
    for (column, count) in &summary.missing_counts {
        println!("{:<18}{}", column, count);
    }

    println!("\nNumber of Duplicate Rows: {}", summary.duplicate_rows);

    println!("\nUnique values in categorical columns:");
    println!("Extracurricular: {}", format_labels(&summary.extracurricular_values));
    println!("Stress_Level: {}", format_labels(&summary.stress_level_values));
}

pub fn print_cleaning(report: &CleaningReport, width: usize) {
    println!("\n=== Data Preprocessing ===");
    println!(
        "Shape after removing duplicates: ({}, {}) (removed {} rows)",
        report.rows_after, width, report.duplicates_removed
    );
    for fill in &report.median_fills {
        println!(
            "Filled missing values in '{}' with median: {}",
            fill.column, fill.median
        );
    }
    println!("\nMissing Values after Preprocessing:");
    println!("{}", report.remaining_missing);
    if report.unmapped_labels > 0 {
        println!(
            "Unrecognized category labels encoded as missing: {}",
            report.unmapped_labels
        );
    }
}

pub fn print_analysis(result: &AnalysisResult) {
    println!("\n=== Exploratory Data Analysis (EDA) ===");

    println!("\nCorrelations with CGPA (1=strong positive, -1=strong negative):");
    for entry in &result.correlations {
        println!("{:<14}{:>10.6}", entry.column, entry.correlation);
    }

    println!("\nCGPA by Stress_Level (0:Low, 1:Medium, 2:High):");
    println!("{}", format_group_table("Stress_Level", &result.stress_groups));

    println!("\nCGPA by Extracurricular (0:No, 1:Yes):");
    println!(
        "{}",
        format_group_table("Extracurricular", &result.extracurricular_groups)
    );

    println!("\nOverall Stats for Key Features:");
    println!("{}", format_stats_table(&result.key_stats));
}

pub fn print_insights(insights: &InsightSet) {
    println!("\n=== Insights (Based on Full Dataset Statistics, with Visualizations) ===");
    for summary in insights.summaries() {
        println!("{}", summary);
    }
}

pub fn print_export(cleaned: &DataFrame, path: &Path, head_rows: usize) {
    println!(
        "\nCleaned dataset (full rows) exported to '{}'",
        path.display()
    );
    println!(
        "It includes Student_ID, the cleaned numeric columns, and original categorical labels (missing labels stay empty)."
    );
    println!("Final dataset shape: {:?}", cleaned.shape());
    println!("\nFirst few rows of exported data (for verification):");
    println!("{}", cleaned.head(Some(head_rows)));
}
