//! Group-by aggregation of a numeric target over an encoded key column.

use crate::error::Result;
use crate::profiler::statistics::round2;
use crate::types::GroupStats;
use crate::utils::{code_values, numeric_values, require_column};
use polars::prelude::*;

/// Mean, count and sample std of `target` per code of `key`.
///
/// Rows with a null key or a null target are skipped. Groups come back in
/// ascending code order, with all statistics rounded to 2 decimals. `label`
/// names each code for display.
pub fn aggregate_by_code(
    df: &DataFrame,
    key: &str,
    target: &str,
    label: impl Fn(i32) -> String,
) -> Result<Vec<GroupStats>> {
    require_column(df, key)?;
    require_column(df, target)?;

    let grouped = df
        .clone()
        .lazy()
        .select([
            col(key).cast(DataType::Int32),
            col(target).cast(DataType::Float64),
        ])
        .filter(col(key).is_not_null().and(col(target).is_not_null()))
        .group_by([col(key)])
        .agg([
            col(target).mean().alias("mean"),
            col(target).count().alias("count"),
            col(target).std(1).alias("std"),
        ])
        .sort([key], SortMultipleOptions::default())
        .collect()?;

    let codes = code_values(&grouped, key)?;
    let means = numeric_values(&grouped, "mean")?;
    let counts = numeric_values(&grouped, "count")?;
    let stds = numeric_values(&grouped, "std")?;

    Ok(codes
        .into_iter()
        .zip(means)
        .zip(counts)
        .zip(stds)
        .filter_map(|(((code, mean), count), std)| {
            code.map(|code| GroupStats {
                code,
                label: label(code),
                mean: round2(mean.unwrap_or(f64::NAN)),
                count: count.unwrap_or(0.0) as usize,
                std: round2(std.unwrap_or(f64::NAN)),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_by_code() {
        let df = df![
            "Stress_Level" => [Some(2), Some(0), Some(2), None, Some(0)],
            "CGPA" => [2.0, 3.0, 3.0, 4.0, 4.0],
        ]
        .unwrap();

        let groups = aggregate_by_code(&df, "Stress_Level", "CGPA", |c| c.to_string()).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].code, 0);
        assert_eq!(groups[0].mean, 3.5);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].std, 0.71);
        assert_eq!(groups[1].code, 2);
        assert_eq!(groups[1].mean, 2.5);
    }

    #[test]
    fn test_null_targets_are_skipped() {
        let df = df![
            "Stress_Level" => [0, 0, 0],
            "CGPA" => [Some(3.0), None, Some(4.0)],
        ]
        .unwrap();
        let groups = aggregate_by_code(&df, "Stress_Level", "CGPA", |c| c.to_string()).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].mean, 3.5);
    }

    #[test]
    fn test_missing_key_column_fails() {
        let df = df!["CGPA" => [3.0]].unwrap();
        let err = aggregate_by_code(&df, "Stress_Level", "CGPA", |c| c.to_string()).unwrap_err();
        assert!(matches!(err, crate::error::EdaError::ColumnNotFound(c) if c == "Stress_Level"));
    }

    #[test]
    fn test_single_member_group_has_nan_std() {
        let df = df![
            "Extracurricular" => [1, 0, 0],
            "CGPA" => [3.3, 3.0, 3.2],
        ]
        .unwrap();
        let groups = aggregate_by_code(&df, "Extracurricular", "CGPA", |c| c.to_string()).unwrap();
        assert!(groups[1].std.is_nan());
        assert_eq!(groups[1].count, 1);
        assert_eq!(groups[0].mean, 3.1);
    }
}
