//! Statistical helpers over numeric columns.
//!
//! Conventions: sample standard deviation (n-1), linear-interpolation
//! quantiles, Pearson correlation. Nulls are skipped and undefined results
//! are NaN.

use crate::error::Result;
use crate::types::DescriptiveStats;
use polars::prelude::*;

/// Sample standard deviation (n-1 denominator), NaN for fewer than 2 values.
pub fn sample_std(series: &Series) -> f64 {
    series.std(1).unwrap_or(f64::NAN)
}

/// Quantile of the non-null values using linear interpolation between ranks.
pub fn quantile(series: &Series, q: f64) -> Result<f64> {
    let scalar = series.quantile_reduce(q, QuantileMethod::Linear)?;
    Ok(scalar.value().extract::<f64>().unwrap_or(f64::NAN))
}

/// Pearson product-moment correlation over pairwise-complete observations.
///
/// Returns NaN when fewer than two complete pairs exist or when either
/// side has zero variance.
pub fn pearson(x: &Series, y: &Series) -> Result<f64> {
    let x = x.cast(&DataType::Float64)?;
    let y = y.cast(&DataType::Float64)?;

    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .f64()?
        .into_iter()
        .zip(y.f64()?.into_iter())
        .filter_map(|pair| match pair {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        })
        .unzip();

    if xs.len() < 2 {
        return Ok(f64::NAN);
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in xs.iter().zip(ys.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(f64::NAN);
    }

    Ok((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Round to 2 decimal places, halves away from zero. NaN stays NaN.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Descriptive statistics of the non-null values of a column.
pub fn describe(series: &Series) -> Result<DescriptiveStats> {
    let values = series.cast(&DataType::Float64)?;
    Ok(DescriptiveStats {
        column: series.name().to_string(),
        count: values.len() - values.null_count(),
        mean: values.mean().unwrap_or(f64::NAN),
        std: sample_std(&values),
        min: values.min::<f64>()?.unwrap_or(f64::NAN),
        q25: quantile(&values, 0.25)?,
        median: quantile(&values, 0.5)?,
        q75: quantile(&values, 0.75)?,
        max: values.max::<f64>()?.unwrap_or(f64::NAN),
    })
}
