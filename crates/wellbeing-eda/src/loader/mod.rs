//! Dataset loading.
//!
//! A [`DataSource`] yields raw CSV bytes from a URL, a local file or memory.
//! [`load_dataset`] parses them with polars, checks the expected schema and
//! normalizes column types so every later stage sees the same dtypes:
//! numeric columns become `Float64` and categorical columns become `String`.
//! Missing-value markers (`NA`, `NaN`, `null`, ...) are nulls in every
//! column, so median filling sees them as gaps.

use crate::error::{EdaError, Result, ResultExt};
use crate::types::{CATEGORICAL_COLUMNS, EXPECTED_COLUMNS, NUMERIC_COLUMNS};
use crate::utils::{MISSING_MARKERS, is_missing_marker, numeric_values, string_values};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Where the raw CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Download over HTTP(S) with a blocking GET.
    Url(String),
    /// Read a local file.
    Path(PathBuf),
    /// Use bytes already in memory.
    Bytes(Vec<u8>),
}

impl DataSource {
    /// Interpret a CLI argument: `http://` and `https://` prefixes are URLs,
    /// everything else is a file path.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Fetch the raw bytes of the CSV resource.
    ///
    /// Blocks until the download or read completes; there is no timeout
    /// or retry.
    pub fn fetch_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Url(url) => {
                debug!("Downloading dataset from {}", url);
                let response = reqwest::blocking::get(url)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(EdaError::SourceUnavailable(format!(
                        "GET {} returned {}",
                        url, status
                    )));
                }
                Ok(response.bytes()?.to_vec())
            }
            Self::Path(path) => {
                if !path.exists() {
                    return Err(EdaError::SourceUnavailable(format!(
                        "File not found: {}",
                        path.display()
                    )));
                }
                std::fs::read(path).context(format!("Reading {}", path.display()))
            }
            Self::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Bytes(bytes) => write!(f, "<in-memory {} bytes>", bytes.len()),
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Load and normalize the dataset from a source.
pub fn load_dataset(source: &DataSource) -> Result<DataFrame> {
    info!("Loading dataset from: {}", source);
    let bytes = source.fetch_bytes()?;
    let df = parse_csv(bytes)?;
    let df = normalize_schema(df)?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Parse CSV bytes with a header row.
///
/// Column types are inferred from the first 100 rows; if that guess fails
/// later in the file, the whole file is scanned instead.
pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame> {
    match read_csv(&bytes, Some(100)) {
        Ok(df) => Ok(df),
        Err(e) => {
            debug!("CSV parse with inferred schema failed: {}", e);
            read_csv(&bytes, None).context("Parsing CSV")
        }
    }
}

fn read_csv(bytes: &[u8], infer_schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    let null_values = NullValues::AllColumns(MISSING_MARKERS.iter().map(|m| (*m).into()).collect());
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// Check the expected columns and coerce their types.
pub fn normalize_schema(mut df: DataFrame) -> Result<DataFrame> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let missing: Vec<String> = EXPECTED_COLUMNS
        .iter()
        .filter(|expected| !present.iter().any(|p| p == *expected))
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EdaError::MissingColumns(missing));
    }

    let extra: Vec<&String> = present
        .iter()
        .filter(|p| !EXPECTED_COLUMNS.contains(&p.as_str()))
        .collect();
    if !extra.is_empty() {
        warn!("Ignoring unexpected columns during analysis: {:?}", extra);
    }

    if df.height() == 0 {
        return Err(EdaError::EmptyDataset);
    }

    for name in NUMERIC_COLUMNS {
        let values: Vec<Option<f64>> = numeric_values(&df, name)?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        df.replace(name, Series::new(name.into(), values))?;
    }

    for name in CATEGORICAL_COLUMNS {
        let labels: Vec<Option<String>> = string_values(&df, name)?
            .into_iter()
            .map(|v| v.filter(|label| !is_missing_marker(label)))
            .collect();
        df.replace(name, Series::new(name.into(), labels))?;
    }

    Ok(df)
}
