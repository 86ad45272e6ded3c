//! Loading the raw table and writing the cleaned one.

use crate::error::{CleaningError, Result, ResultExt};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Where the raw CSV lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl From<&str> for DataSource {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl FromStr for DataSource {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Field values read as missing, in addition to empty fields.
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV reader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Rows sampled for type inference; `None` scans every row.
    pub infer_schema_length: Option<usize>,
    /// Retry with every column read as text when typed parsing fails.
    pub string_fallback: bool,
    /// Exact field values read as missing.
    pub null_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            infer_schema_length: Some(crate::config::DEFAULT_INFER_SCHEMA_LENGTH),
            string_fallback: true,
            null_values: NA_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Read the raw table from `source` without any cleaning.
///
/// Empty fields and [`LoadOptions::null_values`] become nulls. Types are
/// inferred from a sample of rows; when a later row does not fit the sampled
/// type the CSV is read again inferring from every row. If that fails too
/// and `options.string_fallback` is set, every column is read as text and the
/// known numeric columns are parsed by later stages.
pub fn load(source: &DataSource, options: &LoadOptions) -> Result<DataFrame> {
    info!("Loading data from {}", source);
    let bytes = read_source(source)?;

    let df = parse_with_fallbacks(&bytes, options)
        .context(format!("Failed to parse CSV from {}", source))?;

    if df.width() == 0 {
        return Err(CleaningError::Load(format!("{} contains no columns", source)));
    }

    info!("Loaded {} rows x {} columns", df.height(), df.width());
    Ok(df)
}

fn parse_with_fallbacks(bytes: &[u8], options: &LoadOptions) -> PolarsResult<DataFrame> {
    let nulls = &options.null_values;
    let mut error = match parse_csv(bytes, options.infer_schema_length, nulls) {
        Ok(df) => return Ok(df),
        Err(e) => e,
    };

    if options.infer_schema_length.is_some() {
        debug!("Sampled type inference failed ({}), inferring from every row", error);
        match parse_csv(bytes, None, nulls) {
            Ok(df) => return Ok(df),
            Err(e) => error = e,
        }
    }

    if !options.string_fallback {
        return Err(error);
    }
    warn!("Typed CSV parsing failed ({}), retrying with all columns as text", error);
    parse_csv(bytes, Some(0), nulls)
}

fn parse_csv(
    bytes: &[u8],
    infer_schema_length: Option<usize>,
    null_values: &[String],
) -> PolarsResult<DataFrame> {
    let null_values = (!null_values.is_empty()).then(|| {
        NullValues::AllColumns(null_values.iter().map(|v| v.as_str().into()).collect())
    });

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(null_values),
        )
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
}

fn read_source(source: &DataSource) -> Result<Vec<u8>> {
    match source {
        DataSource::Path(path) => fs::read(path).map_err(|e| {
            CleaningError::Load(format!("Could not read {}: {}", path.display(), e))
        }),
        DataSource::Url(url) => fetch_remote(url),
    }
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    debug!("Fetching {}", url);
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let bytes = response.bytes()?;
    debug!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    Err(CleaningError::Load(format!(
        "Cannot fetch {}: built without the `remote` feature",
        url
    )))
}

/// Write `df` to `destination` as CSV with a header row.
///
/// Column order is preserved and no index column is added. Missing parent
/// directories are created.
pub fn save(df: &mut DataFrame, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(destination)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
        .context(format!("Failed to write {}", destination.display()))?;

    info!("Saved {} rows to {}", df.height(), destination.display());
    Ok(())
}
