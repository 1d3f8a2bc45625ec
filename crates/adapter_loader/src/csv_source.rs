//! CSV-backed issuance and price sources.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use s2f_core::types::Date;
use s2f_model::{IssuanceRecord, IssuanceSource, PriceRecord, PriceSource};
use tracing::{debug, warn};

use crate::error::LoaderError;
use crate::timestamp::parse_timestamp;

/// Default timestamp header.
pub const DEFAULT_TIME_COLUMN: &str = "time";
/// Default issuance header.
pub const DEFAULT_GENERATION_COLUMN: &str = "generation";
/// Default price header.
pub const DEFAULT_PRICE_COLUMN: &str = "PriceUSD";

/// Header names of the two columns a source reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Timestamp header
    pub time: String,
    /// Value header
    pub value: String,
}

impl ColumnSpec {
    /// Create a column pair
    pub fn new(time: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            value: value.into(),
        }
    }
}

/// Reads `(date, value)` pairs from CSV text.
///
/// Rows with a blank value are skipped quietly. Rows with an unparseable
/// timestamp or value are skipped with a warning. Other columns are ignored.
///
/// # Errors
/// - `Csv` on malformed CSV
/// - `MissingColumn` if either header is absent
/// - `NoRecords` if no row is usable
pub fn read_series<R: Read>(reader: R, columns: &ColumnSpec) -> Result<Vec<(Date, f64)>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoaderError::MissingColumn {
                column: name.to_string(),
                found: headers.iter().collect::<Vec<_>>().join(", "),
            })
    };
    let time_idx = find(&columns.time)?;
    let value_idx = find(&columns.value)?;

    let mut series = Vec::new();
    let mut blank = 0usize;
    let mut rejected = 0usize;

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let raw_time = record.get(time_idx).unwrap_or_default();
        let raw_value = record.get(value_idx).unwrap_or_default();

        if raw_value.is_empty() {
            blank += 1;
            continue;
        }

        match (parse_timestamp(raw_time), raw_value.parse::<f64>()) {
            (Some(date), Ok(value)) => series.push((date, value)),
            _ => {
                rejected += 1;
                warn!(
                    row = row + 2,
                    time = raw_time,
                    value = raw_value,
                    "Skipping unparseable CSV row"
                );
            }
        }
    }

    debug!(
        column = %columns.value,
        rows = series.len(),
        blank,
        rejected,
        "Read CSV series"
    );

    if series.is_empty() {
        return Err(LoaderError::NoRecords {
            column: columns.value.clone(),
        });
    }
    Ok(series)
}

fn open(path: &Path) -> Result<BufReader<File>, LoaderError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| LoaderError::io(path, e))
}

/// Daily issuance read from a CSV export (`time,generation` by default).
///
/// # Examples
///
/// ```no_run
/// use adapter_loader::CsvIssuanceSource;
/// use s2f_model::IssuanceSource;
///
/// let source = CsvIssuanceSource::new("data/blockchair.csv");
/// let records = source.issuance_records().unwrap();
/// println!("{} issuance rows", records.len());
/// ```
#[derive(Debug, Clone)]
pub struct CsvIssuanceSource {
    path: PathBuf,
    columns: ColumnSpec,
}

impl CsvIssuanceSource {
    /// Source over a file with the default headers
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            columns: ColumnSpec::new(DEFAULT_TIME_COLUMN, DEFAULT_GENERATION_COLUMN),
        }
    }

    /// Override the header names
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IssuanceSource for CsvIssuanceSource {
    type Error = LoaderError;

    fn issuance_records(&self) -> Result<Vec<IssuanceRecord>, LoaderError> {
        let series = read_series(open(&self.path)?, &self.columns)?;
        Ok(series
            .into_iter()
            .map(|(date, generation)| IssuanceRecord::new(date, generation))
            .collect())
    }
}

/// Prices read from a CSV export (`time,PriceUSD` by default).
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
    columns: ColumnSpec,
}

impl CsvPriceSource {
    /// Source over a file with the default headers
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            columns: ColumnSpec::new(DEFAULT_TIME_COLUMN, DEFAULT_PRICE_COLUMN),
        }
    }

    /// Override the header names
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceSource for CsvPriceSource {
    type Error = LoaderError;

    fn price_records(&self) -> Result<Vec<PriceRecord>, LoaderError> {
        let series = read_series(open(&self.path)?, &self.columns)?;
        Ok(series
            .into_iter()
            .map(|(date, price)| PriceRecord::new(date, price))
            .collect())
    }
}
