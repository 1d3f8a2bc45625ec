//! Model table export.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Deserialize;
use s2f_model::{ModelRow, ModelTable};

use crate::error::Result;

/// Export format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One header row plus one line per period; undefined values are empty
    #[default]
    Csv,
    /// Array of row objects; undefined values are `null`
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown output format: {}. Supported: csv, json", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Write every row of the table in the given format.
pub fn write_table<W: Write>(table: &ModelTable, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(writer);
            for row in table.rows() {
                csv.serialize(row)?;
            }
            csv.flush()?;
        }
        OutputFormat::Json => {
            let rows: Vec<ModelRow> = table.rows().collect();
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
