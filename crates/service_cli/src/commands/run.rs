//! Run command implementation
//!
//! Builds the model table and exports it as CSV or JSON.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::info;

use super::{build_table, InputArgs};
use crate::config::CliConfig;
use crate::output::{write_table, OutputFormat};
use crate::Result;

/// Run the run command
pub fn run(
    config: &CliConfig,
    input: &InputArgs,
    output: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let table = build_table(config, input)?;
    let format = format.unwrap_or(config.output.format);

    match output.or(config.output.path.as_deref()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = BufWriter::new(File::create(path)?);
            write_table(&table, format, file)?;
            info!("Wrote {} rows as {} to {}", table.len(), format, path.display());
        }
        None => {
            let stdout = io::stdout();
            write_table(&table, format, stdout.lock())?;
        }
    }

    Ok(())
}
