//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod fit;
pub mod run;

use std::path::{Path, PathBuf};

use adapter_loader::{CsvIssuanceSource, CsvPriceSource};
use clap::Args;
use s2f_model::{Granularity, IssuanceSource, ModelTable, PriceSource, ScarcityModel};
use tracing::info;

use crate::config::CliConfig;
use crate::error::{CliError, Result};

/// Input options shared by the commands that build the model
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Issuance CSV (time,generation)
    #[arg(short, long)]
    pub issuance: Option<PathBuf>,

    /// Price CSV (time,PriceUSD)
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    /// Resampling granularity (D, W, M or Y)
    #[arg(short, long)]
    pub granularity: Option<Granularity>,
}

fn existing(path: Option<&Path>, what: &'static str) -> Result<PathBuf> {
    let path = path.ok_or(CliError::MissingInput(what))?;
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(path.to_path_buf())
}

/// Load both sources and build the model table.
///
/// Command-line flags take precedence over the configuration.
pub fn build_table(config: &CliConfig, args: &InputArgs) -> Result<ModelTable> {
    let issuance_path = existing(
        args.issuance.as_deref().or(config.input.issuance_path.as_deref()),
        "issuance file",
    )?;
    let price_path = existing(
        args.prices.as_deref().or(config.input.price_path.as_deref()),
        "price file",
    )?;

    let mut model_config = config.model.clone();
    if let Some(granularity) = args.granularity {
        model_config.granularity = granularity;
    }

    info!("Building model...");
    info!("  Issuance: {}", issuance_path.display());
    info!("  Prices: {}", price_path.display());
    info!("  Granularity: {}", model_config.granularity);

    let model = ScarcityModel::new(model_config)?;
    let issuance = CsvIssuanceSource::new(issuance_path)
        .with_columns(config.input.issuance_columns())
        .issuance_records()?;
    let prices = CsvPriceSource::new(price_path)
        .with_columns(config.input.price_columns())
        .price_records()?;

    Ok(model.build(&issuance, &prices)?)
}
