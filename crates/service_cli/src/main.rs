//! s2f CLI - Stock-to-Flow Scarcity Model
//!
//! Operational entry point for the stock-to-flow model engine.
//!
//! # Commands
//!
//! - `s2f run --issuance <csv> --prices <csv>` - Build and export the model table
//! - `s2f fit --issuance <csv> --prices <csv>` - Print the regression summary
//! - `s2f check` - Validate the configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the CSV adapters to
//! the model engine and owns logging setup and export.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::InputArgs;
use config::CliConfig;
use output::OutputFormat;

/// Stock-to-flow scarcity model CLI
#[derive(Parser)]
#[command(name = "s2f")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "s2f.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model table and export it
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Fit the regression and print the latest anomaly scores
    Fit {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check configuration and input files
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(&cli.config)
        .and_then(CliConfig::with_env_override)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    // RUST_LOG wins over the configured level; logs go to stderr so exports stay clean
    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run {
            input,
            output,
            format,
        } => commands::run::run(&config, &input, output.as_deref(), format)?,
        Commands::Fit { input } => commands::fit::run(&config, &input)?,
        Commands::Check => commands::check::run(&config, &cli.config)?,
    }

    Ok(())
}
