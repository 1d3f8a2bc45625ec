//! Check command implementation
//!
//! Validates the configuration and the configured input files.

use std::path::Path;

use tracing::{info, warn};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Every problem with the configuration and its input files.
pub fn problems(config: &CliConfig) -> Vec<String> {
    let mut problems = config.problems();
    for (name, path) in [
        ("issuance_path", &config.input.issuance_path),
        ("price_path", &config.input.price_path),
    ] {
        match path {
            Some(path) if !path.exists() => {
                problems.push(format!("{} {} does not exist", name, path.display()))
            }
            Some(_) => {}
            None => warn!("{} is not configured", name),
        }
    }
    problems
}

/// Run the check command
pub fn run(config: &CliConfig, config_path: &Path) -> Result<()> {
    info!("Checking configuration...");
    if config_path.exists() {
        info!("  Configuration file: {}", config_path.display());
    } else {
        info!("  Configuration file: {} (absent, using defaults)", config_path.display());
    }

    let problems = problems(config);
    if !problems.is_empty() {
        return Err(CliError::Validation(problems));
    }

    println!("Configuration OK");
    println!("  granularity:   {}", config.model.granularity);
    println!("  halvings:      {}", config.model.halving_dates.len());
    println!(
        "  reference:     {}..={}",
        config.model.reference_window.start, config.model.reference_window.end
    );
    println!("  horizon:       {}", config.model.horizon_end);
    Ok(())
}
