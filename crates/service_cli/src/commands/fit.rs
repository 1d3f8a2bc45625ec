//! Fit command implementation
//!
//! Builds the model table and prints the regression summary together with
//! the latest anomaly scores.

use s2f_model::{Column, ModelTable};

use super::{build_table, InputArgs};
use crate::config::CliConfig;
use crate::Result;

/// Last defined value of a column, with its row index.
fn latest(table: &ModelTable, column: Column) -> Option<(usize, f64)> {
    table
        .values(column)
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, v)| v.map(|v| (i, v)))
}

/// Render the regression summary.
pub fn summary(table: &ModelTable) -> String {
    let fit = table.fit();
    let mut lines = vec![
        format!("Granularity:        {}", table.granularity()),
        format!("Last observed:      {}", table.last_observed()),
        format!("Fit cutoff:         {}", table.fit_cutoff()),
        format!("Observations:       {}", fit.observations),
        format!("Intercept:          {:.6}", fit.intercept),
        format!("Slope:              {:.6}", fit.slope),
    ];
    if let Some(r_squared) = fit.r_squared {
        lines.push(format!("R squared:          {:.4}", r_squared));
    }

    for (label, column) in [
        ("S2F z-score:", Column::S2fZscore),
        ("Residual z-score:", Column::PricePredDifZscore),
    ] {
        if let Some((i, value)) = latest(table, column) {
            lines.push(format!("{:<20}{:+.3} ({})", label, value, table.dates()[i]));
        }
    }

    let predicted = table.predicted_price();
    if let Some(last) = table.len().checked_sub(1) {
        if let Some(price) = predicted[last] {
            lines.push(format!(
                "{:<20}{:.2} ({})",
                "Model price:",
                price,
                table.dates()[last]
            ));
        }
    }

    lines.join("\n")
}

/// Run the fit command
pub fn run(config: &CliConfig, input: &InputArgs) -> Result<()> {
    let table = build_table(config, input)?;
    println!("{}", summary(&table));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::write_inputs;

    #[test]
    fn test_summary_lists_fit_and_scores() {
        let dir = tempfile::tempdir().unwrap();
        let (config, input) = write_inputs(dir.path());
        let table = build_table(&config, &input).unwrap();

        let text = summary(&table);
        assert!(text.contains("Last observed:      2020-09-30"));
        assert!(text.contains("Slope:"));
        assert!(text.contains("Residual z-score:"));
        assert!(text.contains("Model price:"));
        assert!(text.lines().last().unwrap().ends_with("(2021-06-30)"));
    }

    #[test]
    fn test_latest_skips_undefined_tail() {
        let dir = tempfile::tempdir().unwrap();
        let (config, input) = write_inputs(dir.path());
        let table = build_table(&config, &input).unwrap();

        let (i, _) = latest(&table, Column::Price).unwrap();
        assert_eq!(table.dates()[i].to_string(), "2020-09-30");
    }
}
