//! Model configuration.
//!
//! Loaded from TOML (every key optional) or built in code. The defaults
//! describe the Bitcoin issuance schedule with a 2017-10-08..2019-10-08
//! reference window and a 2026-01-31 projection horizon.

use s2f_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::granularity::Granularity;
use crate::projection::ReferenceWindow;
use crate::schedule::HalvingSchedule;

/// Build a compile-time calendar constant.
///
/// # Panics
/// Panics on an invalid date; only called with the literal constants below.
fn calendar_constant(year: i32, month: u32, day: u32) -> Date {
    Date::from_ymd(year, month, day).expect("calendar constant is a valid date")
}

fn default_halving_dates() -> Vec<Date> {
    vec![
        calendar_constant(2012, 11, 28),
        calendar_constant(2016, 7, 9),
        calendar_constant(2020, 5, 18),
        calendar_constant(2024, 5, 18),
    ]
}

fn default_reference_window() -> ReferenceWindow {
    ReferenceWindow::new(calendar_constant(2017, 10, 8), calendar_constant(2019, 10, 8))
}

fn default_horizon_end() -> Date {
    calendar_constant(2026, 1, 31)
}

/// Stock-to-flow model configuration.
///
/// # Examples
///
/// ```
/// use s2f_model::{Granularity, ModelConfig};
///
/// let config = ModelConfig::from_toml_str(r#"
///     granularity = "W"
///     halving_dates = ["2016-07-09", "2020-05-18"]
/// "#).unwrap();
///
/// assert_eq!(config.granularity, Granularity::Week);
/// assert_eq!(config.horizon_end.to_string(), "2026-01-31");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Resampling granularity
    #[serde(default)]
    pub granularity: Granularity,

    /// Halving dates, strictly increasing
    #[serde(default = "default_halving_dates")]
    pub halving_dates: Vec<Date>,

    /// Window whose observed issuance sets the projection baseline
    #[serde(default = "default_reference_window")]
    pub reference_window: ReferenceWindow,

    /// Last day of the projection
    #[serde(default = "default_horizon_end")]
    pub horizon_end: Date,

    /// Last date eligible for the regression; defaults to the last observed date
    #[serde(default)]
    pub fit_cutoff: Option<Date>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            halving_dates: default_halving_dates(),
            reference_window: default_reference_window(),
            horizon_end: default_horizon_end(),
            fit_cutoff: None,
        }
    }
}

impl ModelConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Set the granularity
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the halving dates
    pub fn with_halving_dates(mut self, dates: Vec<Date>) -> Self {
        self.halving_dates = dates;
        self
    }

    /// Set the reference window
    pub fn with_reference_window(mut self, start: Date, end: Date) -> Self {
        self.reference_window = ReferenceWindow::new(start, end);
        self
    }

    /// Set the projection horizon
    pub fn with_horizon_end(mut self, horizon_end: Date) -> Self {
        self.horizon_end = horizon_end;
        self
    }

    /// Set the regression cutoff
    pub fn with_fit_cutoff(mut self, cutoff: Date) -> Self {
        self.fit_cutoff = Some(cutoff);
        self
    }

    /// Validated halving schedule.
    pub fn schedule(&self) -> Result<HalvingSchedule, ModelError> {
        HalvingSchedule::new(self.halving_dates.clone())
    }

    /// Collects every configuration problem.
    pub fn problems(&self) -> Vec<ModelError> {
        let mut problems = Vec::new();

        if let Err(e) = HalvingSchedule::check(&self.halving_dates) {
            problems.push(e);
        }

        if let Err(e) = self.reference_window.validate() {
            problems.push(e);
        }

        problems
    }

    /// Validate the configuration, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self.problems().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_default_config_validates() {
        let config = ModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.granularity, Granularity::Day);
        assert_eq!(config.halving_dates.len(), 4);
        assert_eq!(config.fit_cutoff, None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ModelConfig::from_toml_str("").unwrap();
        assert_eq!(config, ModelConfig::default());
    }

    #[test]
    fn test_toml_full() {
        let config = ModelConfig::from_toml_str(
            r#"
            granularity = "month"
            halving_dates = ["2012-11-28"]
            horizon_end = "2014-01-01"
            fit_cutoff = "2013-06-30"

            [reference_window]
            start = "2011-01-01"
            end = "2011-12-31"
            "#,
        )
        .unwrap();
        assert_eq!(config.granularity, Granularity::Month);
        assert_eq!(config.fit_cutoff, Some(date(2013, 6, 30)));
        assert_eq!(config.reference_window.start, date(2011, 1, 1));
    }

    #[test]
    fn test_toml_rejects_bad_granularity() {
        let err = ModelConfig::from_toml_str(r#"granularity = "Q""#).unwrap_err();
        assert!(err.to_string().contains("Unsupported granularity"));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(ModelConfig::from_toml_str("timeframe = \"D\"").is_err());
    }

    #[test]
    fn test_multiple_problems_collected() {
        let config = ModelConfig::default()
            .with_halving_dates(vec![date(2020, 5, 18), date(2016, 7, 9)])
            .with_reference_window(date(2019, 1, 1), date(2018, 1, 1));

        let problems = config.problems();
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().all(|p| p.kind() == ErrorKind::Configuration));
        assert!(matches!(
            config.validate(),
            Err(ModelError::NonIncreasingSchedule { .. })
        ));
    }

    #[test]
    fn test_halving_beyond_horizon_is_valid() {
        let config = ModelConfig::default()
            .with_halving_dates(vec![date(2021, 1, 1), date(2028, 4, 1)])
            .with_horizon_end(date(2021, 6, 30));
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_empty_schedule_is_valid() {
        let config = ModelConfig::default().with_halving_dates(Vec::new());
        assert!(config.validate().is_ok());
        assert!(config.schedule().unwrap().is_empty());
    }
}
