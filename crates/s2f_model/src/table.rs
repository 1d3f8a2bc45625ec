//! The enriched model table.
//!
//! One row per resampled period. Numeric columns that may be undefined are
//! `Option<f64>`; `generation` and `stock` are always defined.

use s2f_core::math::regression::RegressionFit;
use s2f_core::types::Date;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::granularity::Granularity;

/// Named numeric column of a [`ModelTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Issuance in the period
    Generation,
    /// Cumulative issuance
    Stock,
    /// Trailing one-year issuance
    YearFlow,
    /// Stock-to-flow ratio
    S2f,
    /// Natural log of the ratio
    S2fLog,
    /// Relative change of the ratio
    S2fDif,
    /// Mean price in the period
    Price,
    /// Natural log of price
    PriceLog,
    /// Relative change of price
    PriceDif,
    /// `s2f_log / price_log`
    S2fMultiple,
    /// Standard score of the multiple
    S2fZscore,
    /// Regression-predicted log price
    PricePred,
    /// Residual `price_pred - price_log` over the fit window
    PricePredDif,
    /// Standard score of the residual
    PricePredDifZscore,
    /// Days until the next halving
    DaysUntilNextHalving,
}

impl Column {
    /// Every column in export order.
    pub const ALL: [Column; 15] = [
        Self::Generation,
        Self::Stock,
        Self::YearFlow,
        Self::S2f,
        Self::S2fLog,
        Self::S2fDif,
        Self::Price,
        Self::PriceLog,
        Self::PriceDif,
        Self::S2fMultiple,
        Self::S2fZscore,
        Self::PricePred,
        Self::PricePredDif,
        Self::PricePredDifZscore,
        Self::DaysUntilNextHalving,
    ];

    /// Column name as used by consumers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Stock => "stock",
            Self::YearFlow => "year_flow",
            Self::S2f => "s2f",
            Self::S2fLog => "s2f_log",
            Self::S2fDif => "s2f_dif",
            Self::Price => "price",
            Self::PriceLog => "price_log",
            Self::PriceDif => "price_dif",
            Self::S2fMultiple => "s2f_multiple",
            Self::S2fZscore => "s2f_zscore",
            Self::PricePred => "price_pred",
            Self::PricePredDif => "price_pred_dif",
            Self::PricePredDifZscore => "price_pred_dif_zscore",
            Self::DaysUntilNextHalving => "days_until_next_halving",
        }
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown column: {}", s))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the table, for exporters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRow {
    /// Period label
    pub date: Date,
    /// Whether the period contains projected issuance
    pub projected: bool,
    /// Issuance in the period
    pub generation: f64,
    /// Cumulative issuance
    pub stock: f64,
    /// Trailing one-year issuance
    pub year_flow: Option<f64>,
    /// Stock-to-flow ratio
    pub s2f: Option<f64>,
    /// Log stock-to-flow
    pub s2f_log: Option<f64>,
    /// Relative change of stock-to-flow
    pub s2f_dif: Option<f64>,
    /// Mean price
    pub price: Option<f64>,
    /// Log price
    pub price_log: Option<f64>,
    /// Relative change of price
    pub price_dif: Option<f64>,
    /// Scarcity multiple
    pub s2f_multiple: Option<f64>,
    /// Multiple z-score
    pub s2f_zscore: Option<f64>,
    /// Predicted log price
    pub price_pred: Option<f64>,
    /// Regression residual
    pub price_pred_dif: Option<f64>,
    /// Residual z-score
    pub price_pred_dif_zscore: Option<f64>,
    /// Days until the next halving
    pub days_until_next_halving: i64,
}

/// Analysis-ready stock-to-flow table.
///
/// Built by [`ScarcityModel::build`](crate::ScarcityModel::build); all
/// column vectors have [`len`](Self::len) entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTable {
    pub(crate) granularity: Granularity,
    pub(crate) last_observed: Date,
    pub(crate) fit_cutoff: Date,
    pub(crate) fit: RegressionFit,
    pub(crate) dates: Vec<Date>,
    pub(crate) projected: Vec<bool>,
    pub(crate) generation: Vec<f64>,
    pub(crate) stock: Vec<f64>,
    pub(crate) year_flow: Vec<Option<f64>>,
    pub(crate) s2f: Vec<Option<f64>>,
    pub(crate) s2f_log: Vec<Option<f64>>,
    pub(crate) s2f_dif: Vec<Option<f64>>,
    pub(crate) price: Vec<Option<f64>>,
    pub(crate) price_log: Vec<Option<f64>>,
    pub(crate) price_dif: Vec<Option<f64>>,
    pub(crate) s2f_multiple: Vec<Option<f64>>,
    pub(crate) s2f_zscore: Vec<Option<f64>>,
    pub(crate) price_pred: Vec<Option<f64>>,
    pub(crate) price_pred_dif: Vec<Option<f64>>,
    pub(crate) price_pred_dif_zscore: Vec<Option<f64>>,
    pub(crate) days_until_next_halving: Vec<i64>,
}

impl ModelTable {
    /// Number of periods.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Granularity the table was resampled to.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Last day with actual issuance records.
    pub fn last_observed(&self) -> Date {
        self.last_observed
    }

    /// Last date eligible for the regression fit.
    pub fn fit_cutoff(&self) -> Date {
        self.fit_cutoff
    }

    /// Fitted regression of log price on log stock-to-flow.
    pub fn fit(&self) -> &RegressionFit {
        &self.fit
    }

    /// Period labels.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Projection flags per period.
    pub fn projected(&self) -> &[bool] {
        &self.projected
    }

    /// Issuance per period.
    pub fn generation(&self) -> &[f64] {
        &self.generation
    }

    /// Cumulative issuance per period.
    pub fn stock(&self) -> &[f64] {
        &self.stock
    }

    /// Days until the next halving per period.
    pub fn days_until_next_halving(&self) -> &[i64] {
        &self.days_until_next_halving
    }

    /// Values of a column, with always-defined columns wrapped in `Some`.
    pub fn values(&self, column: Column) -> Vec<Option<f64>> {
        let optional = |v: &[Option<f64>]| -> Vec<Option<f64>> { v.to_vec() };
        let defined = |v: &[f64]| -> Vec<Option<f64>> { v.iter().copied().map(Some).collect() };

        match column {
            Column::Generation => defined(&self.generation),
            Column::Stock => defined(&self.stock),
            Column::YearFlow => optional(&self.year_flow),
            Column::S2f => optional(&self.s2f),
            Column::S2fLog => optional(&self.s2f_log),
            Column::S2fDif => optional(&self.s2f_dif),
            Column::Price => optional(&self.price),
            Column::PriceLog => optional(&self.price_log),
            Column::PriceDif => optional(&self.price_dif),
            Column::S2fMultiple => optional(&self.s2f_multiple),
            Column::S2fZscore => optional(&self.s2f_zscore),
            Column::PricePred => optional(&self.price_pred),
            Column::PricePredDif => optional(&self.price_pred_dif),
            Column::PricePredDifZscore => optional(&self.price_pred_dif_zscore),
            Column::DaysUntilNextHalving => self
                .days_until_next_halving
                .iter()
                .map(|&d| Some(d as f64))
                .collect(),
        }
    }

    /// Values of a column looked up by name; `None` for unknown names.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        name.parse::<Column>().ok().map(|c| self.values(c))
    }

    /// Row index of a period label.
    pub fn position(&self, date: Date) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Model price curve `exp(price_pred)`.
    pub fn predicted_price(&self) -> Vec<Option<f64>> {
        self.price_pred
            .iter()
            .map(|v| v.map(f64::exp).filter(|p| p.is_finite()))
            .collect()
    }

    /// Snapshot of one row.
    pub fn row(&self, i: usize) -> Option<ModelRow> {
        if i >= self.len() {
            return None;
        }
        Some(ModelRow {
            date: self.dates[i],
            projected: self.projected[i],
            generation: self.generation[i],
            stock: self.stock[i],
            year_flow: self.year_flow[i],
            s2f: self.s2f[i],
            s2f_log: self.s2f_log[i],
            s2f_dif: self.s2f_dif[i],
            price: self.price[i],
            price_log: self.price_log[i],
            price_dif: self.price_dif[i],
            s2f_multiple: self.s2f_multiple[i],
            s2f_zscore: self.s2f_zscore[i],
            price_pred: self.price_pred[i],
            price_pred_dif: self.price_pred_dif[i],
            price_pred_dif_zscore: self.price_pred_dif_zscore[i],
            days_until_next_halving: self.days_until_next_halving[i],
        })
    }

    /// Iterates rows in date order.
    pub fn rows(&self) -> impl Iterator<Item = ModelRow> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(column.name().parse::<Column>().unwrap(), column);
        }
        assert!("s2f_price_dif".parse::<Column>().is_err());
    }

    #[test]
    fn test_column_display() {
        assert_eq!(Column::PricePredDifZscore.to_string(), "price_pred_dif_zscore");
    }
}
