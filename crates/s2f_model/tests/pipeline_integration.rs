//! End-to-end tests of the stock-to-flow pipeline.
//!
//! Uses a synthetic halving-asset history: issuance halves on each schedule
//! date and prices trend upward with a seasonal wobble.

use approx::assert_relative_eq;
use s2f_core::math::stats::{mean, population_std_dev};
use s2f_core::types::Date;
use s2f_model::calendar::normalize_and_extend;
use s2f_model::projection::{project_issuance, projection_segments, reference_rate};
use s2f_model::resample::resample_issuance;
use s2f_model::{
    build_model_table, Column, Granularity, HalvingSchedule, IssuanceRecord, ModelConfig,
    PriceRecord, ReferenceWindow,
};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn halvings() -> Vec<Date> {
    vec![
        date(2012, 11, 28),
        date(2016, 7, 9),
        date(2020, 5, 18),
        date(2024, 5, 18),
    ]
}

fn history_end() -> Date {
    date(2021, 6, 30)
}

fn issuance() -> Vec<IssuanceRecord> {
    let schedule = halvings();
    date(2010, 1, 1)
        .days_through(history_end())
        .map(|d| {
            let halvings_passed = schedule.iter().filter(|h| **h <= d).count() as i32;
            IssuanceRecord::new(d, 7200.0 * 0.5_f64.powi(halvings_passed))
        })
        .collect()
}

fn prices() -> Vec<PriceRecord> {
    date(2010, 7, 18)
        .days_through(history_end())
        .enumerate()
        .map(|(i, d)| {
            let t = i as f64;
            let price = 0.1 * (1.0022_f64).powf(t) * (1.0 + 0.2 * (t / 45.0).sin());
            PriceRecord::new(d, price)
        })
        .collect()
}

fn config() -> ModelConfig {
    ModelConfig::default().with_halving_dates(halvings())
}

/// Test the halving projection on the daily stages directly.
#[test]
fn test_projection_halves_per_interval() {
    let day = |n: i64| date(2000, 1, 1).add_days(n - 1).unwrap();
    let records: Vec<IssuanceRecord> =
        (1..=120).map(|n| IssuanceRecord::new(day(n), 10.0)).collect();
    let schedule = HalvingSchedule::new(vec![day(100), day(200), day(300)]).unwrap();

    let daily = normalize_and_extend(&records, day(400)).unwrap();
    let window = ReferenceWindow::new(day(1), day(50));
    let rate = reference_rate(&daily, window).unwrap();
    assert_relative_eq!(rate, 10.0);

    let segments = projection_segments(&schedule, window.end, daily.projection_start());
    let projected = project_issuance(&daily, rate, &segments);
    let periods = resample_issuance(&projected, Granularity::Day).unwrap();
    let stock = periods.stock();
    let at = |n: i64| (day(n) - day(1)) as usize;

    assert_relative_eq!(periods.generation[at(150)], 5.0);
    assert_relative_eq!(periods.generation[at(250)], 2.5);
    assert_relative_eq!(periods.generation[at(350)], 1.25);
    assert_relative_eq!(stock[at(100)], 1000.0);
    assert_relative_eq!(periods.generation[at(400)], 1.25);
}

/// Test the reference-window scenario where projection starts before the first halving.
#[test]
fn test_projection_from_reference_rate_before_first_halving() {
    let day = |n: i64| date(2000, 1, 1).add_days(n - 1).unwrap();
    let records: Vec<IssuanceRecord> =
        (1..=60).map(|n| IssuanceRecord::new(day(n), 4.0)).collect();
    let schedule = HalvingSchedule::new(vec![day(100), day(200)]).unwrap();

    let daily = normalize_and_extend(&records, day(250)).unwrap();
    let window = ReferenceWindow::new(day(1), day(50));
    let rate = reference_rate(&daily, window).unwrap();
    let segments = projection_segments(&schedule, window.end, daily.projection_start());
    let projected = project_issuance(&daily, rate, &segments);
    let idx = |n: i64| projected.index_of(day(n)).unwrap();

    assert_eq!(projected.values()[idx(60)], 4.0);
    assert_eq!(projected.values()[idx(99)], 4.0);
    assert_eq!(projected.values()[idx(100)], 2.0);
    assert_eq!(projected.values()[idx(199)], 2.0);
    assert_eq!(projected.values()[idx(200)], 1.0);
    assert_eq!(projected.values()[idx(250)], 1.0);
}

/// Test that the full daily table honours the stock invariant and the window rule.
#[test]
fn test_daily_table_invariants() {
    let table = build_model_table(&issuance(), &prices(), &config()).unwrap();

    assert_eq!(table.dates()[0], date(2010, 7, 18));
    assert_eq!(*table.dates().last().unwrap(), date(2026, 1, 31));
    assert_eq!(table.last_observed(), history_end());

    let stock = table.stock();
    let generation = table.generation();
    for t in 1..table.len() {
        assert_relative_eq!(stock[t], stock[t - 1] + generation[t], max_relative = 1e-12);
    }

    // 2010-01-01 plus 364 days: first full year of flow
    let year_flow = table.values(Column::YearFlow);
    let first_full = table.position(date(2010, 12, 31)).unwrap();
    assert!(year_flow[first_full - 1].is_none());
    assert_relative_eq!(year_flow[first_full].unwrap(), 7200.0 * 365.0);

    // projected issuance: reference window sits between the 2016 and 2020 halvings
    let pos = |d| table.position(d).unwrap();
    assert_relative_eq!(generation[pos(date(2022, 1, 1))], 900.0);
    assert_relative_eq!(generation[pos(date(2025, 1, 1))], 450.0);
    assert!(table.projected()[pos(history_end())]);
    assert!(!table.projected()[pos(date(2021, 6, 29))]);
}

/// Test that the two anomaly signals are standardised over their defined rows.
#[test]
fn test_anomaly_scores_standardised() {
    let table = build_model_table(&issuance(), &prices(), &config()).unwrap();

    let s2f_z = table.values(Column::S2fZscore);
    assert_relative_eq!(mean(&s2f_z).unwrap(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(population_std_dev(&s2f_z).unwrap(), 1.0, epsilon = 1e-9);

    let resid_z = table.values(Column::PricePredDifZscore);
    assert_relative_eq!(mean(&resid_z).unwrap(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(population_std_dev(&resid_z).unwrap(), 1.0, epsilon = 1e-9);

    // residuals exist only for observed rows inside the fit window
    let resid = table.values(Column::PricePredDif);
    for (i, value) in resid.iter().enumerate() {
        if table.projected()[i] || table.dates()[i] > table.fit_cutoff() {
            assert!(value.is_none(), "row {} should have no residual", table.dates()[i]);
        }
    }
    assert_eq!(
        resid.iter().filter(|v| v.is_some()).count(),
        table.fit().observations
    );
}

/// Test that predictions extend into the projected future.
#[test]
fn test_predictions_extrapolate() {
    let table = build_model_table(&issuance(), &prices(), &config()).unwrap();
    let pos = table.position(date(2025, 6, 1)).unwrap();

    let pred = table.values(Column::PricePred)[pos].unwrap();
    let s2f_log = table.values(Column::S2fLog)[pos].unwrap();
    assert_relative_eq!(pred, table.fit().predict(s2f_log), max_relative = 1e-12);
    assert!(table.values(Column::Price)[pos].is_none());
    assert_relative_eq!(
        table.predicted_price()[pos].unwrap(),
        pred.exp(),
        max_relative = 1e-12
    );
}

/// Test that changing projected issuance never moves the fitted coefficients.
#[test]
fn test_fit_invariant_to_projection() {
    let base = build_model_table(&issuance(), &prices(), &config()).unwrap();
    // window straddles the 2020 halving, so the baseline rate differs
    let alternative = config().with_reference_window(date(2019, 11, 17), date(2020, 11, 17));
    let other = build_model_table(&issuance(), &prices(), &alternative).unwrap();

    let pos = base.position(date(2023, 1, 1)).unwrap();
    assert_ne!(base.generation()[pos], other.generation()[pos]);
    assert_eq!(base.fit(), other.fit());

    let observed = base.position(date(2021, 6, 1)).unwrap();
    assert_eq!(
        base.values(Column::PricePredDifZscore)[..=observed],
        other.values(Column::PricePredDifZscore)[..=observed]
    );
}

/// Test that an explicit fit cutoff narrows the regression but not the predictions.
#[test]
fn test_explicit_fit_cutoff() {
    let cutoff = date(2019, 12, 31);
    let full = build_model_table(&issuance(), &prices(), &config()).unwrap();
    let table = build_model_table(&issuance(), &prices(), &config().with_fit_cutoff(cutoff)).unwrap();

    assert_eq!(table.fit_cutoff(), cutoff);
    assert_eq!(table.last_observed(), history_end());
    assert!(table.fit().observations < full.fit().observations);

    let resid = table.values(Column::PricePredDif);
    let pred = table.values(Column::PricePred);
    let s2f_log = table.values(Column::S2fLog);
    for (i, d) in table.dates().iter().enumerate() {
        if *d > cutoff {
            assert!(resid[i].is_none(), "row {} is past the cutoff", d);
        }
        assert_eq!(pred[i].is_some(), s2f_log[i].is_some(), "row {}", d);
    }
    assert_eq!(
        resid.iter().filter(|v| v.is_some()).count(),
        table.fit().observations
    );

    // observed rows after the cutoff are still predicted and priced
    let pos = table.position(date(2021, 1, 1)).unwrap();
    assert!(table.values(Column::Price)[pos].is_some());
    assert_relative_eq!(
        pred[pos].unwrap(),
        table.fit().predict(s2f_log[pos].unwrap()),
        max_relative = 1e-12
    );
}

/// Test the halving countdown over the daily table.
#[test]
fn test_countdown_segments() {
    let table = build_model_table(&issuance(), &prices(), &config()).unwrap();
    let days = table.days_until_next_halving();
    let dates = table.dates();

    assert_eq!(days[0], date(2012, 11, 28) - date(2010, 7, 18));
    let at = table.position(date(2020, 5, 18)).unwrap();
    assert_eq!(days[at - 1], 1);
    assert_eq!(days[at], date(2024, 5, 18) - date(2020, 5, 18));
    let last_halving = table.position(date(2024, 5, 18)).unwrap();
    assert_eq!(days[last_halving], date(2026, 1, 31) - date(2024, 5, 18));
    assert_eq!(*days.last().unwrap(), 0);

    for i in 1..days.len() {
        if halvings().contains(&dates[i]) {
            assert!(days[i] > days[i - 1]);
        } else {
            assert!(days[i] <= days[i - 1]);
        }
    }
}

/// Test that a scheduled halving past the horizon is the countdown target.
#[test]
fn test_countdown_to_halving_beyond_horizon() {
    let mut schedule = halvings();
    schedule.push(date(2028, 4, 1));
    let table = build_model_table(&issuance(), &prices(), &config().with_halving_dates(schedule)).unwrap();
    let days = table.days_until_next_halving();

    assert_eq!(*table.dates().last().unwrap(), date(2026, 1, 31));
    assert_eq!(*days.last().unwrap(), date(2028, 4, 1) - date(2026, 1, 31));
    let after_last = table.position(date(2024, 5, 18)).unwrap();
    for (i, d) in table.dates().iter().enumerate().skip(after_last) {
        assert_eq!(days[i], date(2028, 4, 1) - *d);
    }
}

/// Test that labels falling after the horizon never count below zero.
#[test]
fn test_countdown_clamped_past_horizon() {
    // 2026-01-31 is a Saturday, so the final weekly label is 2026-02-01
    let cfg = config().with_granularity(Granularity::Week);
    let table = build_model_table(&issuance(), &prices(), &cfg).unwrap();

    assert_eq!(*table.dates().last().unwrap(), date(2026, 2, 1));
    assert_eq!(*table.days_until_next_halving().last().unwrap(), 0);
    assert!(table.days_until_next_halving().iter().all(|d| *d >= 0));
}

/// Test weekly, monthly and yearly resampling of the full table.
#[test]
fn test_coarser_granularities() {
    for granularity in [Granularity::Week, Granularity::Month, Granularity::Year] {
        let cfg = config().with_granularity(granularity);
        let table = build_model_table(&issuance(), &prices(), &cfg).unwrap();

        for (i, d) in table.dates().iter().enumerate() {
            assert_eq!(granularity.period_end(*d).unwrap(), *d, "{} label", granularity);
            if i > 0 {
                assert_relative_eq!(
                    table.stock()[i],
                    table.stock()[i - 1] + table.generation()[i],
                    max_relative = 1e-12
                );
            }
        }
        assert_eq!(table.granularity(), granularity);
    }

    let weekly_config = config().with_granularity(Granularity::Week);
    let weekly = build_model_table(&issuance(), &prices(), &weekly_config).unwrap();
    // 2010-07-18 is a Sunday and closes the first priced week
    assert_eq!(weekly.dates()[0], date(2010, 7, 18));
    let price = weekly.values(Column::Price);
    assert!(price[0].is_some());
}

/// Test that the price relative change matches the resampled prices.
#[test]
fn test_price_dif_matches_prices() {
    let table = build_model_table(&issuance(), &prices(), &config()).unwrap();
    let price = table.values(Column::Price);
    let dif = table.values(Column::PriceDif);

    assert!(dif[0].is_none());
    for i in 1..200 {
        let expected = (price[i].unwrap() - price[i - 1].unwrap()) / price[i - 1].unwrap();
        assert_relative_eq!(dif[i].unwrap(), expected, max_relative = 1e-12);
    }
}

/// Test that identical inputs produce identical tables.
#[test]
fn test_build_is_deterministic() {
    let first = build_model_table(&issuance(), &prices(), &config()).unwrap();
    let second = build_model_table(&issuance(), &prices(), &config()).unwrap();
    assert_eq!(first, second);
}

/// Test that a reference window without observations aborts the build.
#[test]
fn test_reference_window_after_history_fails() {
    let cfg = config().with_reference_window(date(2022, 1, 1), date(2023, 1, 1));
    let err = build_model_table(&issuance(), &prices(), &cfg).unwrap_err();
    assert_eq!(err.kind(), s2f_model::ErrorKind::Configuration);
}
