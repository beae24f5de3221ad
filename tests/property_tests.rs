//! Property-based tests for the frame, builder and model layers.
//!
//! These verify invariants that should hold for all valid inputs, using
//! randomly generated frames and series.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use tablecast::builder::build_series;
use tablecast::core::Series;
use tablecast::frame::{classify, Column, Frame};
use tablecast::models::{Arima, Forecaster, SeasonalModel};

/// Create a daily series from a vector of values.
fn make_daily(values: &[f64]) -> Series {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps: Vec<_> = (0..values.len())
        .map(|i| base + Duration::days(i as i64))
        .collect();
    Series::new(timestamps, values.to_vec()).unwrap()
}

/// Strategy for series values in a range that avoids numerical extremes.
fn valid_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len)
        .prop_flat_map(|len| prop::collection::vec(-1000.0..1000.0_f64, len))
}

proptest! {
    /// Every column lands in exactly one primary role, and date candidates
    /// are always a subset of the categorical columns.
    #[test]
    fn classification_partitions_columns(
        n_numeric in 0usize..4,
        n_text in 0usize..4,
        n_date in 0usize..4,
    ) {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut columns = Vec::new();
        for i in 0..n_numeric {
            columns.push(Column::numeric(format!("num{i}"), vec![Some(1.0)]));
        }
        for i in 0..n_text {
            columns.push(Column::text(format!("txt{i}"), vec![Some("x".to_string())]));
        }
        for i in 0..n_date {
            columns.push(Column::date(format!("dat{i}"), vec![Some(base)]));
        }
        prop_assume!(!columns.is_empty());
        let frame = Frame::new(columns).unwrap();

        let classification = classify(&frame);
        prop_assert!(classification.numeric.is_disjoint(&classification.categorical));
        prop_assert!(classification.date_candidates.is_subset(&classification.categorical));
        prop_assert_eq!(
            classification.numeric.len() + classification.categorical.len(),
            frame.num_columns()
        );
    }

    /// The series builder never lets a null or non-finite value through,
    /// and never invents rows.
    #[test]
    fn built_series_is_dense_and_finite(
        rows in prop::collection::vec(
            (prop::option::of(0i64..3000), prop::option::of(-1e6..1e6_f64)),
            1..80,
        ),
    ) {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let dates: Vec<_> = rows
            .iter()
            .map(|(d, _)| d.map(|d| (base + Duration::days(d)).format("%Y-%m-%d").to_string()))
            .collect();
        let values: Vec<_> = rows.iter().map(|(_, v)| *v).collect();
        let frame = Frame::new(vec![
            Column::text("ds", dates),
            Column::numeric("y", values),
        ])
        .unwrap();

        let expected = rows.iter().filter(|(d, v)| d.is_some() && v.is_some()).count();
        match build_series(&frame, "ds", "y") {
            Ok(series) => {
                prop_assert_eq!(series.len(), expected);
                prop_assert!(series.values().iter().all(|v| v.is_finite()));
            }
            Err(_) => prop_assert_eq!(expected, 0),
        }
    }

    /// The seasonal model always covers its history plus the horizon, with
    /// future timestamps strictly increasing past the last observation.
    #[test]
    fn seasonal_forecast_shape(
        values in valid_values_strategy(2, 120),
        horizon in 1usize..40,
    ) {
        let series = make_daily(&values);
        let mut model = SeasonalModel::new();
        let forecast = model.fit_and_forecast(&series, horizon).unwrap();

        prop_assert_eq!(forecast.len(), values.len() + horizon);
        prop_assert!(forecast.values().iter().all(|v| v.is_finite()));

        let last = *series.timestamps().last().unwrap();
        let future = &forecast.timestamps()[values.len()..];
        prop_assert!(future.iter().all(|ts| *ts > last));
        prop_assert!(future.windows(2).all(|w| w[1] > w[0]));
    }

    /// ARIMA returns exactly the requested horizon of finite, forward-dated
    /// predictions whenever it has enough data to fit.
    #[test]
    fn arima_forecast_shape(
        values in valid_values_strategy(6, 90),
        horizon in 1usize..40,
    ) {
        let series = make_daily(&values);
        let mut model = Arima::default();
        let forecast = model.fit_and_forecast(&series, horizon).unwrap();

        prop_assert_eq!(forecast.len(), horizon);
        prop_assert!(forecast.values().iter().all(|v| v.is_finite()));

        let last = *series.timestamps().last().unwrap();
        prop_assert!(forecast.timestamps().iter().all(|ts| *ts > last));
        prop_assert!(forecast.timestamps().windows(2).all(|w| w[1] > w[0]));
    }

    /// Windowing commutes with fitting: a model windowed to `w` behaves the
    /// same as one fit directly on the series tail.
    #[test]
    fn arima_window_matches_explicit_tail(
        values in valid_values_strategy(20, 60),
    ) {
        let series = make_daily(&values);

        let mut windowed = Arima::default().with_window(15);
        windowed.fit(&series).unwrap();

        let mut direct = Arima::default().with_window(15);
        direct.fit(&series.tail(15)).unwrap();

        prop_assert_eq!(windowed.predict(10).unwrap(), direct.predict(10).unwrap());
    }
}
