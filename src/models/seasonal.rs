//! Structural model: linear trend plus Fourier seasonality.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::regression::{ols_line, ridge_solve};

const WEEKLY_PERIOD_DAYS: f64 = 7.0;
const WEEKLY_ORDER: usize = 3;
const YEARLY_PERIOD_DAYS: f64 = 365.25;
const YEARLY_ORDER: usize = 10;

/// Tiny ridge penalty keeps the normal equations solvable when Fourier
/// columns are nearly collinear on short histories.
const RIDGE_LAMBDA: f64 = 1e-8;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One seasonality component expanded as a truncated Fourier basis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FourierBlock {
    period_days: f64,
    order: usize,
}

impl FourierBlock {
    fn num_terms(&self) -> usize {
        2 * self.order
    }

    /// Append this block's sin/cos features at elapsed time `t_days`.
    fn push_features(&self, t_days: f64, out: &mut Vec<f64>) {
        for k in 1..=self.order {
            let angle = 2.0 * std::f64::consts::PI * k as f64 * t_days / self.period_days;
            out.push(angle.sin());
            out.push(angle.cos());
        }
    }
}

#[derive(Debug, Clone)]
struct FittedState {
    history: Series,
    origin: DateTime<Utc>,
    span_seconds: f64,
    intercept: f64,
    slope: f64,
    blocks: Vec<FourierBlock>,
    beta: Vec<f64>,
}

impl FittedState {
    /// Model value at an arbitrary timestamp, in-sample or extrapolated.
    fn value_at(&self, ts: DateTime<Utc>) -> f64 {
        let t_seconds = (ts - self.origin).num_seconds() as f64;
        let mut value = self.intercept + self.slope * (t_seconds / self.span_seconds);

        if !self.blocks.is_empty() {
            let t_days = t_seconds / SECONDS_PER_DAY;
            let mut features = Vec::with_capacity(self.beta.len());
            for block in &self.blocks {
                block.push_features(t_days, &mut features);
            }
            value += features
                .iter()
                .zip(self.beta.iter())
                .map(|(f, b)| f * b)
                .sum::<f64>();
        }
        value
    }
}

/// Additive trend-plus-seasonality forecaster.
///
/// Fits a linear trend by ordinary least squares, then regresses the trend
/// residuals onto weekly and yearly Fourier terms. A seasonality block is
/// only activated when the observed span covers at least two of its periods,
/// matching the usual auto-seasonality rule. Predictions cover the full
/// in-sample range plus the requested horizon, so callers can plot fit and
/// extrapolation from one result.
#[derive(Debug, Clone, Default)]
pub struct SeasonalModel {
    state: Option<FittedState>,
}

impl SeasonalModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_blocks(span_days: f64) -> Vec<FourierBlock> {
        let candidates = [
            FourierBlock {
                period_days: WEEKLY_PERIOD_DAYS,
                order: WEEKLY_ORDER,
            },
            FourierBlock {
                period_days: YEARLY_PERIOD_DAYS,
                order: YEARLY_ORDER,
            },
        ];
        candidates
            .into_iter()
            .filter(|b| span_days >= 2.0 * b.period_days)
            .collect()
    }
}

impl Forecaster for SeasonalModel {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let distinct: BTreeSet<_> = series.timestamps().iter().collect();
        if distinct.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: distinct.len(),
            });
        }
        if series.values().iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ComputationError(
                "non-finite value in input series".to_string(),
            ));
        }

        let origin = **distinct.iter().next().ok_or(ForecastError::EmptyData)?;
        let end = **distinct.iter().last().ok_or(ForecastError::EmptyData)?;
        let span_seconds = (end - origin).num_seconds() as f64;

        // Trend over scaled time keeps the OLS problem well conditioned
        // regardless of the series' absolute epoch.
        let x: Vec<f64> = series
            .timestamps()
            .iter()
            .map(|ts| (*ts - origin).num_seconds() as f64 / span_seconds)
            .collect();
        let (intercept, slope) = ols_line(&x, series.values());

        let residuals: Vec<f64> = series
            .values()
            .iter()
            .zip(x.iter())
            .map(|(y, xi)| y - (intercept + slope * xi))
            .collect();

        let blocks = Self::active_blocks(span_seconds / SECONDS_PER_DAY);
        let beta = if blocks.is_empty() {
            Vec::new()
        } else {
            let width: usize = blocks.iter().map(FourierBlock::num_terms).sum();
            let rows: Vec<Vec<f64>> = series
                .timestamps()
                .iter()
                .map(|ts| {
                    let t_days = (*ts - origin).num_seconds() as f64 / SECONDS_PER_DAY;
                    let mut row = Vec::with_capacity(width);
                    for block in &blocks {
                        block.push_features(t_days, &mut row);
                    }
                    row
                })
                .collect();
            ridge_solve(&rows, &residuals, RIDGE_LAMBDA)?
        };

        self.state = Some(FittedState {
            history: series.clone(),
            origin,
            span_seconds,
            intercept,
            slope,
            blocks,
            beta,
        });
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;

        let mut timestamps = state.history.timestamps().to_vec();
        if horizon > 0 {
            timestamps.extend(state.history.future_timestamps(horizon)?);
        }
        let values: Vec<f64> = timestamps.iter().map(|ts| state.value_at(*ts)).collect();

        Ok(Forecast::new(timestamps, values))
    }

    fn name(&self) -> &str {
        "seasonal"
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}
