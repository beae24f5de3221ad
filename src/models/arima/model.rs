//! ARIMA model fit by conditional least squares.

use crate::core::{Forecast, Series};
use crate::error::{ForecastError, Result};
use crate::models::arima::diff::{difference, integrate};
use crate::models::Forecaster;
use crate::utils::optimization::{minimize, MinimizeConfig};

/// Default recency window: only the trailing observations are fit, trading
/// long-history signal for stationarity and fit speed.
pub const DEFAULT_WINDOW: usize = 100;

/// ARIMA order specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    /// Autoregressive order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// Moving-average order.
    pub q: usize,
}

impl ArimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Minimum observations required to fit this order.
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(2, 1, 2)
    }
}

#[derive(Debug, Clone)]
struct FittedState {
    /// The windowed observations the model was fit on.
    history: Series,
    /// History on the differenced scale.
    differenced: Vec<f64>,
    /// One-step residuals on the differenced scale, for the MA recursion.
    residuals: Vec<f64>,
}

/// Fixed-order ARIMA over a bounded recency window.
///
/// Timestamps are consumed in the series' existing order; duplicates or
/// out-of-order rows are not rejected here, so callers wanting strict
/// chronology must enforce it upstream.
#[derive(Debug, Clone)]
pub struct Arima {
    order: ArimaOrder,
    window: usize,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    state: Option<FittedState>,
}

impl Arima {
    /// Create a model with the given order and the default window.
    pub fn new(order: ArimaOrder) -> Self {
        Self {
            order,
            window: DEFAULT_WINDOW,
            ar: Vec::new(),
            ma: Vec::new(),
            intercept: 0.0,
            state: None,
        }
    }

    /// Restrict fitting to the last `window` observations.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Conditional sum of squares for a candidate parameter set.
    fn css(diff: &[f64], p: usize, q: usize, ar: &[f64], ma: &[f64], intercept: f64) -> f64 {
        let n = diff.len();
        let start = p.max(q);
        if n <= start {
            return f64::MAX;
        }

        let mut residuals = vec![0.0; n];
        let mut total = 0.0;
        for t in start..n {
            let mut pred = intercept;
            for i in 0..p {
                pred += ar[i] * (diff[t - 1 - i] - intercept);
            }
            for i in 0..q {
                pred += ma[i] * residuals[t - 1 - i];
            }
            let err = diff[t] - pred;
            residuals[t] = err;
            total += err * err;
        }
        total
    }

    fn estimate_parameters(&mut self, diff: &[f64]) {
        let p = self.order.p;
        let q = self.order.q;
        let mean = diff.iter().sum::<f64>() / diff.len() as f64;

        // A flat differenced series has nothing to optimize; the mean-only
        // model is exact and keeps the fit deterministic.
        let spread = diff.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max);
        if (p == 0 && q == 0) || spread == 0.0 {
            self.intercept = mean;
            self.ar = vec![0.0; p];
            self.ma = vec![0.0; q];
            return;
        }

        let mut initial = vec![0.0; 1 + p + q];
        initial[0] = mean;
        for i in 0..p {
            initial[1 + i] = 0.1 / (i + 1) as f64;
        }
        for i in 0..q {
            initial[1 + p + i] = 0.1 / (i + 1) as f64;
        }

        // Stationarity/invertibility bounds on the AR and MA terms.
        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
        bounds.extend(std::iter::repeat((-0.99, 0.99)).take(p + q));

        let best = minimize(
            |params| {
                let ar = &params[1..1 + p];
                let ma = &params[1 + p..];
                Self::css(diff, p, q, ar, ma, params[0])
            },
            &initial,
            Some(&bounds),
            MinimizeConfig::default(),
        );

        self.intercept = best[0];
        self.ar = best[1..1 + p].to_vec();
        self.ma = best[1 + p..].to_vec();
    }

    fn residuals_on_diff_scale(&self, diff: &[f64]) -> Vec<f64> {
        let p = self.order.p;
        let q = self.order.q;
        let start = p.max(q);

        let mut residuals = vec![0.0; diff.len()];
        for t in start..diff.len() {
            let mut pred = self.intercept;
            for i in 0..p {
                pred += self.ar[i] * (diff[t - 1 - i] - self.intercept);
            }
            for i in 0..q {
                pred += self.ma[i] * residuals[t - 1 - i];
            }
            residuals[t] = diff[t] - pred;
        }
        residuals
    }
}

impl Default for Arima {
    fn default() -> Self {
        Self::new(ArimaOrder::default())
    }
}

impl Forecaster for Arima {
    fn fit(&mut self, series: &Series) -> Result<()> {
        let history = series.tail(self.window);
        let needed = self.order.min_observations();
        if history.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: history.len(),
            });
        }
        if history.values().iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ComputationError(
                "non-finite value in input series".to_string(),
            ));
        }

        let diff = difference(history.values(), self.order.d);
        self.estimate_parameters(&diff);

        if !self.intercept.is_finite()
            || self.ar.iter().chain(self.ma.iter()).any(|c| !c.is_finite())
        {
            return Err(ForecastError::ComputationError(
                "parameter estimation produced non-finite coefficients".to_string(),
            ));
        }

        let residuals = self.residuals_on_diff_scale(&diff);
        self.state = Some(FittedState {
            history,
            differenced: diff,
            residuals,
        });
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        if horizon == 0 {
            return Ok(Forecast::default());
        }

        let p = self.order.p;
        let q = self.order.q;

        // Recurse forward on the differenced scale; future shocks are zero.
        let mut extended = state.differenced.clone();
        let mut residuals = state.residuals.clone();
        for _ in 0..horizon {
            let t = extended.len();
            let mut pred = self.intercept;
            for i in 0..p {
                if t > i {
                    pred += self.ar[i] * (extended[t - 1 - i] - self.intercept);
                }
            }
            for i in 0..q {
                if t > i {
                    pred += self.ma[i] * residuals[t - 1 - i];
                }
            }
            extended.push(pred);
            residuals.push(0.0);
        }

        let forecast_diff = &extended[state.differenced.len()..];
        let values = integrate(forecast_diff, state.history.values(), self.order.d);
        let timestamps = state.history.future_timestamps(horizon)?;

        Ok(Forecast::new(timestamps, values))
    }

    fn name(&self) -> &str {
        "ARIMA"
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}
