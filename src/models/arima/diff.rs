//! Differencing and integration for the ARIMA model.

/// Difference a series `d` times. Each pass shortens the series by one.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Reverse `d` levels of differencing on forecast values.
///
/// `original` supplies the anchor value at each differencing level so the
/// cumulative sums continue from where the observed series ended.
pub fn integrate(forecast_diff: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    let mut result = forecast_diff.to_vec();
    for level in (0..d).rev() {
        let anchor = *difference(original, level).last().unwrap_or(&0.0);
        let mut cumsum = anchor;
        for v in &mut result {
            cumsum += *v;
            *v = cumsum;
        }
    }
    result
}
