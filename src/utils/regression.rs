//! Least-squares helpers for the structural model.

use crate::error::{ForecastError, Result};

/// Fit a straight line `y = intercept + slope * x` by ordinary least
/// squares. Returns `(intercept, slope)`; a degenerate x-range yields a
/// flat line through the mean.
pub fn ols_line(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len().min(y.len());
    if n == 0 {
        return (0.0, 0.0);
    }

    let x_mean = x[..n].iter().sum::<f64>() / n as f64;
    let y_mean = y[..n].iter().sum::<f64>() / n as f64;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for i in 0..n {
        let dx = x[i] - x_mean;
        ss_xx += dx * dx;
        ss_xy += dx * (y[i] - y_mean);
    }

    let slope = if ss_xx > 0.0 { ss_xy / ss_xx } else { 0.0 };
    (y_mean - slope * x_mean, slope)
}

/// Solve the ridge-regularized normal equations
/// `(X'X + lambda I) beta = X'y` for a row-major design matrix.
///
/// Each element of `rows` is one observation's feature vector. The ridge
/// term keeps the system positive definite for collinear features.
pub fn ridge_solve(rows: &[Vec<f64>], y: &[f64], lambda: f64) -> Result<Vec<f64>> {
    let n = rows.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if y.len() != n {
        return Err(ForecastError::DimensionMismatch {
            expected: n,
            got: y.len(),
        });
    }
    let p = rows[0].len();
    if p == 0 {
        return Ok(Vec::new());
    }

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];
    for (row, &yi) in rows.iter().zip(y.iter()) {
        if row.len() != p {
            return Err(ForecastError::DimensionMismatch {
                expected: p,
                got: row.len(),
            });
        }
        for a in 0..p {
            xty[a] += row[a] * yi;
            for b in a..p {
                xtx[a][b] += row[a] * row[b];
            }
        }
    }
    // Mirror the upper triangle and apply the ridge term.
    for a in 0..p {
        for b in 0..a {
            xtx[a][b] = xtx[b][a];
        }
        xtx[a][a] += lambda;
    }

    solve_symmetric(&xtx, &xty).ok_or_else(|| {
        ForecastError::ComputationError("normal equations not positive definite".to_string())
    })
}

/// Solve `A x = b` for symmetric positive definite `A` via Cholesky
/// decomposition.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L L'
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * z[j];
        }
        z[i] = sum / l[i][i];
    }

    // L' x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
