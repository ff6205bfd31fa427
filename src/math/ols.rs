//! Ordinary least squares.
//!
//! Used by the response-recovery check, which regresses simulated sales on the
//! transformed covariates:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! The design is tall (thousands of rows, ~20 columns) and the spend columns
//! are strongly correlated through base spend, so we solve via SVD rather than
//! the normal equations.

use nalgebra::{DMatrix, DVector};

/// Coefficients plus fit diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub coefficients: Vec<f64>,
    pub residual_sd: f64,
    pub r_squared: f64,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y ~ rows` where every row has the same length.
pub fn fit_ols(rows: &[Vec<f64>], y: &[f64]) -> Option<OlsFit> {
    let n = rows.len();
    let k = rows.first()?.len();
    if n != y.len() || n <= k || rows.iter().any(|r| r.len() != k) {
        return None;
    }

    let x = DMatrix::from_fn(n, k, |i, j| rows[i][j]);
    let yv = DVector::from_column_slice(y);
    let beta = solve_least_squares(&x, &yv)?;

    let fitted = &x * &beta;
    let resid = &yv - fitted;
    let sse = resid.norm_squared();
    let mean = yv.mean();
    let sst: f64 = yv.iter().map(|v| (v - mean).powi(2)).sum();

    Some(OlsFit {
        coefficients: beta.iter().copied().collect(),
        residual_sd: (sse / (n - k) as f64).sqrt(),
        r_squared: if sst > 0.0 { 1.0 - sse / sst } else { 1.0 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_reports_perfect_fit() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![1.0, i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| 1.0 - 0.5 * i as f64).collect();
        let fit = fit_ols(&rows, &y).unwrap();
        assert!((fit.coefficients[0] - 1.0).abs() < 1e-10);
        assert!((fit.coefficients[1] + 0.5).abs() < 1e-10);
        assert!(fit.residual_sd < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fit_rejects_ragged_or_short_input() {
        assert!(fit_ols(&[vec![1.0, 2.0], vec![1.0]], &[1.0, 2.0]).is_none());
        assert!(fit_ols(&[vec![1.0, 2.0]], &[1.0]).is_none());
    }
}
