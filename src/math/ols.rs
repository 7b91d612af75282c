//! Ordinary least squares with goodness-of-fit statistics.
//!
//! Every regression in this project has the form
//!
//! ```text
//! y = X β + ε,   X = [1, x_1, ..., x_p]
//! ```
//!
//! with an intercept column first and `p ∈ {1, 2}` regressors.
//!
//! Implementation choices:
//! - We solve the least-squares problem with SVD so tall design matrices
//!   (more rows than columns) are handled without forming `XᵀX`.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - R² is computed from the residual and total sums of squares around the
//!   sample mean, and adjusted R² penalizes it by the regressor count.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Result of an OLS fit.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub betas: Vec<f64>,
    pub n: usize,
    /// Regressors excluding the intercept.
    pub p: usize,
    pub sse: f64,
    pub sst: f64,
    pub r_squared: f64,
    pub adj_r_squared: f64,
}

/// Fit `y` on the design `x` (intercept column included by the caller).
///
/// Requires `n >= p + 2` so the adjusted R² denominator `n - p - 1` is positive.
pub fn ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit, FitError> {
    let n = x.nrows();
    let p = x.ncols().saturating_sub(1);
    let required = p + 2;
    if n < required || y.len() != n {
        return Err(FitError::InsufficientObservations { n, required });
    }

    let y_mean = y.mean();
    let sst: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();
    if !(sst.is_finite() && sst > 0.0) {
        return Err(FitError::ZeroVariance { n });
    }

    let beta = solve_least_squares(x, y).ok_or(FitError::Singular)?;
    let residuals = y - x * &beta;
    let sse = residuals.norm_squared();

    let r_squared = 1.0 - sse / sst;
    let adj_r_squared = adjusted_r_squared(r_squared, n, p);

    Ok(OlsFit {
        betas: beta.iter().copied().collect(),
        n,
        p,
        sse,
        sst,
        r_squared,
        adj_r_squared,
    })
}

/// `1 - (1 - R²)(n - 1)/(n - p - 1)`.
pub fn adjusted_r_squared(r_squared: f64, n: usize, p: usize) -> f64 {
    let n = n as f64;
    let p = p as f64;
    1.0 - (1.0 - r_squared) * (n - 1.0) / (n - p - 1.0)
}
