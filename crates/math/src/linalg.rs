//! Linear algebra operations for the factor regression.

use ndarray::{Array1, Array2};

use crate::MathError;

/// Eigenvalues below this fraction of the largest one are treated as zero.
const PINV_RCOND: f64 = 1e-12;

/// A coefficient whose unit vector has more than this squared weight in the
/// dropped subspace is not estimable.
const NULL_WEIGHT_TOL: f64 = 1e-8;

/// Response spread, relative to `1 + max |y|`, below which the response is
/// treated as constant.
const CONSTANT_RESPONSE_TOL: f64 = 1e-12;

/// Maximum number of Jacobi sweeps before giving up.
const MAX_SWEEPS: usize = 100;

/// Result of ordinary least squares regression.
#[derive(Debug, Clone)]
pub struct OlsResult {
    /// Estimated coefficients.
    pub coefficients: Array1<f64>,
    /// Fitted values.
    pub fitted: Array1<f64>,
    /// Residuals.
    pub residuals: Array1<f64>,
    /// R-squared (centered), undefined when the response is constant.
    pub r_squared: Option<f64>,
    /// Adjusted R-squared, undefined without residual degrees of freedom.
    pub adj_r_squared: Option<f64>,
    /// Numerical rank of the design matrix.
    pub rank: usize,
    /// Residual degrees of freedom, `n - rank`.
    pub df_resid: usize,
    /// Pseudo-inverse of `X'X`, the bread of every sandwich covariance.
    pub xtx_pinv: Array2<f64>,
    /// Whether each coefficient is identified by the sample. Coefficients
    /// with a component in the null space of `X` are not.
    pub estimable: Vec<bool>,
}

impl OlsResult {
    /// Number of observations.
    #[must_use]
    pub fn n_obs(&self) -> usize {
        self.residuals.len()
    }

    /// Sum of squared residuals.
    #[must_use]
    pub fn ssr(&self) -> f64 {
        self.residuals.iter().map(|e| e * e).sum()
    }
}

/// Perform ordinary least squares regression.
///
/// Solves: argmin_beta sum((y_i - X_i * beta)^2)
///
/// Columns are scaled to unit norm and the normal equations solved through
/// the Moore-Penrose pseudo-inverse of the scaled `X'X`. A regressor with a
/// small scale is therefore still estimated, while a rank-deficient design
/// (for example a regressor that is identically zero) yields the
/// minimum-norm solution with the affected coefficients marked not
/// estimable.
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Design matrix (n x p), including any constant column
///
/// # Errors
/// Returns error if dimensions mismatch, the input is empty or contains
/// non-finite values, or the eigen-decomposition does not converge.
pub fn ordinary_least_squares(y: &Array1<f64>, x: &Array2<f64>) -> Result<OlsResult, MathError> {
    let n = y.len();

    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }
    if n == 0 || x.ncols() == 0 {
        return Err(MathError::EmptyData);
    }
    if !y.iter().all(|v| v.is_finite()) {
        return Err(MathError::NonFinite("response"));
    }
    if !x.iter().all(|v| v.is_finite()) {
        return Err(MathError::NonFinite("design matrix"));
    }

    // Equilibrate columns so the rank cutoff reflects collinearity, not scale.
    let scale: Array1<f64> = x
        .columns()
        .into_iter()
        .map(|c| {
            let norm = c.dot(&c).sqrt();
            if norm > 0.0 { norm } else { 1.0 }
        })
        .collect();
    let xs = x / &scale;

    let xtx = xs.t().dot(&xs);
    let (eigenvalues, eigenvectors) = symmetric_eigen(&xtx)?;
    let max_eig = eigenvalues.iter().fold(0.0_f64, |m, &v| m.max(v));
    let cutoff = max_eig * PINV_RCOND;

    let p = x.ncols();
    let mut pinv_scaled = Array2::<f64>::zeros((p, p));
    let mut null_weight = vec![0.0; p];
    let mut rank = 0;
    for (k, &lambda) in eigenvalues.iter().enumerate() {
        let v = eigenvectors.column(k);
        if lambda <= cutoff || lambda <= 0.0 {
            for (w, vi) in null_weight.iter_mut().zip(v.iter()) {
                *w += vi * vi;
            }
            continue;
        }
        rank += 1;
        for i in 0..p {
            for j in 0..p {
                pinv_scaled[[i, j]] += v[i] * v[j] / lambda;
            }
        }
    }

    // (X'X)+ = D^-1 (Xs'Xs)+ D^-1 with D = diag(scale)
    let xtx_pinv = Array2::from_shape_fn((p, p), |(i, j)| {
        pinv_scaled[[i, j]] / (scale[i] * scale[j])
    });
    let estimable = null_weight.iter().map(|&w| w <= NULL_WEIGHT_TOL).collect();

    let coefficients = xtx_pinv.dot(&x.t().dot(y));

    let fitted = x.dot(&coefficients);
    let residuals = y - &fitted;

    let y_mean = y.mean().unwrap_or(0.0);
    let y_max = y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let ss_res: f64 = residuals.iter().map(|r| r.powi(2)).sum();
    let spread = (ss_tot / n as f64).sqrt();
    let r_squared =
        (spread > CONSTANT_RESPONSE_TOL * (1.0 + y_max)).then(|| 1.0 - ss_res / ss_tot);

    let df_resid = n.saturating_sub(rank);
    let adj_r_squared = r_squared
        .filter(|_| df_resid > 0)
        .map(|r2| 1.0 - (1.0 - r2) * (n as f64 - 1.0) / df_resid as f64);

    Ok(OlsResult {
        coefficients,
        fitted,
        residuals,
        r_squared,
        adj_r_squared,
        rank,
        df_resid,
        xtx_pinv,
        estimable,
    })
}

/// Moore-Penrose pseudo-inverse of a symmetric positive semi-definite matrix.
///
/// # Returns
/// Tuple of (pseudo-inverse, numerical rank).
///
/// # Errors
/// Returns error if the matrix is not square or the decomposition fails.
pub fn pseudo_inverse_symmetric(a: &Array2<f64>) -> Result<(Array2<f64>, usize), MathError> {
    let n = a.nrows();
    let (eigenvalues, eigenvectors) = symmetric_eigen(a)?;

    let max_eig = eigenvalues.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    let cutoff = max_eig * PINV_RCOND;

    let mut pinv = Array2::zeros((n, n));
    let mut rank = 0;
    for (k, &lambda) in eigenvalues.iter().enumerate() {
        if lambda <= cutoff || lambda <= 0.0 {
            continue;
        }
        rank += 1;
        let v = eigenvectors.column(k);
        for i in 0..n {
            for j in 0..n {
                pinv[[i, j]] += v[i] * v[j] / lambda;
            }
        }
    }

    Ok((pinv, rank))
}

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations.
///
/// # Returns
/// Tuple of (eigenvalues, eigenvectors) where column `k` of the second
/// element is the eigenvector for eigenvalue `k`. Order is unspecified.
///
/// # Errors
/// Returns error if the matrix is empty, not square, or fails to converge.
pub fn symmetric_eigen(a: &Array2<f64>) -> Result<(Array1<f64>, Array2<f64>), MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::NotSquare { rows: n, cols: a.ncols() });
    }

    let mut m = a.clone();
    let mut v = Array2::<f64>::eye(n);

    let norm: f64 = m.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 {
        return Ok((Array1::zeros(n), v));
    }
    let tol = norm * 1e-14;

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| m[[p, q]].powi(2))
            .sum::<f64>()
            .sqrt();
        if off <= tol {
            return Ok((m.diag().to_owned(), v));
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = m[[p, q]];
                if apq.abs() <= f64::MIN_POSITIVE {
                    continue;
                }

                // rotation angle that annihilates m[p, q]
                let theta = (m[[q, q]] - m[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + theta.mul_add(theta, 1.0).sqrt());
                let c = 1.0 / t.mul_add(t, 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let mkp = m[[k, p]];
                    let mkq = m[[k, q]];
                    m[[k, p]] = c * mkp - s * mkq;
                    m[[k, q]] = s * mkp + c * mkq;
                }
                for k in 0..n {
                    let mpk = m[[p, k]];
                    let mqk = m[[q, k]];
                    m[[p, k]] = c * mpk - s * mqk;
                    m[[q, k]] = s * mpk + c * mqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
                m[[p, q]] = 0.0;
                m[[q, p]] = 0.0;
            }
        }
    }

    Err(MathError::NoConvergence { sweeps: MAX_SWEEPS })
}
