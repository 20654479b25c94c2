//! Ordinary least squares solver.
//!
//! The salary regression is one linear problem:
//!
//! ```text
//! minimize Σ (salary_i - x_i^T β)^2
//! ```
//!
//! where `x_i` is the dummy-encoded design row for employee `i`.
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly for tall design
//!   matrices (many more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - Dummy columns for near-empty category levels can be nearly collinear, so
//!   we try progressively looser singular-value tolerances before giving up.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_handles_dummy_columns() {
        // y = 10 + 2x + 5*dummy, overdetermined.
        let x = DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                1.0, 2.0, 1.0, //
                1.0, 3.0, 1.0,
            ],
        );
        let y = DVector::from_row_slice(&[10.0, 12.0, 19.0, 21.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 10.0).abs() < 1e-8);
        assert!((beta[1] - 2.0).abs() < 1e-8);
        assert!((beta[2] - 5.0).abs() < 1e-8);
    }
}
