//! Ordinary least squares linear regression.
//!
//! Solves the normal equations with a Cholesky factorization; a small ridge
//! term on the diagonal keeps near-collinear candidate features solvable.
//! Fitted parameters are plain vectors so the model serializes as part of the
//! persisted pipeline state.

use crate::data::Dataset;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during linear regression
#[derive(Error, Debug)]
pub enum LinearModelError {
    #[error("normal equations matrix is singular and cannot be factorized")]
    SingularMatrix,

    #[error("dimension mismatch: {rows} rows of features, {targets} targets")]
    DimensionMismatch { rows: usize, targets: usize },

    #[error("computation error: {0}")]
    Computation(String),
}

/// Linear regression model fitted by ordinary least squares
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Coefficient per feature
    pub coefficients: Vec<f64>,
    /// Intercept term
    pub intercept: f64,
    /// Whether the model has been fitted
    pub fitted: bool,
}

impl LinearRegression {
    /// Create a new, unfitted model
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit by solving the normal equations β = (X'X)⁻¹X'y
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), LinearModelError> {
        let n = dataset.n_samples();
        if n != dataset.targets.len() {
            return Err(LinearModelError::DimensionMismatch {
                rows: n,
                targets: dataset.targets.len(),
            });
        }

        let x = dataset.features_array();
        let y = dataset.targets_array();

        // Column of ones for the intercept
        let ones = Array2::ones((n, 1));
        let x_design = ndarray::concatenate(Axis(1), &[ones.view(), x.view()])
            .map_err(|e| LinearModelError::Computation(e.to_string()))?;

        let xt = x_design.t();
        let mut xtx = xt.dot(&x_design);
        let xty = xt.dot(&y);

        // Small ridge term for numerical stability
        for i in 0..xtx.nrows() {
            xtx[[i, i]] += 1e-8;
        }

        let beta = cholesky_solve(&xtx, &xty)?;

        self.intercept = beta[0];
        self.coefficients = beta.iter().skip(1).copied().collect();
        self.fitted = true;
        Ok(())
    }

    /// Predict for a single sample
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(c, f)| c * f)
            .sum();
        self.intercept + dot
    }

    /// Predict for every sample in a dataset
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        dataset
            .features
            .iter()
            .map(|f| self.predict_one(f))
            .collect()
    }

    /// Absolute coefficient magnitudes, the linear importance proxy
    pub fn coefficient_magnitudes(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.abs()).collect()
    }
}

/// Solve A x = b for symmetric positive-definite A via Cholesky
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, LinearModelError> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return Err(LinearModelError::SingularMatrix);
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // Forward substitution: L z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * z[j];
        }
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // Backward substitution: L' x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_simple_line() {
        // y = 2 + 3x
        let mut dataset = Dataset::new(vec!["x".to_string()]);
        for i in 1..=5 {
            let x = i as f64;
            dataset.add_sample(vec![x], 2.0 + 3.0 * x);
        }

        let mut model = LinearRegression::new();
        model.fit(&dataset).unwrap();

        assert_relative_eq!(model.intercept, 2.0, epsilon = 1e-4);
        assert_relative_eq!(model.coefficients[0], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_multiple_features() {
        // y = 1 + 2x1 - 3x2
        let mut dataset = Dataset::new(vec!["x1".to_string(), "x2".to_string()]);
        let points = [
            (1.0, 2.0),
            (2.0, 1.0),
            (3.0, 5.0),
            (4.0, 0.0),
            (5.0, 3.0),
            (6.0, 2.0),
        ];
        for (x1, x2) in points {
            dataset.add_sample(vec![x1, x2], 1.0 + 2.0 * x1 - 3.0 * x2);
        }

        let mut model = LinearRegression::new();
        model.fit(&dataset).unwrap();

        for (features, target) in dataset.features.iter().zip(dataset.targets.iter()) {
            assert_relative_eq!(model.predict_one(features), *target, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_coefficient_magnitudes_are_absolute() {
        let model = LinearRegression {
            coefficients: vec![-4.0, 1.5],
            intercept: 0.0,
            fitted: true,
        };
        assert_eq!(model.coefficient_magnitudes(), vec![4.0, 1.5]);
    }

    #[test]
    fn test_constant_feature_still_solves() {
        // A constant column is collinear with the intercept; the ridge term
        // keeps the factorization alive
        let mut dataset = Dataset::new(vec!["c".to_string(), "x".to_string()]);
        for i in 0..6 {
            let x = i as f64;
            dataset.add_sample(vec![1.0, x], 10.0 + x);
        }

        let mut model = LinearRegression::new();
        model.fit(&dataset).unwrap();

        assert_relative_eq!(model.predict_one(&[1.0, 3.0]), 13.0, epsilon = 1e-3);
    }
}
