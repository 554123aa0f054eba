//! Regression metrics for evaluating model performance

use serde::{Deserialize, Serialize};

/// Collection of regression metrics over a held-out split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// R-squared (coefficient of determination)
    pub r2: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Absolute Percentage Error, in percent
    pub mape: f64,
    /// Largest absolute error
    pub max_error: f64,
    /// Explained variance score
    pub explained_variance: f64,
    /// Number of samples
    pub n_samples: usize,
}

impl RegressionMetrics {
    /// Calculate all regression metrics
    pub fn calculate(y_true: &[f64], y_pred: &[f64]) -> Self {
        let mse = Self::mean_squared_error(y_true, y_pred);

        Self {
            r2: Self::r_squared(y_true, y_pred),
            mse,
            rmse: mse.sqrt(),
            mae: Self::mean_absolute_error(y_true, y_pred),
            mape: Self::mean_absolute_percentage_error(y_true, y_pred),
            max_error: Self::max_error(y_true, y_pred),
            explained_variance: Self::explained_variance(y_true, y_pred),
            n_samples: y_true.len(),
        }
    }

    /// Mean Squared Error: (1/n) * Σ(y_true - y_pred)²
    pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let n = y_true.len() as f64;
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum::<f64>()
            / n
    }

    /// Mean Absolute Error: (1/n) * Σ|y_true - y_pred|
    pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let n = y_true.len() as f64;
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum::<f64>()
            / n
    }

    /// R-squared (coefficient of determination)
    /// R² = 1 - SS_res / SS_tot
    pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let n = y_true.len() as f64;
        let y_mean = y_true.iter().sum::<f64>() / n.max(1.0);

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = y_true.iter().map(|&t| (t - y_mean).powi(2)).sum();

        if ss_tot < 1e-10 {
            return 0.0;
        }

        1.0 - ss_res / ss_tot
    }

    /// Mean Absolute Percentage Error in percent, with the denominator
    /// floored at 1e-8 so near-zero targets stay finite
    pub fn mean_absolute_percentage_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let n = y_true.len() as f64;
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs() / t.abs().max(1e-8))
            .sum::<f64>()
            / n
            * 100.0
    }

    /// Largest absolute error
    pub fn max_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
        y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .fold(0.0, f64::max)
    }

    /// Explained variance: 1 - Var(y_true - y_pred) / Var(y_true)
    pub fn explained_variance(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let var_true = Self::variance(y_true);
        let residuals: Vec<f64> = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| t - p)
            .collect();
        let var_res = Self::variance(&residuals);

        if var_true < 1e-10 {
            return if var_res < 1e-10 { 1.0 } else { 0.0 };
        }

        1.0 - var_res / var_true
    }

    /// Fraction of predictions within `tolerance` of the actual, in percent
    pub fn within_tolerance(y_true: &[f64], y_pred: &[f64], tolerance: f64) -> f64 {
        if y_true.is_empty() {
            return 0.0;
        }
        let hits = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(&t, &p)| (t - p).abs() <= tolerance)
            .count();
        hits as f64 / y_true.len() as f64 * 100.0
    }

    fn variance(values: &[f64]) -> f64 {
        let n = values.len() as f64;
        if n < 1.0 {
            return 0.0;
        }
        let mean = values.iter().sum::<f64>() / n;
        values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n
    }

    /// Print a summary report
    pub fn report(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Samples:                  {}\n", self.n_samples));
        s.push_str(&format!("R²:                       {:.4}\n", self.r2));
        s.push_str(&format!(
            "Explained Variance:       {:.4}\n",
            self.explained_variance
        ));
        s.push_str(&format!("MSE:                      {:.4}\n", self.mse));
        s.push_str(&format!("RMSE:                     {:.4}\n", self.rmse));
        s.push_str(&format!("MAE:                      {:.4}\n", self.mae));
        s.push_str(&format!("MAPE:                     {:.2}%\n", self.mape));
        s.push_str(&format!("Max Error:                {:.4}\n", self.max_error));
        s
    }
}
