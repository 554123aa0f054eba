//! Feature standardization for the fitted transform chain.

use serde::{Deserialize, Serialize};

/// Standard scaler normalizing each feature to zero mean and unit variance.
///
/// Fitted on training rows only; the fitted parameters are frozen and carried
/// in the persisted pipeline state so inference applies the exact same
/// transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature
    pub mean: Vec<f64>,
    /// Standard deviation of each feature
    pub std: Vec<f64>,
    /// Whether the scaler has been fitted
    pub fitted: bool,
}

impl StandardScaler {
    /// Create a new unfitted scaler
    pub fn new() -> Self {
        Self {
            mean: Vec::new(),
            std: Vec::new(),
            fitted: false,
        }
    }

    /// Fit the scaler to training rows
    pub fn fit(&mut self, rows: &[Vec<f64>]) {
        let n_features = rows.first().map_or(0, |r| r.len());
        let n = rows.len() as f64;

        self.mean = vec![0.0; n_features];
        self.std = vec![0.0; n_features];

        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                self.mean[j] += v;
            }
        }
        for m in &mut self.mean {
            *m /= n.max(1.0);
        }

        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                let d = v - self.mean[j];
                self.std[j] += d * d;
            }
        }
        for s in &mut self.std {
            *s = (*s / n.max(1.0)).sqrt();
            // Avoid division by zero on constant features
            if *s < 1e-10 {
                *s = 1.0;
            }
        }

        self.fitted = true;
    }

    /// Transform rows using fitted parameters
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        assert!(self.fitted, "Scaler must be fitted before transform");
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Transform a single row using fitted parameters
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        assert!(self.fitted, "Scaler must be fitted before transform");
        row.iter()
            .enumerate()
            .map(|(j, &v)| (v - self.mean[j]) / self.std[j])
            .collect()
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        self.fit(rows);
        self.transform(rows)
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}
