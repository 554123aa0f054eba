//! Univariate top-K feature selection.
//!
//! Features are ranked by an F-statistic derived from the Pearson correlation
//! between each column and the target, the top K survive. Retained indices are
//! stored in ascending column order so the transform keeps the original
//! feature ordering, only the ranking uses the scores.

use serde::{Deserialize, Serialize};

/// Fitted top-K univariate feature selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSelector {
    /// Requested number of features to retain
    pub k: usize,
    /// Association score per candidate column
    pub scores: Vec<f64>,
    /// Retained column indices, ascending
    pub selected: Vec<usize>,
    /// Whether the selector has been fitted
    pub fitted: bool,
}

impl FeatureSelector {
    /// Create a new unfitted selector retaining at most `k` features
    pub fn new(k: usize) -> Self {
        Self {
            k,
            scores: Vec::new(),
            selected: Vec::new(),
            fitted: false,
        }
    }

    /// Fit the selector on training rows and targets.
    ///
    /// The effective K is `min(k, n_features)`; ties rank in first-encountered
    /// column order.
    pub fn fit(&mut self, rows: &[Vec<f64>], targets: &[f64]) {
        let n_features = rows.first().map_or(0, |r| r.len());

        self.scores = (0..n_features)
            .map(|j| {
                let column: Vec<f64> = rows.iter().map(|r| r[j]).collect();
                f_score(&column, targets)
            })
            .collect();

        let k = self.k.min(n_features);
        let mut ranked: Vec<usize> = (0..n_features).collect();
        ranked.sort_by(|&a, &b| self.scores[b].partial_cmp(&self.scores[a]).unwrap());

        self.selected = ranked.into_iter().take(k).collect();
        self.selected.sort_unstable();
        self.fitted = true;
    }

    /// Transform rows down to the retained columns
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        assert!(self.fitted, "Selector must be fitted before transform");
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Transform a single row down to the retained columns
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        assert!(self.fitted, "Selector must be fitted before transform");
        self.selected.iter().map(|&j| row[j]).collect()
    }

    /// Names of the retained columns, in retained order
    pub fn selected_names(&self, names: &[String]) -> Vec<String> {
        self.selected.iter().map(|&j| names[j].clone()).collect()
    }

    /// Number of retained columns
    pub fn n_selected(&self) -> usize {
        self.selected.len()
    }
}

/// F-statistic of the univariate regression of `targets` on `column`.
///
/// F = r² / (1 - r²) · (n - 2). Degenerate columns (constant input, constant
/// target, or fewer than 3 samples) score 0.
fn f_score(column: &[f64], targets: &[f64]) -> f64 {
    let n = column.len();
    if n < 3 {
        return 0.0;
    }

    let r = match pearson(column, targets) {
        Some(r) => r,
        None => return 0.0,
    };

    let r2 = r * r;
    let denom = (1.0 - r2).max(1e-12);
    r2 / denom * (n - 2) as f64
}

/// Pearson correlation, `None` when either side has no variance.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom < 1e-12 {
        None
    } else {
        Some(cov / denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Rows with a strong signal column, a weak one and pure noise.
    fn sample_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let noise = [0.3, -0.8, 0.5, -0.1, 0.9, -0.4, 0.2, -0.6, 0.7, -0.2];
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for i in 0..10 {
            let x = i as f64;
            rows.push(vec![noise[i], x * 0.1, x]);
            targets.push(2.0 * x + 1.0);
        }
        (rows, targets)
    }

    #[test]
    fn test_top_k_selection() {
        let (rows, targets) = sample_data();

        let mut selector = FeatureSelector::new(2);
        selector.fit(&rows, &targets);

        // The two linear columns outrank the noise column
        assert_eq!(selector.selected, vec![1, 2]);
        assert!(selector.scores[1] > selector.scores[0]);
        assert!(selector.scores[2] > selector.scores[0]);
    }

    #[test]
    fn test_k_clamped_to_feature_count() {
        let (rows, targets) = sample_data();

        let mut selector = FeatureSelector::new(15);
        selector.fit(&rows, &targets);
        assert_eq!(selector.n_selected(), 3);
    }

    #[test]
    fn test_transform_keeps_column_order() {
        let (rows, targets) = sample_data();

        let mut selector = FeatureSelector::new(2);
        selector.fit(&rows, &targets);

        let transformed = selector.transform(&rows);
        // Retained columns come out in ascending column order
        assert_relative_eq!(transformed[3][0], rows[3][1]);
        assert_relative_eq!(transformed[3][1], rows[3][2]);

        let single = selector.transform_row(&rows[3]);
        assert_eq!(single, transformed[3]);
    }

    #[test]
    fn test_constant_column_scores_zero() {
        let rows: Vec<Vec<f64>> = (0..8).map(|i| vec![4.2, i as f64]).collect();
        let targets: Vec<f64> = (0..8).map(|i| i as f64).collect();

        let mut selector = FeatureSelector::new(1);
        selector.fit(&rows, &targets);

        assert_relative_eq!(selector.scores[0], 0.0);
        assert_eq!(selector.selected, vec![1]);
    }

    #[test]
    fn test_selected_names() {
        let (rows, targets) = sample_data();
        let names = vec!["noise".to_string(), "slow".to_string(), "fast".to_string()];

        let mut selector = FeatureSelector::new(2);
        selector.fit(&rows, &targets);

        assert_eq!(selector.selected_names(&names), vec!["slow", "fast"]);
    }
}
