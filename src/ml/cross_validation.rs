//! K-fold cross-validation for model selection.
//!
//! Folds are built over a seeded shuffle so a training run scores every
//! candidate variant on the same splits and reproduces across runs.

use crate::data::Dataset;
use crate::metrics::RegressionMetrics;
use crate::models::ModelError;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// One cross-validation split
#[derive(Debug, Clone)]
pub struct CVSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Cross-validator
pub struct CrossValidator;

impl CrossValidator {
    /// K-fold splits over a seeded shuffle of `0..n_samples`
    pub fn k_fold(n_samples: usize, n_folds: usize, seed: u64) -> Vec<CVSplit> {
        assert!(n_folds > 1, "n_folds must be > 1");
        assert!(n_samples >= n_folds, "n_samples must be >= n_folds");

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let fold_size = n_samples / n_folds;
        let mut splits = Vec::with_capacity(n_folds);

        for i in 0..n_folds {
            let test_start = i * fold_size;
            let test_end = if i == n_folds - 1 {
                n_samples
            } else {
                (i + 1) * fold_size
            };

            let test_indices: Vec<usize> = indices[test_start..test_end].to_vec();
            let train_indices: Vec<usize> = indices[..test_start]
                .iter()
                .chain(indices[test_end..].iter())
                .copied()
                .collect();

            splits.push(CVSplit {
                train_indices,
                test_indices,
            });
        }

        splits
    }

    /// Cross-validated R² for a fit-and-predict procedure.
    ///
    /// `fit_predict` trains on the first dataset and returns predictions for
    /// the second; each fold is scored against its held-back targets.
    pub fn r2_scores<F>(
        dataset: &Dataset,
        splits: &[CVSplit],
        mut fit_predict: F,
    ) -> Result<CVScores, ModelError>
    where
        F: FnMut(&Dataset, &Dataset) -> Result<Vec<f64>, ModelError>,
    {
        let mut scores = Vec::with_capacity(splits.len());

        for split in splits {
            let train = dataset.subset(&split.train_indices);
            let test = dataset.subset(&split.test_indices);

            let predictions = fit_predict(&train, &test)?;
            scores.push(RegressionMetrics::r_squared(&test.targets, &predictions));
        }

        Ok(CVScores::from_scores(scores))
    }
}

/// Summary statistics over per-fold scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CVScores {
    pub scores: Vec<f64>,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl CVScores {
    /// Calculate summary statistics from raw fold scores
    pub fn from_scores(scores: Vec<f64>) -> Self {
        let n = scores.len() as f64;
        if scores.is_empty() {
            return Self {
                scores,
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            scores,
            mean,
            std: variance.sqrt(),
            min,
            max,
        }
    }

    /// A degenerate result for training sets too small to fold
    pub fn degenerate() -> Self {
        Self::from_scores(vec![0.0])
    }

    /// One-line summary of the scores
    pub fn summary(&self) -> String {
        format!(
            "CV R²: mean={:.4} (+/- {:.4}), min={:.4}, max={:.4}",
            self.mean,
            self.std * 2.0,
            self.min,
            self.max
        )
    }
}
