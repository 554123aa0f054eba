//! Dataset structure for model training

use ndarray::{Array1, Array2};
use rand::Rng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Numeric dataset with named feature columns and a target vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub features: Vec<Vec<f64>>,
    /// Target values, one per sample
    pub targets: Vec<f64>,
    /// Feature names, in column order
    pub feature_names: Vec<String>,
}

/// Train/test split result
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            features: Vec::new(),
            targets: Vec::new(),
            feature_names,
        }
    }

    /// Create dataset from raw data
    pub fn from_data(features: Vec<Vec<f64>>, targets: Vec<f64>, feature_names: Vec<String>) -> Self {
        Self {
            features,
            targets,
            feature_names,
        }
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Number of features
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Add a sample
    pub fn add_sample(&mut self, features: Vec<f64>, target: f64) {
        assert_eq!(features.len(), self.feature_names.len());
        self.features.push(features);
        self.targets.push(target);
    }

    /// Get feature matrix as ndarray
    pub fn features_array(&self) -> Array2<f64> {
        let n_samples = self.n_samples();
        let n_features = self.n_features();

        if n_samples == 0 {
            return Array2::zeros((0, n_features));
        }

        Array2::from_shape_fn((n_samples, n_features), |(i, j)| self.features[i][j])
    }

    /// Get targets as ndarray
    pub fn targets_array(&self) -> Array1<f64> {
        Array1::from_vec(self.targets.clone())
    }

    /// Random shuffle split with a fixed seed for reproducibility
    pub fn random_split(&self, test_ratio: f64, seed: u64) -> Split {
        let n = self.n_samples();
        if n < 2 {
            return Split {
                train: self.clone(),
                test: Dataset::new(self.feature_names.clone()),
            };
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let test_size = ((test_ratio * n as f64).ceil() as usize).clamp(1, n - 1);
        let (test_indices, train_indices) = indices.split_at(test_size);

        Split {
            train: self.subset(train_indices),
            test: self.subset(test_indices),
        }
    }

    /// Create a subset of the dataset by indices
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Bootstrap sample (random sample with replacement)
    pub fn bootstrap_sample(&self, seed: u64) -> Dataset {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.subset(&indices)
    }
}
