//! Gradient boosting regressor.
//!
//! Shallow regression trees fitted sequentially on the residuals of the
//! running prediction, shrunk by the learning rate. The first prediction is
//! the training-target mean.

use super::decision_tree::{DecisionTree, TreeConfig};
use crate::data::Dataset;
use serde::{Deserialize, Serialize};

/// Gradient boosting hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbmConfig {
    /// Number of boosting iterations (trees)
    pub n_estimators: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Learning rate (shrinkage)
    pub learning_rate: f64,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf node
    pub min_samples_leaf: usize,
    /// Random seed
    pub seed: u64,
}

impl Default for GbmConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 3,
            learning_rate: 0.1,
            min_samples_split: 5,
            min_samples_leaf: 2,
            seed: 42,
        }
    }
}

/// Gradient boosting regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    config: GbmConfig,
    /// Initial prediction, the training-target mean
    base_prediction: f64,
    trees: Vec<DecisionTree>,
    feature_importances: Vec<f64>,
}

impl GradientBoosting {
    /// Create a new, unfitted model
    pub fn new(config: GbmConfig) -> Self {
        Self {
            config,
            base_prediction: 0.0,
            trees: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    /// Train the boosted ensemble
    pub fn fit(&mut self, dataset: &Dataset) {
        let n = dataset.n_samples();
        let n_features = dataset.n_features();

        self.base_prediction = if n == 0 {
            0.0
        } else {
            dataset.targets.iter().sum::<f64>() / n as f64
        };

        let mut residuals: Vec<f64> = dataset
            .targets
            .iter()
            .map(|t| t - self.base_prediction)
            .collect();

        self.trees = Vec::with_capacity(self.config.n_estimators);
        self.feature_importances = vec![0.0; n_features];

        for m in 0..self.config.n_estimators {
            let stage = Dataset::from_data(
                dataset.features.clone(),
                residuals.clone(),
                dataset.feature_names.clone(),
            );

            let mut tree = DecisionTree::new(TreeConfig {
                max_depth: self.config.max_depth,
                min_samples_split: self.config.min_samples_split,
                min_samples_leaf: self.config.min_samples_leaf,
                max_features: None,
                seed: self.config.seed.wrapping_add(m as u64),
            });
            tree.fit(&stage);

            for (i, features) in dataset.features.iter().enumerate() {
                residuals[i] -= self.config.learning_rate * tree.predict_one(features);
            }

            for (j, &imp) in tree.feature_importances().iter().enumerate() {
                self.feature_importances[j] += imp;
            }

            self.trees.push(tree);
        }

        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }
    }

    /// Predict for a single sample
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        let boost: f64 = self
            .trees
            .iter()
            .map(|t| t.predict_one(features))
            .sum::<f64>()
            * self.config.learning_rate;
        self.base_prediction + boost
    }

    /// Predict for every sample in a dataset
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        dataset
            .features
            .iter()
            .map(|f| self.predict_one(f))
            .collect()
    }

    /// Normalized per-feature importances aggregated over stages
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Number of fitted stages
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}
