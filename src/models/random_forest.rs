//! Random forest regressor.
//!
//! Bagged regression trees built in parallel; each tree trains on a bootstrap
//! sample seeded from the forest seed plus the tree index, so a fit is fully
//! reproducible. Importances are the normalized sum of per-tree importances.

use super::decision_tree::{DecisionTree, TreeConfig};
use crate::data::Dataset;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Max features per split (None = n_features / 3)
    pub max_features: Option<usize>,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

/// Random forest regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Create a new, unfitted forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    /// Train the forest
    pub fn fit(&mut self, dataset: &Dataset) {
        let n_features = dataset.n_features();
        let max_features = self
            .config
            .max_features
            .unwrap_or((n_features / 3).max(1));

        self.trees = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_config = TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: self.config.seed.wrapping_add(i as u64),
                };

                let bootstrap = dataset.bootstrap_sample(self.config.seed.wrapping_add(i as u64));
                let mut tree = DecisionTree::new(tree_config);
                tree.fit(&bootstrap);
                tree
            })
            .collect();

        self.feature_importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (j, &imp) in tree.feature_importances().iter().enumerate() {
                self.feature_importances[j] += imp;
            }
        }
        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }
    }

    /// Predict for a single sample (mean over trees)
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_one(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Predict for every sample in a dataset
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        dataset
            .features
            .par_iter()
            .map(|f| self.predict_one(f))
            .collect()
    }

    /// Normalized per-feature importances aggregated over trees
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Number of fitted trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_dataset() -> Dataset {
        let mut dataset = Dataset::new(vec!["x1".to_string(), "x2".to_string()]);
        for i in 0..120 {
            let x1 = i as f64 / 12.0;
            let x2 = (i % 9) as f64;
            dataset.add_sample(vec![x1, x2], 5.0 * x1 + 20.0);
        }
        dataset
    }

    #[test]
    fn test_forest_fits_and_predicts_in_range() {
        let dataset = linear_dataset();
        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 15,
            max_depth: 6,
            ..Default::default()
        });
        forest.fit(&dataset);

        assert_eq!(forest.n_trees(), 15);
        let pred = forest.predict_one(&[5.0, 3.0]);
        assert!(pred > 20.0 && pred < 70.0);
    }

    #[test]
    fn test_fit_is_reproducible_for_a_seed() {
        let dataset = linear_dataset();
        let config = ForestConfig {
            n_trees: 8,
            seed: 11,
            ..Default::default()
        };

        let mut a = RandomForest::new(config.clone());
        let mut b = RandomForest::new(config);
        a.fit(&dataset);
        b.fit(&dataset);

        assert_eq!(a.predict(&dataset), b.predict(&dataset));
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn test_importances_are_normalized() {
        let dataset = linear_dataset();
        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 10,
            ..Default::default()
        });
        forest.fit(&dataset);

        let sum: f64 = forest.feature_importances().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        // x1 carries all the signal
        assert!(forest.feature_importances()[0] > forest.feature_importances()[1]);
    }
}
