//! Regression model variants.
//!
//! The three candidate variants are an explicit tagged enum; each variant
//! carries its own importance-extraction strategy instead of being probed for
//! attributes at runtime.

mod decision_tree;
mod gradient_boosting;
mod linear;
mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig, TreeNode};
pub use gradient_boosting::{GbmConfig, GradientBoosting};
pub use linear::{LinearModelError, LinearRegression};
pub use random_forest::{ForestConfig, RandomForest};

use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while fitting a model variant
#[derive(Error, Debug)]
pub enum ModelError {
    #[error(transparent)]
    Linear(#[from] LinearModelError),
}

/// The three candidate model kinds, in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    RandomForest,
    GradientBoosting,
    Linear,
}

impl ModelKind {
    /// All kinds in the fixed tie-break order
    pub const ALL: [ModelKind; 3] = [
        ModelKind::RandomForest,
        ModelKind::GradientBoosting,
        ModelKind::Linear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "Random Forest",
            ModelKind::GradientBoosting => "Gradient Boosting",
            ModelKind::Linear => "Linear Regression",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fitted (or fittable) regression model variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Model {
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
    Linear(LinearRegression),
}

impl Model {
    /// Create an unfitted variant with default hyperparameters and the given seed
    pub fn new(kind: ModelKind, seed: u64) -> Self {
        match kind {
            ModelKind::RandomForest => Model::RandomForest(RandomForest::new(ForestConfig {
                seed,
                ..Default::default()
            })),
            ModelKind::GradientBoosting => {
                Model::GradientBoosting(GradientBoosting::new(GbmConfig {
                    seed,
                    ..Default::default()
                }))
            }
            ModelKind::Linear => Model::Linear(LinearRegression::new()),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Model::RandomForest(_) => ModelKind::RandomForest,
            Model::GradientBoosting(_) => ModelKind::GradientBoosting,
            Model::Linear(_) => ModelKind::Linear,
        }
    }

    /// Train the variant on a dataset
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), ModelError> {
        match self {
            Model::RandomForest(m) => m.fit(dataset),
            Model::GradientBoosting(m) => m.fit(dataset),
            Model::Linear(m) => m.fit(dataset)?,
        }
        Ok(())
    }

    /// Predict for a single feature row
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        match self {
            Model::RandomForest(m) => m.predict_one(features),
            Model::GradientBoosting(m) => m.predict_one(features),
            Model::Linear(m) => m.predict_one(features),
        }
    }

    /// Predict for every sample in a dataset
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        match self {
            Model::RandomForest(m) => m.predict(dataset),
            Model::GradientBoosting(m) => m.predict(dataset),
            Model::Linear(m) => m.predict(dataset),
        }
    }

    /// Per-feature importance values, one per training column.
    ///
    /// Ensembles report native impurity-gain importances; the linear variant
    /// reports absolute coefficients. `None` when the model has nothing to
    /// report (an unfitted variant).
    pub fn importances(&self) -> Option<Vec<f64>> {
        let values = match self {
            Model::RandomForest(m) => m.feature_importances().to_vec(),
            Model::GradientBoosting(m) => m.feature_importances().to_vec(),
            Model::Linear(m) => m.coefficient_magnitudes(),
        };
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }
}
