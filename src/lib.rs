//! # Safety ML - Locality Safety Score Prediction
//!
//! This library estimates a bounded safety score (0-100) for a geographic
//! locality from tabular risk indicators: crime, natural hazards, transport
//! incidents, infrastructure quality and climate.
//!
//! ## Modules
//!
//! - `data` - raw record/table types, CSV I/O, dataset container, scaling
//! - `features` - derived composite indicators and univariate selection
//! - `models` - random forest, gradient boosting and linear regressors
//! - `ml` - cross-validation, the trainer and training diagnostics
//! - `metrics` - regression evaluation metrics
//! - `pipeline` - the persisted fitted pipeline and the scoring service

pub mod data;
pub mod features;
pub mod metrics;
pub mod ml;
pub mod models;
pub mod pipeline;

pub use data::{Dataset, RawRecord, RawTable};
pub use ml::{Trainer, TrainerConfig, TrainingReport};
pub use pipeline::{PipelineState, Prediction, RiskCategory, ScoringService};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{DataLoader, Dataset, RawRecord, RawTable, StandardScaler};
    pub use crate::features::{candidate_features, derive_record, derive_table, FeatureSelector};
    pub use crate::metrics::RegressionMetrics;
    pub use crate::ml::{TrainError, Trainer, TrainerConfig, TrainingReport};
    pub use crate::models::{Model, ModelKind};
    pub use crate::pipeline::{
        feature_importance, PipelineState, Prediction, RiskCategory, SafetyBand, ScoreError,
        ScoringService,
    };
}
