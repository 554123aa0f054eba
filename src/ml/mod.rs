//! Training: cross-validation, the trainer and its diagnostic report

pub mod cross_validation;
pub mod report;
pub mod trainer;

pub use cross_validation::{CrossValidator, CVScores, CVSplit};
pub use report::{BandAnalysis, BandScore, TrainingReport, VariantReport};
pub use trainer::{TrainError, Trainer, TrainerConfig};
