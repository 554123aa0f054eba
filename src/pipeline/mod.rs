//! The fitted pipeline and its serving surface.
//!
//! Provides the persisted `PipelineState`, the read-only `ScoringService`,
//! the two risk-bucket mappings and importance extraction.

mod category;
mod importance;
mod scorer;
mod state;

pub use category::{RiskCategory, SafetyBand};
pub use importance::feature_importance;
pub use scorer::{clamp_score, Prediction, ScoreError, ScoringService};
pub use state::PipelineState;
