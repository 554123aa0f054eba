//! The scoring service.
//!
//! Applies the frozen transform chain from a `PipelineState` to raw records:
//! derive, assemble the training-time feature order (absent fields fill with
//! 0 and are reported as warnings), scale, select, predict, clamp to [0,100]
//! and attach the risk category. The state is injected behind an `Arc` and
//! never mutated; installing a retrained pipeline means constructing a new
//! service around the new state.

use super::category::RiskCategory;
use super::state::PipelineState;
use crate::data::RawRecord;
use crate::features::derive_record;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by the scoring boundary
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("no fitted pipeline is loaded: {0}")]
    ModelNotLoaded(String),

    #[error("invalid inference input: {0}")]
    Validation(String),
}

/// A single scored record
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Safety score, guaranteed in [0,100]
    pub score: f64,
    /// Five-bucket serving label
    pub category: RiskCategory,
    /// Feature names the record lacked, filled with 0
    pub missing_features: Vec<String>,
}

/// Read-only scoring front end over a fitted pipeline
pub struct ScoringService {
    state: Arc<PipelineState>,
}

impl ScoringService {
    /// Wrap an already-loaded pipeline state
    pub fn new(state: Arc<PipelineState>) -> Self {
        Self { state }
    }

    /// Load a persisted pipeline artifact and build a service around it
    pub fn from_artifact<P: AsRef<Path>>(path: P) -> Result<Self, ScoreError> {
        let state = PipelineState::load(&path)
            .map_err(|e| ScoreError::ModelNotLoaded(format!("{:#}", e)))?;
        Ok(Self::new(Arc::new(state)))
    }

    /// The pipeline state backing this service
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Score a single raw record
    pub fn predict(&self, record: &RawRecord) -> Result<Prediction, ScoreError> {
        if record.is_empty() {
            return Err(ScoreError::Validation(
                "record carries no fields".to_string(),
            ));
        }

        // Serving uses the zero-fill missing-value policy: a single record
        // carries no table statistics to impute from
        let derived = derive_record(record);

        let mut features = Vec::with_capacity(self.state.feature_names.len());
        let mut missing = Vec::new();
        for name in &self.state.feature_names {
            match derived.get(name) {
                Some(value) => features.push(value),
                None => {
                    features.push(0.0);
                    missing.push(name.clone());
                }
            }
        }

        if !missing.is_empty() {
            warn!(features = ?missing, "inference record lacks expected features, filled with 0");
        }

        let scaled = self.state.scaler.transform_row(&features);
        let selected = self.state.selector.transform_row(&scaled);
        let raw_score = self.state.model.predict_one(&selected);
        let score = clamp_score(raw_score);

        Ok(Prediction {
            score,
            category: RiskCategory::from_score(score),
            missing_features: missing,
        })
    }

    /// Score a batch, isolating per-record failures.
    ///
    /// An empty batch is a validation error; a failing record inside a
    /// non-empty batch is reported at its input position without aborting
    /// the rest.
    pub fn predict_batch(
        &self,
        records: &[RawRecord],
    ) -> Result<Vec<Result<Prediction, ScoreError>>, ScoreError> {
        if records.is_empty() {
            return Err(ScoreError::Validation("batch is empty".to_string()));
        }
        Ok(records.iter().map(|r| self.predict(r)).collect())
    }
}

/// Hard-clamp a raw model output into the score range
pub fn clamp_score(raw: f64) -> f64 {
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, StandardScaler};
    use crate::features::{derive_table, FeatureSelector};
    use crate::models::{Model, ModelKind};
    use crate::data::RawTable;
    use chrono::Utc;

    /// Fit a small pipeline whose target is 60 + population/10000.
    fn toy_state() -> PipelineState {
        let names = vec!["population".to_string(), "flood_events".to_string()];
        let rows: Vec<RawRecord> = (0..20)
            .map(|i| {
                let mut r = RawRecord::new();
                r.insert("population", 10_000.0 + 2_000.0 * i as f64);
                r.insert("flood_events", (i % 4) as f64);
                r
            })
            .collect();
        let table = derive_table(&RawTable::new(names.clone(), rows));

        let matrix: Vec<Vec<f64>> = table
            .rows
            .iter()
            .map(|r| {
                names
                    .iter()
                    .map(|n| r.get(n).unwrap_or(0.0))
                    .collect()
            })
            .collect();
        let targets: Vec<f64> = table
            .rows
            .iter()
            .map(|r| 60.0 + r.get("population").unwrap_or(0.0) / 10_000.0)
            .collect();

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&matrix);
        let mut selector = FeatureSelector::new(2);
        selector.fit(&scaled, &targets);
        let selected = selector.transform(&scaled);

        let mut model = Model::new(ModelKind::Linear, 42);
        model
            .fit(&Dataset::from_data(
                selected,
                targets.clone(),
                selector.selected_names(&names),
            ))
            .unwrap();

        PipelineState {
            feature_names: names,
            target_column: "composite_safety_score".to_string(),
            scaler,
            selector,
            model,
            cv_r2: 1.0,
            trained_at: Utc::now(),
        }
    }

    fn record(pairs: &[(&str, f64)]) -> RawRecord {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_predict_scores_within_range_and_categorized() {
        let service = ScoringService::new(Arc::new(toy_state()));

        let prediction = service
            .predict(&record(&[("population", 20_000.0), ("flood_events", 1.0)]))
            .unwrap();

        assert!((0.0..=100.0).contains(&prediction.score));
        // Target formula puts 20k population at 62
        assert!((prediction.score - 62.0).abs() < 1.0);
        assert_eq!(prediction.category, RiskCategory::ModerateRisk);
        assert!(prediction.missing_features.is_empty());
    }

    #[test]
    fn test_missing_feature_fills_zero_and_warns() {
        let service = ScoringService::new(Arc::new(toy_state()));

        let prediction = service.predict(&record(&[("population", 20_000.0)])).unwrap();
        assert_eq!(prediction.missing_features, vec!["flood_events"]);
    }

    #[test]
    fn test_empty_record_is_a_validation_error() {
        let service = ScoringService::new(Arc::new(toy_state()));
        assert!(matches!(
            service.predict(&RawRecord::new()),
            Err(ScoreError::Validation(_))
        ));
    }

    #[test]
    fn test_batch_isolates_per_record_failures() {
        let service = ScoringService::new(Arc::new(toy_state()));

        let batch = vec![
            record(&[("population", 15_000.0), ("flood_events", 0.0)]),
            RawRecord::new(),
            record(&[("population", 30_000.0), ("flood_events", 2.0)]),
        ];
        let results = service.predict_batch(&batch).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ScoreError::Validation(_))));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_empty_batch_is_a_validation_error() {
        let service = ScoringService::new(Arc::new(toy_state()));
        assert!(matches!(
            service.predict_batch(&[]),
            Err(ScoreError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_artifact_is_model_not_loaded() {
        assert!(matches!(
            ScoringService::from_artifact("/nonexistent/pipeline.json"),
            Err(ScoreError::ModelNotLoaded(_))
        ));
    }

    #[test]
    fn test_clamp_bounds_and_idempotence() {
        assert_eq!(clamp_score(-12.0), 0.0);
        assert_eq!(clamp_score(135.0), 100.0);
        assert_eq!(clamp_score(54.3), 54.3);
        for raw in [-50.0, 0.0, 33.3, 100.0, 240.0] {
            assert_eq!(clamp_score(clamp_score(raw)), clamp_score(raw));
        }
    }
}
