//! The persisted fitted pipeline.
//!
//! `PipelineState` is an explicit value type with a defined JSON schema, not
//! an opaque trained-object graph: scaler and selector parameters, the fitted
//! model, the ordered candidate feature names and the target column name all
//! serialize together. Once written it is only ever replaced by a full
//! retrain, never mutated.

use crate::data::StandardScaler;
use crate::features::FeatureSelector;
use crate::models::Model;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Everything inference needs, frozen at the end of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// Candidate feature names in training-time order
    pub feature_names: Vec<String>,
    /// Name of the target column the model was trained against
    pub target_column: String,
    /// Frozen standardization parameters
    pub scaler: StandardScaler,
    /// Frozen top-K selection parameters
    pub selector: FeatureSelector,
    /// The selected, fitted model variant
    pub model: Model,
    /// Mean cross-validated R² of the selected variant
    pub cv_r2: f64,
    /// When the training run finished
    pub trained_at: DateTime<Utc>,
}

impl PipelineState {
    /// Names of the features the selector retained, in column order
    pub fn selected_feature_names(&self) -> Vec<String> {
        self.selector.selected_names(&self.feature_names)
    }

    /// Write the state as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).context("Failed to serialize pipeline state")?;

        info!(
            path = %path.as_ref().display(),
            model = %self.model.kind(),
            features = self.selector.n_selected(),
            "saved pipeline state"
        );
        Ok(())
    }

    /// Read a state back from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;
        let reader = BufReader::new(file);
        let state: PipelineState =
            serde_json::from_reader(reader).context("Failed to deserialize pipeline state")?;

        info!(
            path = %path.as_ref().display(),
            model = %state.model.kind(),
            trained_at = %state.trained_at,
            "loaded pipeline state"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::models::ModelKind;
    use tempfile::tempdir;

    fn fitted_state() -> PipelineState {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let rows: Vec<Vec<f64>> = (0..12)
            .map(|i| vec![i as f64, (i * 2) as f64, (i % 3) as f64])
            .collect();
        let targets: Vec<f64> = (0..12).map(|i| 40.0 + 3.0 * i as f64).collect();

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&rows);

        let mut selector = FeatureSelector::new(2);
        selector.fit(&scaled, &targets);
        let selected = selector.transform(&scaled);

        let mut model = Model::new(ModelKind::Linear, 42);
        let dataset = Dataset::from_data(
            selected,
            targets,
            selector.selected_names(&names),
        );
        model.fit(&dataset).unwrap();

        PipelineState {
            feature_names: names,
            target_column: "composite_safety_score".to_string(),
            scaler,
            selector,
            model,
            cv_r2: 0.97,
            trained_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_load_round_trip_preserves_predictions() {
        let state = fitted_state();
        let dir = tempdir().unwrap();
        let path = dir.path().join("pipeline.json");

        state.save(&path).unwrap();
        let restored = PipelineState::load(&path).unwrap();

        let raw = vec![7.0, 14.0, 1.0];
        let scaled = state.scaler.transform_row(&raw);
        let selected = state.selector.transform_row(&scaled);

        let scaled_r = restored.scaler.transform_row(&raw);
        let selected_r = restored.selector.transform_row(&scaled_r);

        assert_eq!(selected, selected_r);
        assert_eq!(
            state.model.predict_one(&selected),
            restored.model.predict_one(&selected_r)
        );
        assert_eq!(restored.target_column, state.target_column);
        assert_eq!(restored.feature_names, state.feature_names);
    }

    #[test]
    fn test_selected_feature_names_follow_selector() {
        let state = fitted_state();
        let names = state.selected_feature_names();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| state.feature_names.contains(n)));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(PipelineState::load("/nonexistent/pipeline.json").is_err());
    }
}
