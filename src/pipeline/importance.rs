//! Per-feature importance extraction from a fitted pipeline.

use super::state::PipelineState;

/// Ranked (feature name, importance) pairs for the selector-retained
/// features, sorted descending by importance.
///
/// The importance source follows the model variant: ensembles expose native
/// impurity-gain importances, the linear variant absolute coefficients.
/// Returns an empty list when the model reports nothing.
pub fn feature_importance(state: &PipelineState) -> Vec<(String, f64)> {
    let names = state.selected_feature_names();
    let values = match state.model.importances() {
        Some(values) => values,
        None => return Vec::new(),
    };

    let mut ranked: Vec<(String, f64)> = names.into_iter().zip(values).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, StandardScaler};
    use crate::features::FeatureSelector;
    use crate::models::{Model, ModelKind};
    use chrono::Utc;

    fn state_with(model: Model) -> PipelineState {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let rows: Vec<Vec<f64>> = (0..10)
            .map(|i| vec![i as f64, (10 - i) as f64, (i % 2) as f64])
            .collect();
        let targets: Vec<f64> = (0..10).map(|i| i as f64 * 5.0).collect();

        let mut scaler = StandardScaler::new();
        scaler.fit(&rows);
        let mut selector = FeatureSelector::new(2);
        selector.fit(&scaler.transform(&rows), &targets);

        PipelineState {
            feature_names: names,
            target_column: "t".to_string(),
            scaler,
            selector,
            model,
            cv_r2: 0.9,
            trained_at: Utc::now(),
        }
    }

    fn fitted(kind: ModelKind) -> Model {
        let mut dataset = Dataset::new(vec!["a".to_string(), "b".to_string()]);
        for i in 0..30 {
            dataset.add_sample(vec![i as f64, (i % 3) as f64], i as f64 * 2.0);
        }
        let mut model = Model::new(kind, 42);
        model.fit(&dataset).unwrap();
        model
    }

    #[test]
    fn test_reports_only_selected_names_sorted_descending() {
        for kind in ModelKind::ALL {
            let state = state_with(fitted(kind));
            let ranked = feature_importance(&state);

            assert_eq!(ranked.len(), 2);
            assert!(ranked[0].1 >= ranked[1].1);
            for (name, _) in &ranked {
                assert!(state.selected_feature_names().contains(name));
            }
        }
    }

    #[test]
    fn test_unfitted_model_yields_empty_ranking() {
        let state = state_with(Model::new(ModelKind::Linear, 42));
        assert!(feature_importance(&state).is_empty());
    }
}
