//! The training procedure.
//!
//! Takes a raw indicator table to a fitted, persistable `PipelineState`:
//! median imputation, feature derivation, a seeded train/held-out split,
//! scaler and selector fitting on the training split only, then candidate
//! variant training scored by k-fold cross-validated R². The variant with the
//! highest mean CV score wins; ties go to the first-encountered in the fixed
//! candidate order.

use crate::data::{Dataset, RawTable, StandardScaler};
use crate::features::{candidate_features, derive_table, FeatureSelector};
use crate::metrics::RegressionMetrics;
use crate::ml::cross_validation::{CrossValidator, CVScores};
use crate::ml::report::{BandAnalysis, TrainingReport, VariantReport};
use crate::models::{Model, ModelError, ModelKind};
use crate::pipeline::{clamp_score, PipelineState};
use chrono::Utc;
use thiserror::Error;
use tracing::info;

/// Errors that abort a training run
#[derive(Error, Debug)]
pub enum TrainError {
    #[error("target column '{0}' is not present in the training table")]
    MissingTarget(String),

    #[error("training requires at least 2 rows with a target value, got {0}")]
    InsufficientRows(usize),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Training configuration
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Name of the target column
    pub target_column: String,
    /// Fraction of rows held out for evaluation
    pub test_ratio: f64,
    /// Seed for the split, the CV folds and the ensemble fits
    pub seed: u64,
    /// Number of cross-validation folds
    pub n_folds: usize,
    /// Maximum number of features the selector retains
    pub top_k: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            target_column: "composite_safety_score".to_string(),
            test_ratio: 0.2,
            seed: 42,
            n_folds: 5,
            top_k: 15,
        }
    }
}

/// Trains and selects the production model
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Run the full training procedure on a raw indicator table.
    ///
    /// On success returns the frozen pipeline state and the diagnostic
    /// report; on failure nothing is produced.
    pub fn train(&self, table: &RawTable) -> Result<(PipelineState, TrainingReport), TrainError> {
        let target = &self.config.target_column;
        if !table.has_column(target) {
            return Err(TrainError::MissingTarget(target.clone()));
        }

        // Keep rows that carry a target value, then fill remaining gaps with
        // per-column medians. Serving fills with 0 instead; the two policies
        // are deliberate and documented at the scoring boundary.
        let labeled: Vec<_> = table
            .rows
            .iter()
            .filter(|r| r.contains(target))
            .cloned()
            .collect();
        if labeled.len() < 2 {
            return Err(TrainError::InsufficientRows(labeled.len()));
        }

        let mut working = RawTable::new(table.columns.clone(), labeled);
        let missing = working.missing_cells();
        working.impute_median();
        info!(
            rows = working.n_rows(),
            imputed_cells = missing,
            "prepared training table"
        );

        let derived = derive_table(&working);
        let feature_names = candidate_features(&derived.columns);
        info!(candidates = feature_names.len(), "assembled candidate features");

        let matrix: Vec<Vec<f64>> = derived
            .rows
            .iter()
            .map(|r| {
                feature_names
                    .iter()
                    .map(|n| r.get(n).unwrap_or(0.0))
                    .collect()
            })
            .collect();
        let targets: Vec<f64> = derived
            .rows
            .iter()
            .map(|r| clamp_score(r.get(target).unwrap_or(0.0)))
            .collect();

        let dataset = Dataset::from_data(matrix, targets, feature_names.clone());
        let split = dataset.random_split(self.config.test_ratio, self.config.seed);
        info!(
            train = split.train.n_samples(),
            held_out = split.test.n_samples(),
            "split dataset"
        );

        // Fit the transform chain on the training split only
        let mut scaler = StandardScaler::new();
        let train_scaled = scaler.fit_transform(&split.train.features);
        let test_scaled = scaler.transform(&split.test.features);

        let mut selector = FeatureSelector::new(self.config.top_k);
        selector.fit(&train_scaled, &split.train.targets);
        info!(
            selected = selector.n_selected(),
            "fitted scaler and selector"
        );

        let selected_names = selector.selected_names(&feature_names);
        let train_ds = Dataset::from_data(
            selector.transform(&train_scaled),
            split.train.targets.clone(),
            selected_names.clone(),
        );
        let test_ds = Dataset::from_data(
            selector.transform(&test_scaled),
            split.test.targets.clone(),
            selected_names,
        );

        // Same folds for every variant
        let n_train = train_ds.n_samples();
        let folds = self.config.n_folds.min(n_train);
        let splits = if folds >= 2 {
            CrossValidator::k_fold(n_train, folds, self.config.seed)
        } else {
            Vec::new()
        };

        let mut variants = Vec::with_capacity(ModelKind::ALL.len());
        let mut fitted: Vec<Model> = Vec::with_capacity(ModelKind::ALL.len());
        let mut held_out: Vec<Vec<f64>> = Vec::with_capacity(ModelKind::ALL.len());

        for kind in ModelKind::ALL {
            let cv = if splits.is_empty() {
                CVScores::degenerate()
            } else {
                CrossValidator::r2_scores(&train_ds, &splits, |tr, te| {
                    let mut model = Model::new(kind, self.config.seed);
                    model.fit(tr)?;
                    Ok(model.predict(te))
                })?
            };

            let mut model = Model::new(kind, self.config.seed);
            model.fit(&train_ds)?;
            let predictions = model.predict(&test_ds);
            let metrics = RegressionMetrics::calculate(&test_ds.targets, &predictions);

            info!(model = %kind, cv_r2 = cv.mean, test_r2 = metrics.r2, "evaluated variant");

            variants.push(VariantReport {
                kind,
                within_1: RegressionMetrics::within_tolerance(&test_ds.targets, &predictions, 1.0),
                within_3: RegressionMetrics::within_tolerance(&test_ds.targets, &predictions, 3.0),
                within_5: RegressionMetrics::within_tolerance(&test_ds.targets, &predictions, 5.0),
                within_10: RegressionMetrics::within_tolerance(
                    &test_ds.targets,
                    &predictions,
                    10.0,
                ),
                cv,
                metrics,
            });
            fitted.push(model);
            held_out.push(predictions);
        }

        // Highest mean CV R² wins; strict greater-than keeps ties on the
        // first-encountered variant
        let mut best = 0;
        for i in 1..variants.len() {
            if variants[i].cv.mean > variants[best].cv.mean {
                best = i;
            }
        }
        let selected_kind = variants[best].kind;
        info!(model = %selected_kind, cv_r2 = variants[best].cv.mean, "selected production model");

        let clamped: Vec<f64> = held_out[best].iter().map(|&p| clamp_score(p)).collect();
        let band_analysis = BandAnalysis::from_scores(&test_ds.targets, &clamped);

        let state = PipelineState {
            feature_names,
            target_column: target.clone(),
            scaler,
            selector,
            model: fitted.swap_remove(best),
            cv_r2: variants[best].cv.mean,
            trained_at: Utc::now(),
        };

        let report = TrainingReport {
            generated_at: Utc::now(),
            variants,
            selected: selected_kind,
            band_analysis,
        };

        Ok((state, report))
    }
}
