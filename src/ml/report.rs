//! Training diagnostics.
//!
//! The report is ephemeral output of a training run: per-variant CV and
//! held-out metrics for the comparison table, residual accuracy breakdowns,
//! and a four-band classification analysis of the selected variant. None of
//! it is needed for inference.

use crate::metrics::RegressionMetrics;
use crate::ml::cross_validation::CVScores;
use crate::models::ModelKind;
use crate::pipeline::SafetyBand;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metrics for one candidate variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantReport {
    pub kind: ModelKind,
    /// Cross-validated R² over the training split
    pub cv: CVScores,
    /// Held-out split metrics
    pub metrics: RegressionMetrics,
    /// Share of held-out predictions within N points of the actual, percent
    pub within_1: f64,
    pub within_3: f64,
    pub within_5: f64,
    pub within_10: f64,
}

/// Precision/recall/F1 for one diagnostic band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandScore {
    pub band: SafetyBand,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of held-out rows whose actual score falls in this band
    pub support: usize,
}

/// Four-band classification analysis of the selected variant's held-out
/// predictions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandAnalysis {
    /// Held-out rows per band, by actual score
    pub actual_counts: [usize; 4],
    /// Held-out rows per band, by predicted score
    pub predicted_counts: [usize; 4],
    /// confusion[actual][predicted]
    pub confusion: [[usize; 4]; 4],
    /// Fraction of rows whose predicted band matches the actual band
    pub band_accuracy: f64,
    pub per_band: Vec<BandScore>,
}

impl BandAnalysis {
    /// Build the analysis from parallel actual/predicted score slices
    pub fn from_scores(actual: &[f64], predicted: &[f64]) -> Self {
        let mut actual_counts = [0usize; 4];
        let mut predicted_counts = [0usize; 4];
        let mut confusion = [[0usize; 4]; 4];

        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            let ai = SafetyBand::from_score(a).index();
            let pi = SafetyBand::from_score(p).index();
            actual_counts[ai] += 1;
            predicted_counts[pi] += 1;
            confusion[ai][pi] += 1;
        }

        let n = actual.len();
        let correct: usize = (0..4).map(|i| confusion[i][i]).sum();
        let band_accuracy = if n > 0 { correct as f64 / n as f64 } else { 0.0 };

        let per_band = SafetyBand::ALL
            .iter()
            .map(|band| {
                let i = band.index();
                let tp = confusion[i][i];
                let predicted_as = predicted_counts[i];
                let support = actual_counts[i];

                let precision = if predicted_as > 0 {
                    tp as f64 / predicted_as as f64
                } else {
                    0.0
                };
                let recall = if support > 0 {
                    tp as f64 / support as f64
                } else {
                    0.0
                };
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                BandScore {
                    band: *band,
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        Self {
            actual_counts,
            predicted_counts,
            confusion,
            band_accuracy,
            per_band,
        }
    }
}

/// Full diagnostics from one training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub generated_at: DateTime<Utc>,
    /// Per-variant results, in candidate order
    pub variants: Vec<VariantReport>,
    /// The variant installed into the pipeline state
    pub selected: ModelKind,
    /// Band analysis of the selected variant on the held-out split
    pub band_analysis: BandAnalysis,
}

impl TrainingReport {
    /// Variant comparison as an aligned text table
    pub fn comparison_table(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "{:20} {:>10} {:>8} {:>8} {:>8} {:>8}\n",
            "Model", "CV R²", "Test R²", "RMSE", "MAE", "MAPE %"
        ));
        s.push_str(&"-".repeat(68));
        s.push('\n');

        for v in &self.variants {
            let marker = if v.kind == self.selected { " *" } else { "" };
            s.push_str(&format!(
                "{:20} {:>10.4} {:>8.4} {:>8.3} {:>8.3} {:>8.2}{}\n",
                v.kind.name(),
                v.cv.mean,
                v.metrics.r2,
                v.metrics.rmse,
                v.metrics.mae,
                v.metrics.mape,
                marker
            ));
        }
        s.push_str("\n* selected by mean cross-validated R²\n");
        s
    }

    /// Readable summary of the run: selected variant, accuracy breakdown and
    /// band classification analysis
    pub fn summary(&self) -> String {
        let mut s = String::new();

        let selected = self
            .variants
            .iter()
            .find(|v| v.kind == self.selected);

        s.push_str(&format!("Selected model: {}\n", self.selected.name()));
        if let Some(v) = selected {
            s.push_str(&format!("  {}\n", v.cv.summary()));
            s.push('\n');
            s.push_str(&v.metrics.report());
            s.push('\n');
            s.push_str("Prediction accuracy on held-out rows:\n");
            s.push_str(&format!("  within ±1 point:   {:>6.1}%\n", v.within_1));
            s.push_str(&format!("  within ±3 points:  {:>6.1}%\n", v.within_3));
            s.push_str(&format!("  within ±5 points:  {:>6.1}%\n", v.within_5));
            s.push_str(&format!("  within ±10 points: {:>6.1}%\n", v.within_10));
        }

        s.push('\n');
        s.push_str("Safety band classification (diagnostic 4-band scheme):\n");
        s.push_str(&format!(
            "  band accuracy: {:.1}%\n\n",
            self.band_analysis.band_accuracy * 100.0
        ));
        s.push_str(&format!(
            "  {:15} {:>7} {:>10} {:>8} {:>8} {:>8}\n",
            "Band", "actual", "predicted", "prec", "recall", "F1"
        ));
        for score in &self.band_analysis.per_band {
            let i = score.band.index();
            s.push_str(&format!(
                "  {:15} {:>7} {:>10} {:>8.2} {:>8.2} {:>8.2}\n",
                score.band.label(),
                self.band_analysis.actual_counts[i],
                self.band_analysis.predicted_counts[i],
                score.precision,
                score.recall,
                score.f1
            ));
        }
        s
    }
}
