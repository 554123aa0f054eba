//! Risk bucket mappings for safety scores.
//!
//! Two schemes coexist and are never merged: the five-bucket `RiskCategory`
//! is the serving label attached to every prediction; the coarser four-band
//! `SafetyBand` is used only inside training diagnostics.

use serde::{Deserialize, Serialize};

/// Serving risk label, five buckets with boundaries at 35/50/65/80
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    VerySafe,
    Safe,
    ModerateRisk,
    HighRisk,
    VeryHighRisk,
}

impl RiskCategory {
    /// Map a clamped safety score to its category
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RiskCategory::VerySafe
        } else if score >= 65.0 {
            RiskCategory::Safe
        } else if score >= 50.0 {
            RiskCategory::ModerateRisk
        } else if score >= 35.0 {
            RiskCategory::HighRisk
        } else {
            RiskCategory::VeryHighRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::VerySafe => "Very Safe",
            RiskCategory::Safe => "Safe",
            RiskCategory::ModerateRisk => "Moderate Risk",
            RiskCategory::HighRisk => "High Risk",
            RiskCategory::VeryHighRisk => "Very High Risk",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Diagnostic band, four buckets with boundaries at 45/60/75
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyBand {
    VerySafe,
    Safe,
    ModerateRisk,
    HighRisk,
}

impl SafetyBand {
    /// All bands in index order
    pub const ALL: [SafetyBand; 4] = [
        SafetyBand::VerySafe,
        SafetyBand::Safe,
        SafetyBand::ModerateRisk,
        SafetyBand::HighRisk,
    ];

    /// Map a safety score to its diagnostic band
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            SafetyBand::VerySafe
        } else if score >= 60.0 {
            SafetyBand::Safe
        } else if score >= 45.0 {
            SafetyBand::ModerateRisk
        } else {
            SafetyBand::HighRisk
        }
    }

    /// Position in [`SafetyBand::ALL`], for confusion-matrix indexing
    pub fn index(&self) -> usize {
        match self {
            SafetyBand::VerySafe => 0,
            SafetyBand::Safe => 1,
            SafetyBand::ModerateRisk => 2,
            SafetyBand::HighRisk => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SafetyBand::VerySafe => "Very Safe",
            SafetyBand::Safe => "Safe",
            SafetyBand::ModerateRisk => "Moderate Risk",
            SafetyBand::HighRisk => "High Risk",
        }
    }
}

impl std::fmt::Display for SafetyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_bucket_boundaries() {
        assert_eq!(RiskCategory::from_score(100.0), RiskCategory::VerySafe);
        assert_eq!(RiskCategory::from_score(80.0), RiskCategory::VerySafe);
        assert_eq!(RiskCategory::from_score(79.999), RiskCategory::Safe);
        assert_eq!(RiskCategory::from_score(65.0), RiskCategory::Safe);
        assert_eq!(RiskCategory::from_score(50.0), RiskCategory::ModerateRisk);
        assert_eq!(RiskCategory::from_score(35.0), RiskCategory::HighRisk);
        assert_eq!(RiskCategory::from_score(34.999), RiskCategory::VeryHighRisk);
        assert_eq!(RiskCategory::from_score(0.0), RiskCategory::VeryHighRisk);
    }

    #[test]
    fn test_five_bucket_total_partition() {
        // Every score in [0,100] lands in exactly one bucket
        for i in 0..=1000 {
            let score = i as f64 / 10.0;
            let _ = RiskCategory::from_score(score);
        }
    }

    #[test]
    fn test_four_band_boundaries() {
        assert_eq!(SafetyBand::from_score(75.0), SafetyBand::VerySafe);
        assert_eq!(SafetyBand::from_score(74.999), SafetyBand::Safe);
        assert_eq!(SafetyBand::from_score(60.0), SafetyBand::Safe);
        assert_eq!(SafetyBand::from_score(45.0), SafetyBand::ModerateRisk);
        assert_eq!(SafetyBand::from_score(44.999), SafetyBand::HighRisk);
        assert_eq!(SafetyBand::from_score(0.0), SafetyBand::HighRisk);
    }

    #[test]
    fn test_schemes_disagree_between_their_boundaries() {
        // 77 is Safe on the serving scheme but Very Safe on the diagnostic one
        assert_eq!(RiskCategory::from_score(77.0), RiskCategory::Safe);
        assert_eq!(SafetyBand::from_score(77.0), SafetyBand::VerySafe);
    }

    #[test]
    fn test_band_indices_match_all_order() {
        for (i, band) in SafetyBand::ALL.iter().enumerate() {
            assert_eq!(band.index(), i);
        }
    }
}
