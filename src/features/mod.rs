//! Feature engineering module
//!
//! Provides derived composite indicators, the candidate feature groups and
//! univariate feature selection.

mod deriver;
mod groups;
mod selector;

pub use deriver::{derive_record, derive_table, DerivedFeature, DERIVED_FEATURES};
pub use groups::{
    candidate_features, CLIMATE_FEATURES, CRIME_FEATURES, INFRASTRUCTURE_FEATURES,
    NATURAL_HAZARD_FEATURES, OTHER_FEATURES, TRANSPORT_FEATURES,
};
pub use selector::FeatureSelector;
