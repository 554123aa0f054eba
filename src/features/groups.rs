//! Candidate feature groups for model training.
//!
//! The candidate list is the ordered concatenation of the thematic groups,
//! restricted to columns actually present in the training table. The order is
//! fixed: it becomes the feature order recorded in the pipeline state.

pub const CRIME_FEATURES: [&str; 13] = [
    "total_crimes",
    "crime_rate_per_100k",
    "murder_cases",
    "rape_cases",
    "kidnapping_cases",
    "robbery_cases",
    "theft_cases",
    "burglary_cases",
    "fraud_cases",
    "domestic_violence_cases",
    "crimes_against_women",
    "crimes_against_tourists",
    "crime_severity",
];

pub const NATURAL_HAZARD_FEATURES: [&str; 10] = [
    "flood_events",
    "flood_affected_population",
    "landslide_events",
    "landslide_affected_population",
    "earthquake_events",
    "max_earthquake_magnitude",
    "lightning_strikes",
    "forest_fires",
    "cyclone_events",
    "total_natural_disasters",
];

pub const TRANSPORT_FEATURES: [&str; 6] = [
    "road_accidents",
    "road_fatalities",
    "road_injuries",
    "railway_accidents",
    "aviation_incidents",
    "emergency_response_time_minutes",
];

pub const INFRASTRUCTURE_FEATURES: [&str; 9] = [
    "hospitals_per_100k",
    "police_stations_per_100k",
    "fire_stations_per_100k",
    "mobile_network_coverage_percent",
    "internet_connectivity_percent",
    "road_connectivity_index",
    "power_supply_reliability_percent",
    "infrastructure_index",
    "connectivity_score",
];

pub const CLIMATE_FEATURES: [&str; 7] = [
    "annual_rainfall_mm",
    "rainfall_variability_coefficient",
    "max_temperature_celsius",
    "min_temperature_celsius",
    "extreme_weather_days",
    "monsoon_onset_deviation_days",
    "weather_severity",
];

pub const OTHER_FEATURES: [&str; 3] = ["population", "population_density", "year"];

/// Candidate feature names present in the given column set, in group order.
pub fn candidate_features(columns: &[String]) -> Vec<String> {
    CRIME_FEATURES
        .iter()
        .chain(NATURAL_HAZARD_FEATURES.iter())
        .chain(TRANSPORT_FEATURES.iter())
        .chain(INFRASTRUCTURE_FEATURES.iter())
        .chain(CLIMATE_FEATURES.iter())
        .chain(OTHER_FEATURES.iter())
        .filter(|name| columns.iter().any(|c| c == *name))
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_filtered_to_present_columns() {
        let columns = vec![
            "murder_cases".to_string(),
            "population".to_string(),
            "locality_name".to_string(),
            "flood_events".to_string(),
        ];

        let candidates = candidate_features(&columns);
        assert_eq!(candidates, vec!["murder_cases", "flood_events", "population"]);
    }

    #[test]
    fn test_group_order_is_preserved() {
        let columns: Vec<String> = CRIME_FEATURES
            .iter()
            .chain(OTHER_FEATURES.iter())
            .rev()
            .map(|s| s.to_string())
            .collect();

        let candidates = candidate_features(&columns);
        // Crime group first regardless of column order in the source
        assert_eq!(candidates[0], "total_crimes");
        assert_eq!(candidates.last().map(String::as_str), Some("year"));
    }

    #[test]
    fn test_full_candidate_count() {
        let columns: Vec<String> = CRIME_FEATURES
            .iter()
            .chain(NATURAL_HAZARD_FEATURES.iter())
            .chain(TRANSPORT_FEATURES.iter())
            .chain(INFRASTRUCTURE_FEATURES.iter())
            .chain(CLIMATE_FEATURES.iter())
            .chain(OTHER_FEATURES.iter())
            .map(|s| s.to_string())
            .collect();

        assert_eq!(candidate_features(&columns).len(), 48);
    }
}
