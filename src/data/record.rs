//! Raw locality indicator records.
//!
//! A record is a mapping of named numeric fields. No field is structurally
//! required; absent fields are treated as missing and handled by the stage
//! that consumes the record (median imputation at training time, zero-fill
//! at scoring time).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single locality's raw indicator values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    values: BTreeMap<String, f64>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Get a field value if present
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Drop a field, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Whether the record carries the named field
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether the record carries any fields at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over (name, value) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Build a record from a JSON value, keeping numeric fields only.
    ///
    /// Non-numeric fields (locality names, category labels) are ignored.
    /// Returns `None` if the value is not a JSON object.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut record = Self::new();
        for (name, v) in object {
            if let Some(num) = v.as_f64() {
                record.insert(name.clone(), num);
            }
        }
        Some(record)
    }

    /// Canonical example input covering every raw indicator field.
    pub fn example() -> Self {
        let fields: [(&str, f64); 43] = [
            ("year", 2024.0),
            ("population", 50000.0),
            ("total_crimes", 25.0),
            ("crime_rate_per_100k", 50.0),
            ("murder_cases", 1.0),
            ("rape_cases", 2.0),
            ("kidnapping_cases", 1.0),
            ("robbery_cases", 3.0),
            ("theft_cases", 15.0),
            ("burglary_cases", 2.0),
            ("fraud_cases", 1.0),
            ("domestic_violence_cases", 3.0),
            ("crimes_against_women", 5.0),
            ("crimes_against_tourists", 2.0),
            ("insurgency_incidents", 0.0),
            ("flood_events", 3.0),
            ("flood_affected_population", 1000.0),
            ("landslide_events", 1.0),
            ("landslide_affected_population", 200.0),
            ("earthquake_events", 2.0),
            ("max_earthquake_magnitude", 5.5),
            ("lightning_strikes", 10.0),
            ("forest_fires", 2.0),
            ("cyclone_events", 1.0),
            ("road_accidents", 15.0),
            ("road_fatalities", 2.0),
            ("road_injuries", 25.0),
            ("railway_accidents", 0.0),
            ("aviation_incidents", 0.0),
            ("emergency_response_time_minutes", 20.0),
            ("annual_rainfall_mm", 2500.0),
            ("rainfall_variability_coefficient", 0.25),
            ("max_temperature_celsius", 30.0),
            ("min_temperature_celsius", 15.0),
            ("extreme_weather_days", 25.0),
            ("monsoon_onset_deviation_days", 10.0),
            ("hospitals_per_100k", 25.0),
            ("police_stations_per_100k", 10.0),
            ("fire_stations_per_100k", 5.0),
            ("mobile_network_coverage_percent", 85.0),
            ("internet_connectivity_percent", 70.0),
            ("road_connectivity_index", 75.0),
            ("power_supply_reliability_percent", 80.0),
        ];
        fields
            .iter()
            .map(|&(name, value)| (name.to_string(), value))
            .collect()
    }
}

impl FromIterator<(String, f64)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A table of raw records with a known column set.
///
/// Columns track what the source data actually carried, so that the candidate
/// feature list can be restricted to present columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names in source order
    pub columns: Vec<String>,
    /// One record per source row
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    /// Create a table from columns and rows
    pub fn new(columns: Vec<String>, rows: Vec<RawRecord>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table carries the named column
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Values of a column across all rows, missing cells as `None`
    pub fn column_values(&self, name: &str) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.get(name)).collect()
    }

    /// Count of missing cells across all known columns
    pub fn missing_cells(&self) -> usize {
        self.columns
            .iter()
            .map(|c| self.rows.iter().filter(|r| !r.contains(c)).count())
            .sum()
    }

    /// Fill missing cells with the per-column median.
    ///
    /// A column with no values at all imputes 0.
    pub fn impute_median(&mut self) {
        for col in self.columns.clone() {
            let mut present: Vec<f64> = self.rows.iter().filter_map(|r| r.get(&col)).collect();
            if present.len() == self.rows.len() {
                continue;
            }

            let fill = if present.is_empty() {
                0.0
            } else {
                present.sort_by(|a, b| a.partial_cmp(b).unwrap());
                let mid = present.len() / 2;
                if present.len() % 2 == 0 {
                    (present[mid - 1] + present[mid]) / 2.0
                } else {
                    present[mid]
                }
            };

            for row in &mut self.rows {
                if !row.contains(&col) {
                    row.insert(col.clone(), fill);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, f64)]) -> RawRecord {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_record_access() {
        let r = record(&[("population", 5000.0), ("flood_events", 2.0)]);
        assert_eq!(r.get("population"), Some(5000.0));
        assert_eq!(r.get("absent"), None);
        assert!(r.contains("flood_events"));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_from_json_keeps_numeric_fields_only() {
        let value = serde_json::json!({
            "population": 5000,
            "state": "Arunachal Pradesh",
            "flood_events": 2.0,
            "flagged": true,
        });
        let r = RawRecord::from_json(&value).unwrap();
        assert_eq!(r.get("population"), Some(5000.0));
        assert_eq!(r.get("flood_events"), Some(2.0));
        assert!(!r.contains("state"));
        assert!(!r.contains("flagged"));

        assert!(RawRecord::from_json(&serde_json::json!([1, 2])).is_none());
    }

    #[test]
    fn test_impute_median_fills_missing_cells() {
        let mut table = RawTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                record(&[("a", 1.0), ("b", 10.0)]),
                record(&[("a", 3.0)]),
                record(&[("a", 5.0), ("b", 30.0)]),
            ],
        );
        assert_eq!(table.missing_cells(), 1);

        table.impute_median();
        assert_eq!(table.rows[1].get("b"), Some(20.0));
        assert_eq!(table.missing_cells(), 0);
    }

    #[test]
    fn test_impute_median_even_count_and_empty_column() {
        let mut table = RawTable::new(
            vec!["a".to_string(), "empty".to_string()],
            vec![
                record(&[("a", 1.0)]),
                record(&[("a", 2.0)]),
                record(&[("a", 4.0)]),
                record(&[]),
            ],
        );

        table.impute_median();
        // Median of [1, 2, 4] fills the missing cell
        assert_eq!(table.rows[3].get("a"), Some(2.0));
        // A column with no values imputes 0
        assert_eq!(table.rows[0].get("empty"), Some(0.0));
    }

    #[test]
    fn test_example_record_is_complete() {
        let example = RawRecord::example();
        assert_eq!(example.get("population"), Some(50000.0));
        assert_eq!(example.get("total_crimes"), Some(25.0));
        assert!(example.contains("power_supply_reliability_percent"));
    }
}
