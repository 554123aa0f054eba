//! Derived composite indicators.
//!
//! Derivation is a pure per-record function: missing raw fields read as 0,
//! no cross-row state, and the same arithmetic runs at training and scoring
//! time. Output for a batch of records is identical to deriving each record
//! on its own.

use crate::data::{RawRecord, RawTable};

/// Composite indicators computed from raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedFeature {
    /// Sum of flood, landslide, earthquake and cyclone event counts
    TotalNaturalDisasters,
    /// Mean of the three per-100k emergency service densities
    InfrastructureIndex,
    /// Mean of mobile, internet and road connectivity measures
    ConnectivityScore,
    /// Extreme weather days weighted by rainfall variability
    WeatherSeverity,
    /// Weighted violent/property crime counts per 100k population
    CrimeSeverity,
    /// Population scaled to a density proxy
    PopulationDensity,
}

/// All derived features, in the order their columns are appended.
pub const DERIVED_FEATURES: [DerivedFeature; 6] = [
    DerivedFeature::TotalNaturalDisasters,
    DerivedFeature::InfrastructureIndex,
    DerivedFeature::ConnectivityScore,
    DerivedFeature::WeatherSeverity,
    DerivedFeature::CrimeSeverity,
    DerivedFeature::PopulationDensity,
];

impl DerivedFeature {
    pub fn name(&self) -> &'static str {
        match self {
            DerivedFeature::TotalNaturalDisasters => "total_natural_disasters",
            DerivedFeature::InfrastructureIndex => "infrastructure_index",
            DerivedFeature::ConnectivityScore => "connectivity_score",
            DerivedFeature::WeatherSeverity => "weather_severity",
            DerivedFeature::CrimeSeverity => "crime_severity",
            DerivedFeature::PopulationDensity => "population_density",
        }
    }

    /// Compute the indicator from a raw record
    pub fn compute(&self, record: &RawRecord) -> f64 {
        let field = |name: &str| record.get(name).unwrap_or(0.0);

        match self {
            DerivedFeature::TotalNaturalDisasters => {
                field("flood_events")
                    + field("landslide_events")
                    + field("earthquake_events")
                    + field("cyclone_events")
            }
            DerivedFeature::InfrastructureIndex => {
                (field("hospitals_per_100k")
                    + field("police_stations_per_100k")
                    + field("fire_stations_per_100k"))
                    / 3.0
            }
            DerivedFeature::ConnectivityScore => {
                (field("mobile_network_coverage_percent")
                    + field("internet_connectivity_percent")
                    + field("road_connectivity_index"))
                    / 3.0
            }
            DerivedFeature::WeatherSeverity => {
                field("extreme_weather_days") * field("rainfall_variability_coefficient")
            }
            DerivedFeature::CrimeSeverity => {
                let weighted = field("murder_cases") * 5.0
                    + field("rape_cases") * 4.0
                    + field("kidnapping_cases") * 3.0
                    + field("robbery_cases") * 2.0
                    + field("theft_cases");
                // Floor the divisor to avoid division by zero
                weighted / field("population").max(1.0) * 100_000.0
            }
            DerivedFeature::PopulationDensity => field("population") / 100.0,
        }
    }
}

/// Extend a record with the six derived indicator fields.
pub fn derive_record(record: &RawRecord) -> RawRecord {
    let mut derived = record.clone();
    for feature in &DERIVED_FEATURES {
        derived.insert(feature.name(), feature.compute(record));
    }
    derived
}

/// Extend every row of a table, appending the derived columns.
pub fn derive_table(table: &RawTable) -> RawTable {
    let mut columns = table.columns.clone();
    for feature in &DERIVED_FEATURES {
        if !columns.iter().any(|c| c == feature.name()) {
            columns.push(feature.name().to_string());
        }
    }

    let rows = table.rows.iter().map(derive_record).collect();
    RawTable::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(pairs: &[(&str, f64)]) -> RawRecord {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_derived_formulas() {
        let r = record(&[
            ("flood_events", 2.0),
            ("landslide_events", 1.0),
            ("earthquake_events", 3.0),
            ("cyclone_events", 0.0),
            ("hospitals_per_100k", 30.0),
            ("police_stations_per_100k", 15.0),
            ("fire_stations_per_100k", 6.0),
            ("mobile_network_coverage_percent", 80.0),
            ("internet_connectivity_percent", 60.0),
            ("road_connectivity_index", 70.0),
            ("extreme_weather_days", 20.0),
            ("rainfall_variability_coefficient", 0.25),
            ("murder_cases", 1.0),
            ("rape_cases", 2.0),
            ("kidnapping_cases", 1.0),
            ("robbery_cases", 3.0),
            ("theft_cases", 15.0),
            ("population", 50000.0),
        ]);

        let d = derive_record(&r);

        assert_relative_eq!(d.get("total_natural_disasters").unwrap(), 6.0);
        assert_relative_eq!(d.get("infrastructure_index").unwrap(), 17.0);
        assert_relative_eq!(d.get("connectivity_score").unwrap(), 70.0);
        assert_relative_eq!(d.get("weather_severity").unwrap(), 5.0);
        // (5 + 8 + 3 + 6 + 15) / 50000 * 100000
        assert_relative_eq!(d.get("crime_severity").unwrap(), 74.0);
        assert_relative_eq!(d.get("population_density").unwrap(), 500.0);
    }

    #[test]
    fn test_missing_fields_read_as_zero() {
        let d = derive_record(&RawRecord::new());

        assert_relative_eq!(d.get("total_natural_disasters").unwrap(), 0.0);
        assert_relative_eq!(d.get("infrastructure_index").unwrap(), 0.0);
        assert_relative_eq!(d.get("weather_severity").unwrap(), 0.0);
        assert_relative_eq!(d.get("crime_severity").unwrap(), 0.0);
        assert_relative_eq!(d.get("population_density").unwrap(), 0.0);
    }

    #[test]
    fn test_population_divisor_floors_at_one() {
        let r = record(&[("murder_cases", 2.0), ("population", 0.0)]);
        let d = derive_record(&r);

        // 10 weighted cases over a floored population of 1
        assert_relative_eq!(d.get("crime_severity").unwrap(), 1_000_000.0);
        assert_relative_eq!(d.get("population_density").unwrap(), 0.0);
    }

    #[test]
    fn test_batch_matches_single_record_derivation() {
        let rows = vec![
            record(&[("flood_events", 2.0), ("population", 1000.0)]),
            record(&[("murder_cases", 1.0), ("population", 500.0)]),
            RawRecord::new(),
        ];
        let table = RawTable::new(vec!["flood_events".to_string()], rows.clone());

        let batch = derive_table(&table);
        for (row, single) in batch.rows.iter().zip(rows.iter().map(derive_record)) {
            assert_eq!(*row, single);
        }
    }

    #[test]
    fn test_derive_table_appends_columns_once() {
        let table = RawTable::new(
            vec!["population".to_string(), "crime_severity".to_string()],
            vec![record(&[("population", 100.0)])],
        );

        let derived = derive_table(&table);
        let n = derived
            .columns
            .iter()
            .filter(|c| c.as_str() == "crime_severity")
            .count();
        assert_eq!(n, 1);
        assert!(derived.has_column("population_density"));
    }
}
