//! Seeded synthetic locality data for demos and integration tests.
//!
//! Draws indicator values from plausible ranges and derives the composite
//! safety score deterministically from the drawn indicators, so a trained
//! pipeline has real signal to recover.

use super::record::{RawRecord, RawTable};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// All generated columns, target last.
const COLUMNS: [&str; 44] = [
    "year",
    "population",
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
    "insurgency_incidents",
    "flood_events",
    "flood_affected_population",
    "landslide_events",
    "landslide_affected_population",
    "earthquake_events",
    "max_earthquake_magnitude",
    "lightning_strikes",
    "forest_fires",
    "cyclone_events",
    "road_accidents",
    "road_fatalities",
    "road_injuries",
    "railway_accidents",
    "aviation_incidents",
    "emergency_response_time_minutes",
    "annual_rainfall_mm",
    "rainfall_variability_coefficient",
    "max_temperature_celsius",
    "min_temperature_celsius",
    "extreme_weather_days",
    "monsoon_onset_deviation_days",
    "hospitals_per_100k",
    "police_stations_per_100k",
    "fire_stations_per_100k",
    "mobile_network_coverage_percent",
    "internet_connectivity_percent",
    "road_connectivity_index",
    "power_supply_reliability_percent",
    "composite_safety_score",
];

/// Generate `n` synthetic locality rows with a fixed seed.
pub fn generate_localities(n: usize, seed: u64) -> RawTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n);

    for _ in 0..n {
        let mut r = RawRecord::new();

        let population = rng.gen_range(2_000.0..200_000.0f64).round();
        let murder = rng.gen_range(0.0..5.0f64).round();
        let rape = rng.gen_range(0.0..8.0f64).round();
        let kidnapping = rng.gen_range(0.0..6.0f64).round();
        let robbery = rng.gen_range(0.0..10.0f64).round();
        let theft = rng.gen_range(0.0..40.0f64).round();
        let burglary = rng.gen_range(0.0..12.0f64).round();
        let fraud = rng.gen_range(0.0..10.0f64).round();
        let domestic = rng.gen_range(0.0..15.0f64).round();
        let total_crimes =
            murder + rape + kidnapping + robbery + theft + burglary + fraud + domestic;
        let crime_rate = total_crimes / population * 100_000.0;

        let floods = rng.gen_range(0.0..9.0f64).round();
        let landslides = rng.gen_range(0.0..7.0f64).round();
        let earthquakes = rng.gen_range(0.0..6.0f64).round();
        let cyclones = rng.gen_range(0.0..3.0f64).round();

        let response_time = rng.gen_range(8.0..45.0f64);
        let hospitals = rng.gen_range(3.0..50.0f64);
        let police = rng.gen_range(2.0..25.0f64);
        let fire = rng.gen_range(1.0..10.0f64);
        let mobile = rng.gen_range(40.0..100.0f64);
        let internet = rng.gen_range(20.0..95.0f64);
        let road_index = rng.gen_range(30.0..95.0f64);
        let power = rng.gen_range(50.0..99.0f64);
        let extreme_days = rng.gen_range(5.0..40.0f64).round();

        r.insert("year", rng.gen_range(2015..2025) as f64);
        r.insert("population", population);
        r.insert("total_crimes", total_crimes);
        r.insert("crime_rate_per_100k", crime_rate);
        r.insert("murder_cases", murder);
        r.insert("rape_cases", rape);
        r.insert("kidnapping_cases", kidnapping);
        r.insert("robbery_cases", robbery);
        r.insert("theft_cases", theft);
        r.insert("burglary_cases", burglary);
        r.insert("fraud_cases", fraud);
        r.insert("domestic_violence_cases", domestic);
        r.insert("crimes_against_women", rng.gen_range(0.0..12.0f64).round());
        r.insert("crimes_against_tourists", rng.gen_range(0.0..8.0f64).round());
        r.insert("insurgency_incidents", rng.gen_range(0.0..3.0f64).round());
        r.insert("flood_events", floods);
        r.insert(
            "flood_affected_population",
            (floods * rng.gen_range(50.0..400.0f64)).round(),
        );
        r.insert("landslide_events", landslides);
        r.insert(
            "landslide_affected_population",
            (landslides * rng.gen_range(30.0..250.0f64)).round(),
        );
        r.insert("earthquake_events", earthquakes);
        r.insert("max_earthquake_magnitude", rng.gen_range(0.0..7.5f64));
        r.insert("lightning_strikes", rng.gen_range(0.0..20.0f64).round());
        r.insert("forest_fires", rng.gen_range(0.0..6.0f64).round());
        r.insert("cyclone_events", cyclones);
        r.insert("road_accidents", rng.gen_range(0.0..30.0f64).round());
        r.insert("road_fatalities", rng.gen_range(0.0..8.0f64).round());
        r.insert("road_injuries", rng.gen_range(0.0..40.0f64).round());
        r.insert("railway_accidents", rng.gen_range(0.0..2.0f64).round());
        r.insert("aviation_incidents", rng.gen_range(0.0..2.0f64).round());
        r.insert("emergency_response_time_minutes", response_time);
        r.insert("annual_rainfall_mm", rng.gen_range(600.0..4800.0f64));
        r.insert("rainfall_variability_coefficient", rng.gen_range(0.1..0.5f64));
        r.insert("max_temperature_celsius", rng.gen_range(18.0..42.0f64));
        r.insert("min_temperature_celsius", rng.gen_range(-2.0..20.0f64));
        r.insert("extreme_weather_days", extreme_days);
        r.insert(
            "monsoon_onset_deviation_days",
            rng.gen_range(-20.0..20.0f64).round(),
        );
        r.insert("hospitals_per_100k", hospitals);
        r.insert("police_stations_per_100k", police);
        r.insert("fire_stations_per_100k", fire);
        r.insert("mobile_network_coverage_percent", mobile);
        r.insert("internet_connectivity_percent", internet);
        r.insert("road_connectivity_index", road_index);
        r.insert("power_supply_reliability_percent", power);

        let disasters = floods + landslides + earthquakes + cyclones;
        let score = 95.0 - 0.25 * crime_rate.min(120.0) - 1.1 * disasters
            - 0.30 * response_time
            - 0.10 * extreme_days
            + 0.08 * (hospitals + police + fire) / 3.0
            + 0.10 * (mobile + internet + road_index) / 3.0;
        r.insert("composite_safety_score", score.clamp(0.0, 100.0));

        rows.push(r);
    }

    RawTable::new(COLUMNS.iter().map(|c| c.to_string()).collect(), rows)
}
