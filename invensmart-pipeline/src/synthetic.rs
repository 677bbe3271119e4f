//! Deterministic synthetic record generation.
//!
//! Stands in for a real CSV when none is available (demos, tests). All
//! sampling is uniform within the bounds declared in `SyntheticConfig`, drawn
//! from a single seeded RNG so the same seed always reproduces the same
//! record set.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SyntheticConfig;
use crate::loader::InventoryRecord;

/// Fixed category set sampled uniformly.
const CATEGORIES: [&str; 6] = [
    "Snacks",
    "Beverages",
    "Dairy",
    "Produce",
    "Household",
    "Personal Care",
];

/// Fixed location set with base coordinates. Generated records jitter around
/// these within `SyntheticConfig::coordinate_jitter` degrees.
const LOCATIONS: [(&str, f64, f64); 7] = [
    ("Delhi", 28.61, 77.21),
    ("Mumbai", 19.08, 72.88),
    ("Bengaluru", 12.97, 77.59),
    ("Hyderabad", 17.39, 78.49),
    ("Chennai", 13.08, 80.27),
    ("Kolkata", 22.57, 88.36),
    ("Pune", 18.52, 73.86),
];

/// Generate `config.record_count` synthetic inventory records from a seed.
pub fn generate_records(config: &SyntheticConfig, seed: u64) -> Vec<InventoryRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(config.record_count);

    for i in 0..config.record_count {
        let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
        let (location, base_lat, base_lon) = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];

        let days_back = if config.window_days == 0 {
            0
        } else {
            rng.gen_range(0..config.window_days) as i64
        };
        let jitter = config.coordinate_jitter.abs();

        records.push(InventoryRecord {
            product_id: format!("P{:04}", i + 1),
            category: category.to_string(),
            location_name: location.to_string(),
            stock_level: rng.gen_range(config.stock_range.0..=config.stock_range.1),
            sales_volume: rng.gen_range(config.sales_range.0..=config.sales_range.1),
            last_restock_date: config.anchor_date - Duration::days(days_back),
            latitude: base_lat + rng.gen_range(-jitter..=jitter),
            longitude: base_lon + rng.gen_range(-jitter..=jitter),
        });
    }

    records
}
