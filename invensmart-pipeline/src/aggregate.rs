//! Grouped sales aggregation.
//!
//! Shared by the insight generator (ranking) and the presentation front end
//! (chart series). Rankings are fully deterministic: descending by summed
//! sales, ties broken by lexicographic group key.

use std::collections::BTreeMap;

use crate::loader::InventoryRecord;
use crate::types::{DailySales, GroupTotal};

/// Sum `sales_volume` per group key, ranked descending with lexicographic
/// tie-break.
fn ranked_sales_by<F>(records: &[InventoryRecord], key: F) -> Vec<GroupTotal>
where
    F: Fn(&InventoryRecord) -> &str,
{
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(key(record)).or_insert(0) += record.sales_volume as u64;
    }

    let mut ranked: Vec<GroupTotal> = totals
        .into_iter()
        .map(|(key, total_sales)| GroupTotal {
            key: key.to_string(),
            total_sales,
        })
        .collect();
    // BTreeMap iteration is already lexicographic, so a stable sort on the
    // total alone preserves the tie-break.
    ranked.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    ranked
}

/// Summed sales per category, ranked.
pub fn sales_by_category(records: &[InventoryRecord]) -> Vec<GroupTotal> {
    ranked_sales_by(records, |r| r.category.as_str())
}

/// Summed sales per location, ranked.
pub fn sales_by_location(records: &[InventoryRecord]) -> Vec<GroupTotal> {
    ranked_sales_by(records, |r| r.location_name.as_str())
}

/// Summed sales per restock date, in chronological order.
pub fn sales_by_date(records: &[InventoryRecord]) -> Vec<DailySales> {
    let mut totals: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.last_restock_date).or_insert(0) += record.sales_volume as u64;
    }
    totals
        .into_iter()
        .map(|(date, total_sales)| DailySales { date, total_sales })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_record(category: &str, location: &str, sales: u32, day: u32) -> InventoryRecord {
        InventoryRecord {
            product_id: format!("P-{}-{}", category, sales),
            category: category.to_string(),
            location_name: location.to_string(),
            stock_level: 10,
            sales_volume: sales,
            last_restock_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            latitude: 28.6,
            longitude: 77.2,
        }
    }

    #[test]
    fn categories_rank_descending_by_sales() {
        let records = vec![
            make_record("Snacks", "Delhi", 10, 1),
            make_record("Dairy", "Delhi", 30, 1),
            make_record("Snacks", "Mumbai", 5, 2),
        ];
        let ranked = sales_by_category(&records);
        assert_eq!(ranked[0].key, "Dairy");
        assert_eq!(ranked[0].total_sales, 30);
        assert_eq!(ranked[1].key, "Snacks");
        assert_eq!(ranked[1].total_sales, 15);
    }

    #[test]
    fn equal_totals_break_ties_lexicographically() {
        let records = vec![
            make_record("Produce", "Delhi", 20, 1),
            make_record("Dairy", "Delhi", 20, 1),
            make_record("Beverages", "Delhi", 20, 1),
        ];
        let ranked = sales_by_category(&records);
        let keys: Vec<&str> = ranked.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["Beverages", "Dairy", "Produce"]);
    }

    #[test]
    fn daily_series_is_chronological() {
        let records = vec![
            make_record("Snacks", "Delhi", 10, 20),
            make_record("Snacks", "Delhi", 5, 3),
            make_record("Dairy", "Delhi", 7, 3),
        ];
        let series = sales_by_date(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(series[0].total_sales, 12);
        assert_eq!(series[1].total_sales, 10);
    }

    #[test]
    fn empty_input_yields_empty_rankings() {
        assert!(sales_by_category(&[]).is_empty());
        assert!(sales_by_location(&[]).is_empty());
        assert!(sales_by_date(&[]).is_empty());
    }
}
