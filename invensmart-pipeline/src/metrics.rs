//! Scalar KPI computation.
//!
//! Four independent metrics over a (possibly filtered) record set. Every
//! division is guarded: a zero-day span or zero total stock produces a zero
//! metric, never an error, and an empty record set yields the all-zero
//! bundle.

use crate::config::AnalyticsConfig;
use crate::filter::DateRange;
use crate::loader::InventoryRecord;
use crate::types::MetricsBundle;

/// Compute the KPI bundle for `records`.
///
/// `date_range` is the selected range when the caller filtered by date;
/// pass `None` to derive the span from the records' own restock dates.
/// Pure: identical inputs always produce an identical bundle.
pub fn compute_metrics(
    records: &[InventoryRecord],
    date_range: Option<DateRange>,
    config: &AnalyticsConfig,
) -> MetricsBundle {
    if records.is_empty() {
        return MetricsBundle::default();
    }

    let total_sales: u64 = records.iter().map(|r| r.sales_volume as u64).sum();
    let total_stock: u64 = records.iter().map(|r| r.stock_level as u64).sum();

    let span_days = date_range
        .or_else(|| DateRange::covering(records))
        .map(|range| range.span_days())
        .unwrap_or(0);

    let average_daily_sales = if span_days > 0 {
        total_sales as f64 / span_days as f64
    } else {
        0.0
    };

    let stock_turnover_ratio = if total_stock > 0 {
        total_sales as f64 / total_stock as f64
    } else {
        0.0
    };

    let low_stock_count = records
        .iter()
        .filter(|r| r.stock_level < config.low_stock_threshold)
        .count();

    MetricsBundle {
        total_sales,
        average_daily_sales,
        stock_turnover_ratio,
        low_stock_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_record(product_id: &str, stock: u32, sales: u32, restocked: NaiveDate) -> InventoryRecord {
        InventoryRecord {
            product_id: product_id.to_string(),
            category: "Snacks".to_string(),
            location_name: "Delhi".to_string(),
            stock_level: stock,
            sales_volume: sales,
            last_restock_date: restocked,
            latitude: 28.6,
            longitude: 77.2,
        }
    }

    #[test]
    fn empty_record_set_yields_all_zero_bundle() {
        let bundle = compute_metrics(&[], None, &AnalyticsConfig::default());
        assert_eq!(bundle, MetricsBundle::default());
    }

    #[test]
    fn bundle_for_the_reference_scenario() {
        // P1: stock 5, sales 50. P2: stock 100, sales 10. Threshold 10.
        let records = vec![
            make_record("P1", 5, 50, date(2024, 1, 1)),
            make_record("P2", 100, 10, date(2024, 1, 1)),
        ];
        let bundle = compute_metrics(&records, None, &AnalyticsConfig::default());
        assert_eq!(bundle.total_sales, 60);
        assert!((bundle.stock_turnover_ratio - 60.0 / 105.0).abs() < 1e-9);
        assert_eq!(bundle.low_stock_count, 1);
        // Both records on the same day: one-day span.
        assert!((bundle.average_daily_sales - 60.0).abs() < 1e-9);
    }

    #[test]
    fn average_daily_sales_uses_the_selected_range() {
        let records = vec![make_record("P1", 5, 60, date(2024, 1, 2))];
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 30));
        let bundle = compute_metrics(&records, Some(range), &AnalyticsConfig::default());
        assert!((bundle.average_daily_sales - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_day_span_guards_the_division() {
        let records = vec![make_record("P1", 5, 60, date(2024, 1, 2))];
        let inverted = DateRange::new(date(2024, 1, 30), date(2024, 1, 1));
        let bundle = compute_metrics(&records, Some(inverted), &AnalyticsConfig::default());
        assert!((bundle.average_daily_sales - 0.0).abs() < f64::EPSILON);
        // The other metrics are unaffected.
        assert_eq!(bundle.total_sales, 60);
    }

    #[test]
    fn zero_total_stock_yields_zero_turnover() {
        let records = vec![
            make_record("P1", 0, 30, date(2024, 1, 1)),
            make_record("P2", 0, 10, date(2024, 1, 1)),
        ];
        let bundle = compute_metrics(&records, None, &AnalyticsConfig::default());
        assert!((bundle.stock_turnover_ratio - 0.0).abs() < f64::EPSILON);
        assert_eq!(bundle.total_sales, 40);
    }

    #[test]
    fn low_stock_count_respects_the_configured_threshold() {
        let records = vec![
            make_record("P1", 4, 1, date(2024, 1, 1)),
            make_record("P2", 10, 1, date(2024, 1, 1)),
            make_record("P3", 25, 1, date(2024, 1, 1)),
        ];
        let strict = AnalyticsConfig {
            low_stock_threshold: 26,
            ..AnalyticsConfig::default()
        };
        assert_eq!(
            compute_metrics(&records, None, &AnalyticsConfig::default()).low_stock_count,
            1
        );
        assert_eq!(compute_metrics(&records, None, &strict).low_stock_count, 3);
    }

    #[test]
    fn metrics_are_idempotent() {
        let records = vec![
            make_record("P1", 5, 50, date(2024, 1, 1)),
            make_record("P2", 100, 10, date(2024, 1, 9)),
        ];
        let config = AnalyticsConfig::default();
        let first = compute_metrics(&records, None, &config);
        let second = compute_metrics(&records, None, &config);
        assert_eq!(first, second);
    }
}
