//! Qualitative insight generation.
//!
//! Ranks grouped sales aggregates to name the top category and location, and
//! labels the sales trend by comparing the two halves of the selected date
//! range. An empty record set produces the "no data" sentinel rather than
//! failing.

use crate::aggregate::{sales_by_category, sales_by_location};
use crate::config::AnalyticsConfig;
use crate::filter::DateRange;
use crate::loader::InventoryRecord;
use crate::types::{SalesInsights, TrendLabel};

/// Derive insights for `records` over the selected range.
///
/// `date_range` follows the same convention as the metrics engine: `None`
/// derives the range from the records themselves.
pub fn generate_insights(
    records: &[InventoryRecord],
    date_range: Option<DateRange>,
    config: &AnalyticsConfig,
) -> SalesInsights {
    if records.is_empty() {
        return SalesInsights::no_data();
    }

    let top_category = sales_by_category(records).into_iter().next();
    let top_location = sales_by_location(records).into_iter().next();
    let trend = date_range
        .or_else(|| DateRange::covering(records))
        .map(|range| trend_label(records, range, config.trend_tolerance));

    SalesInsights {
        trend,
        top_category,
        top_location,
    }
}

/// Compare summed sales volume in the first half of the range (up to and
/// including the midpoint day) against the second half.
///
/// Flat when both halves are empty or their relative difference stays within
/// `tolerance`; otherwise rising or falling with the second half.
fn trend_label(records: &[InventoryRecord], range: DateRange, tolerance: f64) -> TrendLabel {
    let midpoint = range.midpoint();
    let mut first_half: u64 = 0;
    let mut second_half: u64 = 0;
    for record in records {
        if !range.contains(record.last_restock_date) {
            continue;
        }
        if record.last_restock_date <= midpoint {
            first_half += record.sales_volume as u64;
        } else {
            second_half += record.sales_volume as u64;
        }
    }

    let base = first_half.max(second_half);
    if base == 0 {
        return TrendLabel::Flat;
    }
    let relative_diff = (second_half as f64 - first_half as f64).abs() / base as f64;
    if relative_diff < tolerance {
        TrendLabel::Flat
    } else if second_half > first_half {
        TrendLabel::Rising
    } else {
        TrendLabel::Falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_record(
        category: &str,
        location: &str,
        sales: u32,
        restocked: NaiveDate,
    ) -> InventoryRecord {
        InventoryRecord {
            product_id: format!("P-{}-{}", category, sales),
            category: category.to_string(),
            location_name: location.to_string(),
            stock_level: 10,
            sales_volume: sales,
            last_restock_date: restocked,
            latitude: 28.6,
            longitude: 77.2,
        }
    }

    #[test]
    fn empty_record_set_yields_the_sentinel() {
        let insights = generate_insights(&[], None, &AnalyticsConfig::default());
        assert!(insights.is_no_data());
    }

    #[test]
    fn top_groups_for_the_reference_scenario() {
        let records = vec![
            make_record("Snacks", "Delhi", 50, date(2024, 1, 1)),
            make_record("Snacks", "Mumbai", 10, date(2024, 1, 1)),
        ];
        let insights = generate_insights(&records, None, &AnalyticsConfig::default());
        let top_category = insights.top_category.unwrap();
        assert_eq!(top_category.key, "Snacks");
        assert_eq!(top_category.total_sales, 60);
        let top_location = insights.top_location.unwrap();
        assert_eq!(top_location.key, "Delhi");
        assert_eq!(top_location.total_sales, 50);
    }

    #[test]
    fn rising_trend_when_second_half_dominates() {
        let records = vec![
            make_record("Snacks", "Delhi", 10, date(2024, 1, 1)),
            make_record("Snacks", "Delhi", 40, date(2024, 1, 30)),
        ];
        let insights = generate_insights(&records, None, &AnalyticsConfig::default());
        assert_eq!(insights.trend, Some(TrendLabel::Rising));
    }

    #[test]
    fn falling_trend_when_first_half_dominates() {
        let records = vec![
            make_record("Snacks", "Delhi", 40, date(2024, 1, 1)),
            make_record("Snacks", "Delhi", 10, date(2024, 1, 30)),
        ];
        let insights = generate_insights(&records, None, &AnalyticsConfig::default());
        assert_eq!(insights.trend, Some(TrendLabel::Falling));
    }

    #[test]
    fn near_equal_halves_are_flat_within_tolerance() {
        let records = vec![
            make_record("Snacks", "Delhi", 100, date(2024, 1, 1)),
            make_record("Snacks", "Delhi", 98, date(2024, 1, 30)),
        ];
        let insights = generate_insights(&records, None, &AnalyticsConfig::default());
        assert_eq!(insights.trend, Some(TrendLabel::Flat));

        let strict = AnalyticsConfig {
            trend_tolerance: 0.001,
            ..AnalyticsConfig::default()
        };
        let insights = generate_insights(&records, None, &strict);
        assert_eq!(insights.trend, Some(TrendLabel::Falling));
    }

    #[test]
    fn explicit_range_bounds_the_trend_window() {
        // The December record falls outside the selected range and must not
        // influence the label.
        let records = vec![
            make_record("Snacks", "Delhi", 500, date(2023, 12, 1)),
            make_record("Snacks", "Delhi", 10, date(2024, 1, 1)),
            make_record("Snacks", "Delhi", 40, date(2024, 1, 30)),
        ];
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        let insights = generate_insights(&records, Some(range), &AnalyticsConfig::default());
        assert_eq!(insights.trend, Some(TrendLabel::Rising));
    }

    #[test]
    fn tie_between_categories_is_lexicographic_every_run() {
        let records = vec![
            make_record("Produce", "Delhi", 20, date(2024, 1, 1)),
            make_record("Dairy", "Mumbai", 20, date(2024, 1, 1)),
        ];
        for _ in 0..3 {
            let insights = generate_insights(&records, None, &AnalyticsConfig::default());
            assert_eq!(insights.top_category.unwrap().key, "Dairy");
        }
    }
}
