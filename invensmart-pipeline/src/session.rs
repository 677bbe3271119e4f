//! Session-scoped dashboard state.
//!
//! The record set is loaded (or generated) once per session and held here
//! explicitly; every interaction recomputes the full snapshot from the
//! active filter. There is no module-level state and no caching: the
//! snapshot is a pure function of the session's records, its config, and
//! the filter.

use crate::config::{AnalyticsConfig, SyntheticConfig};
use crate::filter::RecordFilter;
use crate::insights::generate_insights;
use crate::loader::InventoryRecord;
use crate::metrics::compute_metrics;
use crate::recommendations::generate_recommendations;
use crate::synthetic::generate_records;
use crate::types::{MetricsBundle, Recommendation, SalesInsights};

/// One user session: the immutable source record set plus analysis config.
pub struct DashboardSession {
    records: Vec<InventoryRecord>,
    config: AnalyticsConfig,
}

/// Everything the presentation layer consumes for one filter state.
#[derive(Debug)]
pub struct DashboardSnapshot {
    /// The derived (filtered) record set, for charting and map rendering.
    pub filtered: Vec<InventoryRecord>,
    pub metrics: MetricsBundle,
    pub insights: SalesInsights,
    pub recommendations: Vec<Recommendation>,
}

impl DashboardSession {
    pub fn new(records: Vec<InventoryRecord>, config: AnalyticsConfig) -> Self {
        Self { records, config }
    }

    /// Session over a deterministic synthetic record set.
    pub fn synthetic(synthetic: &SyntheticConfig, seed: u64, config: AnalyticsConfig) -> Self {
        Self::new(generate_records(synthetic, seed), config)
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Run the full pipeline for one filter state: derive the view, then
    /// compute metrics, insights, and recommendations over it.
    pub fn snapshot(&self, filter: &RecordFilter) -> DashboardSnapshot {
        let filtered = filter.apply(&self.records);
        let range = filter.effective_range(&filtered);
        log::info!(
            "snapshot: {} of {} record(s) match the active filter",
            filtered.len(),
            self.records.len()
        );

        let metrics = compute_metrics(&filtered, range, &self.config);
        let insights = generate_insights(&filtered, range, &self.config);
        let recommendations = generate_recommendations(&filtered, &self.config);

        DashboardSnapshot {
            filtered,
            metrics,
            insights,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DateRange;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> DashboardSession {
        let records = vec![
            InventoryRecord {
                product_id: "P1".to_string(),
                category: "Snacks".to_string(),
                location_name: "Delhi".to_string(),
                stock_level: 5,
                sales_volume: 50,
                last_restock_date: date(2024, 1, 1),
                latitude: 28.6,
                longitude: 77.2,
            },
            InventoryRecord {
                product_id: "P2".to_string(),
                category: "Dairy".to_string(),
                location_name: "Mumbai".to_string(),
                stock_level: 100,
                sales_volume: 10,
                last_restock_date: date(2024, 2, 1),
                latitude: 19.0,
                longitude: 72.8,
            },
        ];
        DashboardSession::new(records, AnalyticsConfig::default())
    }

    #[test]
    fn snapshot_recomputes_per_filter_without_touching_the_source() {
        let session = session();
        let all = session.snapshot(&RecordFilter::unfiltered());
        assert_eq!(all.filtered.len(), 2);
        assert_eq!(all.metrics.total_sales, 60);

        let january = RecordFilter {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 31))),
            categories: None,
        };
        let snapshot = session.snapshot(&january);
        assert_eq!(snapshot.filtered.len(), 1);
        assert_eq!(snapshot.metrics.total_sales, 50);

        // The source set is untouched by filtering.
        assert_eq!(session.records().len(), 2);
        let again = session.snapshot(&RecordFilter::unfiltered());
        assert_eq!(again.metrics.total_sales, 60);
    }

    #[test]
    fn excluding_range_yields_empty_state_everywhere() {
        let session = session();
        let filter = RecordFilter {
            date_range: Some(DateRange::new(date(2030, 1, 1), date(2030, 12, 31))),
            categories: None,
        };
        let snapshot = session.snapshot(&filter);
        assert!(snapshot.filtered.is_empty());
        assert_eq!(snapshot.metrics, MetricsBundle::default());
        assert!(snapshot.insights.is_no_data());
        assert!(snapshot.recommendations.is_empty());
    }

    #[test]
    fn synthetic_session_is_reproducible() {
        let config = SyntheticConfig {
            record_count: 50,
            ..SyntheticConfig::default()
        };
        let a = DashboardSession::synthetic(&config, 9, AnalyticsConfig::default());
        let b = DashboardSession::synthetic(&config, 9, AnalyticsConfig::default());
        assert_eq!(a.records(), b.records());
        assert_eq!(a.records().len(), 50);
    }
}
