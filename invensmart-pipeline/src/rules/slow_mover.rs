use crate::config::AnalyticsConfig;
use crate::loader::InventoryRecord;
use crate::recommendations::RecommendationRule;
use crate::types::{AdviceKind, Recommendation, Severity};

/// Flags products holding above-average stock while selling below average:
/// capital parked in goods the filtered period did not move.
///
/// Both cutoffs are means over the record set under analysis, so the rule
/// adapts to whatever slice the active filter selected.
pub struct SlowMoverRule;

impl RecommendationRule for SlowMoverRule {
    fn enable(&self, records: &[InventoryRecord]) -> bool {
        // Means over a single record cannot separate it from itself.
        records.len() >= 2
    }

    fn priority(&self) -> u8 {
        3
    }

    fn evaluate(
        &self,
        records: &[InventoryRecord],
        _config: &AnalyticsConfig,
    ) -> Vec<Recommendation> {
        if records.is_empty() {
            return Vec::new();
        }
        let count = records.len() as f64;
        let mean_stock =
            records.iter().map(|r| r.stock_level as f64).sum::<f64>() / count;
        let mean_sales =
            records.iter().map(|r| r.sales_volume as f64).sum::<f64>() / count;

        records
            .iter()
            .filter(|r| (r.stock_level as f64) > mean_stock && (r.sales_volume as f64) < mean_sales)
            .map(|record| Recommendation {
                severity: Severity::Advisory,
                action: AdviceKind::ReduceStock,
                subject: record.product_id.clone(),
                location: Some(record.location_name.clone()),
                priority: self.priority(),
                message: format!(
                    "Reduce stock for {} at {}: {} units on hand but only {} sold this period",
                    record.product_id,
                    record.location_name,
                    record.stock_level,
                    record.sales_volume,
                ),
            })
            .collect()
    }
}
