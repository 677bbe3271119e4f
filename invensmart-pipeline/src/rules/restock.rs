use crate::config::AnalyticsConfig;
use crate::loader::InventoryRecord;
use crate::recommendations::RecommendationRule;
use crate::types::{AdviceKind, Recommendation, Severity};

/// Flags products whose stock-to-sales ratio falls below the configured
/// restock threshold, naming the product and its location.
///
/// A product with zero stock but recorded sales counts as ratio zero. A
/// product with zero sales never qualifies: there is no demand signal to
/// restock against.
pub struct RestockRule;

impl RecommendationRule for RestockRule {
    fn priority(&self) -> u8 {
        1
    }

    fn evaluate(
        &self,
        records: &[InventoryRecord],
        config: &AnalyticsConfig,
    ) -> Vec<Recommendation> {
        records
            .iter()
            .filter_map(|record| {
                let ratio = record.stock_to_sales()?;
                if ratio >= config.restock_ratio {
                    return None;
                }
                Some(Recommendation {
                    severity: Severity::Critical,
                    action: AdviceKind::Restock,
                    subject: record.product_id.clone(),
                    location: Some(record.location_name.clone()),
                    priority: self.priority(),
                    message: format!(
                        "Restock {} at {}: {} units on hand against {} sold (ratio {:.2}, threshold {:.2})",
                        record.product_id,
                        record.location_name,
                        record.stock_level,
                        record.sales_volume,
                        ratio,
                        config.restock_ratio,
                    ),
                })
            })
            .collect()
    }
}
