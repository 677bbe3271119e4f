use std::collections::BTreeMap;

use crate::config::AnalyticsConfig;
use crate::loader::InventoryRecord;
use crate::recommendations::RecommendationRule;
use crate::types::{AdviceKind, Recommendation, Severity};

/// Flags locations whose aggregate turnover (summed sales over summed stock)
/// exceeds the configured high-water mark: the location sells faster than its
/// allocation supports.
///
/// A location holding zero stock while recording sales is treated as
/// exceeding any threshold.
pub struct AllocationRule;

impl RecommendationRule for AllocationRule {
    fn priority(&self) -> u8 {
        2
    }

    fn evaluate(
        &self,
        records: &[InventoryRecord],
        config: &AnalyticsConfig,
    ) -> Vec<Recommendation> {
        let mut per_location: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for record in records {
            let entry = per_location.entry(record.location_name.as_str()).or_insert((0, 0));
            entry.0 += record.sales_volume as u64;
            entry.1 += record.stock_level as u64;
        }

        per_location
            .into_iter()
            .filter_map(|(location, (sales, stock))| {
                let message = if stock == 0 {
                    if sales == 0 {
                        return None;
                    }
                    format!(
                        "Increase allocation at {}: {} units sold with no stock remaining",
                        location, sales,
                    )
                } else {
                    let turnover = sales as f64 / stock as f64;
                    if turnover <= config.high_turnover_ratio {
                        return None;
                    }
                    format!(
                        "Increase allocation at {}: turnover {:.2} exceeds {:.2}",
                        location, turnover, config.high_turnover_ratio,
                    )
                };
                Some(Recommendation {
                    severity: Severity::Warning,
                    action: AdviceKind::IncreaseAllocation,
                    subject: location.to_string(),
                    location: None,
                    priority: self.priority(),
                    message,
                })
            })
            .collect()
    }
}
