//! Threshold-rule recommendation engine.
//!
//! Each rule is an independent component evaluated over the full record set
//! (never mutating it), in the order the engine declares them. The combined
//! output is ordered by descending severity, then the rule's declared
//! priority, then subject name, so equal inputs always produce the same
//! sequence.

use crate::config::AnalyticsConfig;
use crate::loader::InventoryRecord;
use crate::rules::allocation::AllocationRule;
use crate::rules::restock::RestockRule;
use crate::rules::slow_mover::SlowMoverRule;
use crate::types::Recommendation;

/// A single threshold rule.
///
/// Rules are pure: they read the record set and the config and emit zero or
/// more recommendations.
pub trait RecommendationRule: Send + Sync {
    /// Decide if this rule should run for the given record set.
    fn enable(&self, _records: &[InventoryRecord]) -> bool {
        true
    }

    /// Declared priority: among equal severities, lower sorts first.
    fn priority(&self) -> u8;

    /// Evaluate the rule over the full record set.
    fn evaluate(
        &self,
        records: &[InventoryRecord],
        config: &AnalyticsConfig,
    ) -> Vec<Recommendation>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// The fixed rule set, in declared order.
pub fn default_rules() -> Vec<Box<dyn RecommendationRule>> {
    vec![
        Box::new(RestockRule),
        Box::new(AllocationRule),
        Box::new(SlowMoverRule),
    ]
}

/// Run every enabled rule and order the combined output deterministically.
///
/// A record set with no qualifying records yields an empty sequence.
pub fn generate_recommendations(
    records: &[InventoryRecord],
    config: &AnalyticsConfig,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    for rule in default_rules() {
        if !rule.enable(records) {
            continue;
        }
        let emitted = rule.evaluate(records, config);
        log::debug!("rule {} emitted {} recommendation(s)", rule.name(), emitted.len());
        recommendations.extend(emitted);
    }

    recommendations.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then(a.priority.cmp(&b.priority))
            .then(a.subject.cmp(&b.subject))
            .then(a.location.cmp(&b.location))
    });
    recommendations
}

/// Extract a short type name from the full module path.
fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
