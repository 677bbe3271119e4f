use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Metric types
// ---------------------------------------------------------------------------

/// The fixed set of scalar KPIs computed over a (possibly filtered) record set.
///
/// Recomputed from scratch on every filter change; an empty record set yields
/// the all-zero bundle rather than an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsBundle {
    /// Sum of `sales_volume` over all records.
    pub total_sales: u64,
    /// `total_sales` divided by the number of distinct days spanned by the
    /// selected date range. Zero when the range spans zero days.
    pub average_daily_sales: f64,
    /// `total_sales` divided by the summed `stock_level`. Zero when total
    /// stock is zero.
    pub stock_turnover_ratio: f64,
    /// Records whose `stock_level` sits below the configured low-stock
    /// threshold.
    pub low_stock_count: usize,
}

// ---------------------------------------------------------------------------
// Insight types
// ---------------------------------------------------------------------------

/// A group key (category or location) with its summed sales volume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total_sales: u64,
}

/// Sales on a single restock date, for time-series charting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: chrono::NaiveDate,
    pub total_sales: u64,
}

/// Which way sales volume moved between the two halves of the selected range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TrendLabel {
    Rising,
    Falling,
    Flat,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendLabel::Rising => write!(f, "\u{2191} Rising"),
            TrendLabel::Falling => write!(f, "\u{2193} Falling"),
            TrendLabel::Flat => write!(f, "\u{2192} Flat"),
        }
    }
}

/// Qualitative statements derived from grouped aggregates.
///
/// All fields `None` is the "no data" sentinel for an empty record set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SalesInsights {
    /// Trend of sales volume across the selected date range.
    pub trend: Option<TrendLabel>,
    /// Highest-selling category and its sales figure.
    pub top_category: Option<GroupTotal>,
    /// Highest-selling location and its sales figure.
    pub top_location: Option<GroupTotal>,
}

impl SalesInsights {
    /// The sentinel returned when no records match the active filter.
    pub fn no_data() -> Self {
        Self::default()
    }

    pub fn is_no_data(&self) -> bool {
        self.trend.is_none() && self.top_category.is_none() && self.top_location.is_none()
    }
}

// ---------------------------------------------------------------------------
// Recommendation types
// ---------------------------------------------------------------------------

/// How urgent a recommendation is. Ordering is ascending: `Advisory` sorts
/// below `Warning`, which sorts below `Critical`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Advisory,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Advisory => write!(f, "ADVISORY"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// The kind of action a recommendation proposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AdviceKind {
    Restock,
    IncreaseAllocation,
    ReduceStock,
}

impl fmt::Display for AdviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdviceKind::Restock => write!(f, "Restock"),
            AdviceKind::IncreaseAllocation => write!(f, "Increase Allocation"),
            AdviceKind::ReduceStock => write!(f, "Reduce Stock"),
        }
    }
}

/// A single action suggestion emitted by a threshold rule.
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub action: AdviceKind,
    /// Product ID for per-product rules, location name for per-location rules.
    pub subject: String,
    /// Location context for per-product rules.
    pub location: Option<String>,
    /// Declared priority of the rule that emitted this (lower runs earlier
    /// in the ordering among equal severities).
    pub priority: u8,
    pub message: String,
}
