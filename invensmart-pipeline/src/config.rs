//! Centralized analysis thresholds.
//!
//! Every cutoff that changes dashboard output lives here as an explicit,
//! documented field rather than a magic number inside a computation. Changing
//! a value here affects BOTH the metrics engine (`metrics.rs`) and the
//! recommendation rules (`rules/`).

use chrono::NaiveDate;

/// Stock level below which a record counts as a low-stock item.
///
/// Policy: a fixed unit constant, not a percentile of the observed
/// distribution. A fixed cutoff keeps the metric comparable across filter
/// changes; a percentile would silently move whenever the filter does.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Stock-to-sales ratio below which a product is flagged for restocking.
pub const DEFAULT_RESTOCK_RATIO: f64 = 0.2;

/// Aggregate location turnover (sales / stock) above which a location is
/// flagged for increased allocation.
pub const DEFAULT_HIGH_TURNOVER_RATIO: f64 = 2.0;

/// Relative difference between the two halves of the date range below which
/// the sales trend is labelled flat.
pub const DEFAULT_TREND_TOLERANCE: f64 = 0.05;

/// Tunable thresholds for the metrics engine, insight generator, and
/// recommendation rules.
#[derive(Clone, Debug)]
pub struct AnalyticsConfig {
    /// See [`DEFAULT_LOW_STOCK_THRESHOLD`].
    pub low_stock_threshold: u32,
    /// See [`DEFAULT_RESTOCK_RATIO`].
    pub restock_ratio: f64,
    /// See [`DEFAULT_HIGH_TURNOVER_RATIO`].
    pub high_turnover_ratio: f64,
    /// See [`DEFAULT_TREND_TOLERANCE`].
    pub trend_tolerance: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            restock_ratio: DEFAULT_RESTOCK_RATIO,
            high_turnover_ratio: DEFAULT_HIGH_TURNOVER_RATIO,
            trend_tolerance: DEFAULT_TREND_TOLERANCE,
        }
    }
}

/// Bounds for the deterministic synthetic record generator.
///
/// The generator draws uniformly within these bounds from a seeded RNG, so
/// the same seed and config always produce the same record set.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of records to generate.
    pub record_count: usize,
    /// Inclusive bounds for `stock_level`.
    pub stock_range: (u32, u32),
    /// Inclusive bounds for `sales_volume`.
    pub sales_range: (u32, u32),
    /// Restock dates fall within this many days before `anchor_date`.
    pub window_days: u32,
    /// The most recent possible restock date.
    pub anchor_date: NaiveDate,
    /// Maximum coordinate offset (degrees) applied around each location's
    /// base position, bounding the generated region.
    pub coordinate_jitter: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            record_count: 500,
            stock_range: (0, 500),
            sales_range: (0, 300),
            window_days: 60,
            // Fixed anchor keeps default output reproducible run to run.
            anchor_date: NaiveDate::from_ymd_opt(2024, 6, 30)
                .unwrap_or(NaiveDate::MIN),
            coordinate_jitter: 0.25,
        }
    }
}
