//! InvenSmart analytics core.
//!
//! The computational pipeline behind a hyperlocal retail inventory
//! dashboard: load a CSV of inventory records (or generate a deterministic
//! synthetic set), apply a date-range/category filter, and derive
//!
//! - a [`types::MetricsBundle`] of scalar KPIs,
//! - [`types::SalesInsights`] (trend, top category, top location),
//! - an ordered sequence of [`types::Recommendation`]s from threshold rules.
//!
//! Everything is synchronous and pure: a [`session::DashboardSession`] holds
//! the record set for one session and recomputes the full snapshot on every
//! filter change. Presentation (charts, maps, layout) is an external
//! consumer of the returned data structures.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod insights;
pub mod loader;
pub mod metrics;
pub mod recommendations;
pub mod rules;
pub mod session;
pub mod synthetic;
pub mod types;

pub use config::{AnalyticsConfig, SyntheticConfig};
pub use error::{LoadError, MalformedRecord};
pub use filter::{DateRange, RecordFilter};
pub use loader::{load_records, load_records_file, InventoryRecord, LoadReport};
pub use session::{DashboardSession, DashboardSnapshot};
pub use types::{
    AdviceKind, MetricsBundle, Recommendation, SalesInsights, Severity, TrendLabel,
};
