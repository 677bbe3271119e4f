//! Date-range and category filtering.
//!
//! Filtering never mutates the source record set; it produces a derived
//! owned view. An unsatisfiable filter (start after end, or an explicitly
//! empty category selection) is the "no matching data" state, not an error:
//! it yields an empty derived set.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::loader::InventoryRecord;

/// Inclusive calendar date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of distinct days spanned, inclusive. Zero for an inverted range.
    pub fn span_days(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        (self.end - self.start).num_days() + 1
    }

    /// The day that closes the first half of the range.
    pub fn midpoint(&self) -> NaiveDate {
        self.start + Duration::days((self.end - self.start).num_days() / 2)
    }

    /// The smallest range covering every restock date in `records`.
    pub fn covering(records: &[InventoryRecord]) -> Option<Self> {
        let start = records.iter().map(|r| r.last_restock_date).min()?;
        let end = records.iter().map(|r| r.last_restock_date).max()?;
        Some(Self { start, end })
    }
}

/// Constraints applied to the record set before any computation.
///
/// `None` fields are unconstrained; `Some` of an empty category set selects
/// nothing.
#[derive(Clone, Debug, Default)]
pub struct RecordFilter {
    pub date_range: Option<DateRange>,
    pub categories: Option<BTreeSet<String>>,
}

impl RecordFilter {
    /// An unconstrained filter: the derived view equals the source set.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// False when the constraints can never match a record.
    pub fn is_satisfiable(&self) -> bool {
        if let Some(range) = &self.date_range {
            if !range.is_valid() {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if categories.is_empty() {
                return false;
            }
        }
        true
    }

    fn matches(&self, record: &InventoryRecord) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(record.last_restock_date) {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.contains(&record.category) {
                return false;
            }
        }
        true
    }

    /// Produce the derived record set. The source is left untouched.
    pub fn apply(&self, records: &[InventoryRecord]) -> Vec<InventoryRecord> {
        if !self.is_satisfiable() {
            return Vec::new();
        }
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    /// The date range computations should treat as selected: the explicit
    /// range when present, otherwise the span of the records themselves.
    pub fn effective_range(&self, records: &[InventoryRecord]) -> Option<DateRange> {
        match self.date_range {
            Some(range) if range.is_valid() => Some(range),
            Some(_) => None,
            None => DateRange::covering(records),
        }
    }
}
