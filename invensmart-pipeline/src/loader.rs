//! CSV inventory record loader.
//!
//! Parses hyperlocal inventory CSV files into `InventoryRecord` structs.
//! Expected CSV columns (order not significant):
//!   Product_ID, Category, Location_Name, Stock_Level, Sales_Volume,
//!   Last_Restock_Date, Latitude, Longitude
//!
//! Dates use a single documented format: ISO-8601 calendar dates
//! (`YYYY-MM-DD`). Rows that fail to convert are skipped and reported, not
//! fatal; a header missing a required column fails the whole load.

use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;

use crate::error::{LoadError, MalformedRecord};

/// Column names the header row must contain.
const REQUIRED_COLUMNS: [&str; 8] = [
    "Product_ID",
    "Category",
    "Location_Name",
    "Stock_Level",
    "Sales_Volume",
    "Last_Restock_Date",
    "Latitude",
    "Longitude",
];

/// One row of hyperlocal inventory data. Immutable once loaded.
///
/// `stock_level` and `sales_volume` are unsigned so negative counts are
/// rejected at parse time rather than checked downstream.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Location_Name")]
    pub location_name: String,
    #[serde(rename = "Stock_Level")]
    pub stock_level: u32,
    #[serde(rename = "Sales_Volume")]
    pub sales_volume: u32,
    #[serde(rename = "Last_Restock_Date", deserialize_with = "deserialize_date")]
    pub last_restock_date: NaiveDate,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl InventoryRecord {
    /// Stock-to-sales ratio, or `None` when there are no sales to compare
    /// against.
    pub fn stock_to_sales(&self) -> Option<f64> {
        if self.sales_volume == 0 {
            None
        } else {
            Some(self.stock_level as f64 / self.sales_volume as f64)
        }
    }
}

/// Result of a load: the usable records plus every row that was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<InventoryRecord>,
    pub skipped: Vec<MalformedRecord>,
}

/// Load inventory records from a CSV reader.
///
/// Malformed rows are skipped with a count (and a `warn` log line each); the
/// load only fails when the header is unusable or the underlying reader
/// errors.
pub fn load_records<R: Read>(reader: R) -> Result<LoadReport, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }

    let mut report = LoadReport::default();
    for (idx, result) in csv_reader.deserialize().enumerate() {
        // +2: 1-based numbering plus the header line.
        let line = idx as u64 + 2;
        let record: InventoryRecord = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("skipping malformed row at line {}: {}", line, e);
                report.skipped.push(MalformedRecord {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if let Err(reason) = validate_coordinates(&record) {
            log::warn!("skipping row at line {}: {}", line, reason);
            report.skipped.push(MalformedRecord { line, reason });
            continue;
        }
        report.records.push(record);
    }

    Ok(report)
}

/// Load inventory records from a CSV file path.
pub fn load_records_file(path: &str) -> Result<LoadReport, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    load_records(file)
}

/// Reject coordinates outside the valid geographic range (NaN included).
fn validate_coordinates(record: &InventoryRecord) -> Result<(), String> {
    if !(-90.0..=90.0).contains(&record.latitude) {
        return Err(format!("latitude {} out of range", record.latitude));
    }
    if !(-180.0..=180.0).contains(&record.longitude) {
        return Err(format!("longitude {} out of range", record.longitude));
    }
    Ok(())
}

/// Strict ISO-8601 calendar date deserializer (`YYYY-MM-DD`).
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        serde::de::Error::custom(format!("expected YYYY-MM-DD date, got '{}'", s))
    })
}
