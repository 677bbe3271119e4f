use std::collections::BTreeSet;
use std::env;
use std::process;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use invensmart_pipeline::aggregate::{sales_by_category, sales_by_date, sales_by_location};
use invensmart_pipeline::config::{AnalyticsConfig, SyntheticConfig};
use invensmart_pipeline::filter::{DateRange, RecordFilter};
use invensmart_pipeline::loader::{load_records_file, InventoryRecord};
use invensmart_pipeline::session::{DashboardSession, DashboardSnapshot};
use invensmart_pipeline::synthetic::generate_records;
use invensmart_pipeline::types::{DailySales, GroupTotal, MetricsBundle, Recommendation, SalesInsights};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DashboardJson {
    generated_at: String,
    filter: FilterJson,
    records_loaded: usize,
    rows_skipped: usize,
    records_matching: usize,
    compute_ms: u128,
    metrics: MetricsBundle,
    insights: SalesInsights,
    recommendations: Vec<Recommendation>,
    charts: ChartsJson,
    map_markers: Vec<MapMarkerJson>,
}

#[derive(Serialize)]
struct FilterJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<String>,
}

/// Grouped sums the chart layer plots directly.
#[derive(Serialize)]
struct ChartsJson {
    sales_by_category: Vec<GroupTotal>,
    sales_by_location: Vec<GroupTotal>,
    sales_by_date: Vec<DailySales>,
}

/// One map pin per filtered record, tooltip pre-assembled from its fields.
#[derive(Serialize)]
struct MapMarkerJson {
    product_id: String,
    location_name: String,
    latitude: f64,
    longitude: f64,
    stock_level: u32,
    sales_volume: u32,
    tooltip: String,
}

fn build_markers(records: &[InventoryRecord]) -> Vec<MapMarkerJson> {
    records
        .iter()
        .map(|r| MapMarkerJson {
            product_id: r.product_id.clone(),
            location_name: r.location_name.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
            stock_level: r.stock_level,
            sales_volume: r.sales_volume,
            tooltip: format!(
                "{} ({}) at {}: {} in stock, {} sold",
                r.product_id, r.category, r.location_name, r.stock_level, r.sales_volume,
            ),
        })
        .collect()
}

fn build_json(
    snapshot: &DashboardSnapshot,
    filter: &RecordFilter,
    records_loaded: usize,
    rows_skipped: usize,
    compute_ms: u128,
) -> DashboardJson {
    DashboardJson {
        generated_at: Utc::now().to_rfc3339(),
        filter: FilterJson {
            from: filter.date_range.map(|r| r.start),
            to: filter.date_range.map(|r| r.end),
            categories: filter
                .categories
                .as_ref()
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default(),
        },
        records_loaded,
        rows_skipped,
        records_matching: snapshot.filtered.len(),
        compute_ms,
        metrics: snapshot.metrics.clone(),
        insights: snapshot.insights.clone(),
        recommendations: snapshot.recommendations.clone(),
        charts: ChartsJson {
            sales_by_category: sales_by_category(&snapshot.filtered),
            sales_by_location: sales_by_location(&snapshot.filtered),
            sales_by_date: sales_by_date(&snapshot.filtered),
        },
        map_markers: build_markers(&snapshot.filtered),
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(
    snapshot: &DashboardSnapshot,
    records_loaded: usize,
    rows_skipped: usize,
    load_ms: u128,
    compute_ms: u128,
) {
    println!();
    println!("  \u{2554}{}\u{2557}", "\u{2550}".repeat(58));
    println!("  \u{2551}          INVENSMART \u{2014} Inventory Analytics Digest         \u{2551}");
    println!("  \u{255a}{}\u{255d}", "\u{2550}".repeat(58));
    println!();
    println!(
        "  {} records loaded  \u{00b7}  {} rows skipped  \u{00b7}  {} matching filter",
        records_loaded,
        rows_skipped,
        snapshot.filtered.len()
    );
    println!();

    if snapshot.filtered.is_empty() {
        println!("  No data available for the selected filters.");
        println!();
        return;
    }

    println!("  Key Performance Indicators");
    println!("  \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}");
    println!("  Total sales          {}", snapshot.metrics.total_sales);
    println!("  Avg daily sales      {:.2}", snapshot.metrics.average_daily_sales);
    println!("  Stock turnover       {:.2}x", snapshot.metrics.stock_turnover_ratio);
    println!("  Low-stock items      {}", snapshot.metrics.low_stock_count);
    println!();

    println!("  Insights");
    println!("  \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}");
    if let Some(trend) = snapshot.insights.trend {
        println!("  Sales trend          {}", trend);
    }
    if let Some(top) = &snapshot.insights.top_category {
        println!("  Top category         {} ({} sold)", top.key, top.total_sales);
    }
    if let Some(top) = &snapshot.insights.top_location {
        println!("  Top location         {} ({} sold)", top.key, top.total_sales);
    }
    println!();

    println!("  Recommendations");
    println!("  \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}");
    if snapshot.recommendations.is_empty() {
        println!("  No recommendations for the current selection.");
    }
    for recommendation in &snapshot.recommendations {
        println!(
            "  [{}] {}",
            recommendation.severity, recommendation.message
        );
    }
    println!();
    println!("  load {} ms \u{00b7} compute {} ms", load_ms, compute_ms);
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: invensmart-server <inventory.csv> [options]");
    eprintln!("       invensmart-server --generate <N> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --from YYYY-MM-DD     Start of the date-range filter (inclusive)");
    eprintln!("  --to YYYY-MM-DD       End of the date-range filter (inclusive)");
    eprintln!("  --categories a,b,c    Comma-separated category filter");
    eprintln!("  --seed N              RNG seed for --generate (default: 42)");
    eprintln!("  --low-stock N         Low-stock threshold override");
    eprintln!("  --json                Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  invensmart-server fixtures/sample_inventory.csv --from 2024-01-01 --to 2024-01-31 --json");
    eprintln!("  invensmart-server --generate 500 --categories Snacks,Dairy");
    process::exit(1);
}

fn parse_date_arg(value: &str, flag: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|_| {
        eprintln!("Error: {} expects a YYYY-MM-DD date, got '{}'", flag, value);
        process::exit(1);
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let mut csv_path: Option<String> = None;
    let mut generate_count: Option<usize> = None;
    let mut from: Option<NaiveDate> = None;
    let mut to: Option<NaiveDate> = None;
    let mut categories: Option<BTreeSet<String>> = None;
    let mut seed: u64 = 42;
    let mut low_stock: Option<u32> = None;
    let mut json_output = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--generate" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                generate_count = Some(value.parse().unwrap_or_else(|_| {
                    eprintln!("Error: --generate requires a positive integer");
                    process::exit(1);
                }));
                i += 2;
            }
            "--from" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                from = Some(parse_date_arg(value, "--from"));
                i += 2;
            }
            "--to" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                to = Some(parse_date_arg(value, "--to"));
                i += 2;
            }
            "--categories" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                categories = Some(
                    value
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                );
                i += 2;
            }
            "--seed" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                seed = value.parse().unwrap_or_else(|_| {
                    eprintln!("Error: --seed requires an integer");
                    process::exit(1);
                });
                i += 2;
            }
            "--low-stock" => {
                let value = args.get(i + 1).unwrap_or_else(|| usage());
                low_stock = Some(value.parse().unwrap_or_else(|_| {
                    eprintln!("Error: --low-stock requires a non-negative integer");
                    process::exit(1);
                }));
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other if csv_path.is_none() && !other.starts_with("--") => {
                csv_path = Some(other.to_string());
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    // Load from file, or generate a deterministic synthetic set.
    let load_start = Instant::now();
    let (records, rows_skipped) = match (&csv_path, generate_count) {
        (Some(path), None) => {
            let report = match load_records_file(path) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Error loading CSV: {}", e);
                    process::exit(1);
                }
            };
            if !report.skipped.is_empty() {
                log::warn!("{} malformed row(s) skipped", report.skipped.len());
            }
            let skipped = report.skipped.len();
            (report.records, skipped)
        }
        (None, Some(count)) => {
            let synthetic = SyntheticConfig {
                record_count: count,
                ..SyntheticConfig::default()
            };
            (generate_records(&synthetic, seed), 0)
        }
        _ => usage(),
    };
    let load_ms = load_start.elapsed().as_millis();

    let mut config = AnalyticsConfig::default();
    if let Some(threshold) = low_stock {
        config.low_stock_threshold = threshold;
    }

    // A one-sided range borrows its missing bound from the data itself, so
    // the selected span stays meaningful for the daily average.
    let data_span = DateRange::covering(&records);
    let filter = RecordFilter {
        date_range: match (from, to) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            (Some(start), None) => {
                let end = data_span.map(|r| r.end).unwrap_or(start);
                Some(DateRange::new(start, end.max(start)))
            }
            (None, Some(end)) => {
                let start = data_span.map(|r| r.start).unwrap_or(end);
                Some(DateRange::new(start.min(end), end))
            }
            (None, None) => None,
        },
        categories,
    };

    let records_loaded = records.len();
    let session = DashboardSession::new(records, config);

    let compute_start = Instant::now();
    let snapshot = session.snapshot(&filter);
    let compute_ms = compute_start.elapsed().as_millis();

    if json_output {
        let json = build_json(&snapshot, &filter, records_loaded, rows_skipped, compute_ms);
        match serde_json::to_string_pretty(&json) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&snapshot, records_loaded, rows_skipped, load_ms, compute_ms);
    }
}
