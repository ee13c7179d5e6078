use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use ticker_scope::config::{ANALYTICS_API, ApiClientConfig};
use ticker_scope::{AnalyticsSnapshot, AnalyticsSource, HttpAnalyticsSource};

/// Builds an offline snapshot from the analytics API.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the analytics API
    #[arg(long, default_value = ANALYTICS_API.base_url)]
    api_url: String,

    /// Keep only the newest N dates
    #[arg(long, default_value_t = 5)]
    max_dates: usize,

    /// Output file (defaults to the standard snapshot location)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    build_demo_snapshot(Args::parse()).await
}

async fn build_demo_snapshot(args: Args) -> Result<()> {
    let source = HttpAnalyticsSource::new(&ApiClientConfig {
        base_url: args.api_url.clone(),
        timeout_ms: ANALYTICS_API.timeout_ms,
    })?;

    let mut dates = source
        .available_dates()
        .await
        .with_context(|| format!("Failed to list dates from {}", args.api_url))?;
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.truncate(args.max_dates);

    println!("Fetching {} dates from {}", dates.len(), args.api_url);

    let mut datasets = BTreeMap::new();
    for date in dates {
        let key = date.to_string();
        match source.fetch_many(&key).await {
            Ok(dataset) => {
                println!("  {}: {} records", key, dataset.total_records());
                datasets.insert(key, dataset);
            }
            Err(e) => log::warn!("Skipping {}: {}", key, e),
        }
    }

    let snapshot = AnalyticsSnapshot::new(datasets);
    let output_path = args.out.unwrap_or_else(AnalyticsSnapshot::default_path);
    snapshot.save_to_path(&output_path)?;

    println!(
        "✅ Snapshot written to {:?} with {} dates.",
        output_path,
        snapshot.datasets.len()
    );
    Ok(())
}
