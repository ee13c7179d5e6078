#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{AnalyticsSnapshot, AnalyticsSource, AnalyticsStore, HttpAnalyticsSource, SnapshotSource};
pub use domain::{Category, ColumnVisibility, SearchController};
pub use models::{DatasetByCategory, TickerRecord};
pub use ui::{AppContext, TickerScopeApp};
pub use utils::app_time;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
// CLI argument parsing
use clap::Parser;

use crate::config::{ApiClientConfig, ColumnDef, VisibilityRules, column_definitions};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the analytics API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Serve analytics from a local snapshot file instead of the API
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// JSON file mapping each category to its visible fields
    #[arg(long)]
    pub visibility_rules: Option<PathBuf>,

    /// Show only this ticker for every date
    #[arg(long)]
    pub pin_ticker: Option<String>,

    /// HTTP request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl Cli {
    pub fn api_config(&self) -> ApiClientConfig {
        let defaults = ApiClientConfig::default();
        ApiClientConfig {
            base_url: self.api_url.clone().unwrap_or(defaults.base_url),
            timeout_ms: self.timeout_ms.unwrap_or(defaults.timeout_ms),
        }
    }
}

/// Picks the analytics source named on the command line.
pub async fn build_source(args: &Cli) -> Result<Arc<dyn AnalyticsSource>> {
    match &args.snapshot {
        Some(path) => Ok(Arc::new(SnapshotSource::load(path.clone()).await?)),
        None => Ok(Arc::new(HttpAnalyticsSource::new(&args.api_config())?)),
    }
}

/// Loads and validates the visibility rules. A broken rules file is logged
/// and replaced by the built-in table so the app still starts.
pub fn load_visibility_rules(path: Option<&Path>, columns: &[ColumnDef]) -> VisibilityRules {
    let loaded = match path {
        Some(path) => VisibilityRules::load_from_path(path),
        None => Ok(VisibilityRules::default()),
    };

    match loaded.and_then(|rules| rules.validate(columns).map(|_| rules)) {
        Ok(rules) => rules,
        Err(e) => {
            log::error!("Invalid visibility rules, using the built-in table: {}", e);
            VisibilityRules::default()
        }
    }
}

/// Main application entry point - creates the GUI app
pub fn run_app(
    cc: &eframe::CreationContext,
    source: Arc<dyn AnalyticsSource>,
    runtime: tokio::runtime::Handle,
    args: &Cli,
) -> Box<dyn eframe::App> {
    let columns = column_definitions();
    let rules = load_visibility_rules(args.visibility_rules.as_deref(), &columns);

    let app = TickerScopeApp::new(
        cc,
        AppContext {
            source,
            runtime,
            columns,
            rules,
            pin_ticker: args.pin_ticker.clone(),
        },
    );
    Box::new(app)
}
