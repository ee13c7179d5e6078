use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PERSISTENCE;
use crate::data::source::{AnalyticsSource, FetchError};
use crate::models::{DatasetByCategory, TickerRecord};
use crate::utils::time_utils::parse_calendar_date;

/// Offline copy of the analytics service, keyed by `YYYY-MM-DD`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSnapshot {
    pub version: u32,
    pub created_at_ms: i64,
    pub datasets: BTreeMap<String, DatasetByCategory>,
}

impl AnalyticsSnapshot {
    pub fn new(datasets: BTreeMap<String, DatasetByCategory>) -> Self {
        Self {
            version: PERSISTENCE.snapshot.version,
            created_at_ms: Utc::now().timestamp_millis(),
            datasets,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open snapshot file: {:?}", path))?;
        let reader = BufReader::new(file);
        let snapshot: Self = serde_json::from_reader(reader)
            .context(format!("Failed to deserialize snapshot: {:?}", path))?;

        if snapshot.version != PERSISTENCE.snapshot.version {
            bail!(
                "Snapshot version mismatch: file v{} vs required v{}",
                snapshot.version,
                PERSISTENCE.snapshot.version
            );
        }
        if let Some(bad) = snapshot
            .datasets
            .keys()
            .find(|k| parse_calendar_date(k).is_none())
        {
            bail!("Snapshot key '{}' is not a YYYY-MM-DD date", bad);
        }
        Ok(snapshot)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self)
            .context(format!("Failed to serialize snapshot to: {}", path.display()))
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(PERSISTENCE.snapshot.directory).join(PERSISTENCE.snapshot.filename)
    }
}

/// Serves analytics from an in-memory snapshot.
#[derive(Clone)]
pub struct SnapshotSource {
    snapshot: Arc<AnalyticsSnapshot>,
}

impl SnapshotSource {
    pub fn new(snapshot: AnalyticsSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub async fn load(path: PathBuf) -> Result<Self> {
        let snapshot = tokio::task::spawn_blocking(move || AnalyticsSnapshot::load_from_path(&path))
            .await
            .context("Snapshot load task panicked")??;
        log::info!(
            "Loaded snapshot with {} dates",
            snapshot.datasets.len()
        );
        Ok(Self::new(snapshot))
    }
}

#[async_trait]
impl AnalyticsSource for SnapshotSource {
    fn signature(&self) -> &'static str {
        "Local Snapshot"
    }

    async fn fetch_one_record(
        &self,
        date: &str,
        ticker: &str,
    ) -> Result<Option<TickerRecord>, FetchError> {
        Ok(self
            .snapshot
            .datasets
            .get(date)
            .and_then(|dataset| dataset.find_ticker(ticker))
            .cloned())
    }

    async fn fetch_many(&self, date: &str) -> Result<DatasetByCategory, FetchError> {
        self.snapshot
            .datasets
            .get(date)
            .cloned()
            .ok_or_else(|| FetchError::DateUnavailable(date.to_string()))
    }

    async fn available_dates(&self) -> Result<Vec<NaiveDate>, FetchError> {
        Ok(self
            .snapshot
            .datasets
            .keys()
            .filter_map(|d| parse_calendar_date(d))
            .collect())
    }
}
