use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{DatasetByCategory, TickerRecord};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("no analytics available for {0}")]
    DateUnavailable(String),

    #[error("no analytics for {ticker} on {date}")]
    TickerUnavailable { date: String, ticker: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Where analytics come from. Dates are canonical `YYYY-MM-DD` strings.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;

    /// `Ok(None)` means the ticker has no record for that date. It is not a transport error.
    async fn fetch_one_record(
        &self,
        date: &str,
        ticker: &str,
    ) -> Result<Option<TickerRecord>, FetchError>;

    async fn fetch_many(&self, date: &str) -> Result<DatasetByCategory, FetchError>;

    async fn available_dates(&self) -> Result<Vec<NaiveDate>, FetchError>;

    /// Record for a pinned ticker. Unlike a search, a missing record is an error here.
    async fn fetch_one_ticker(&self, date: &str, ticker: &str) -> Result<TickerRecord, FetchError> {
        self.fetch_one_record(date, ticker)
            .await?
            .ok_or_else(|| FetchError::TickerUnavailable {
                date: date.to_string(),
                ticker: ticker.to_string(),
            })
    }
}

/// What a date change asks the source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFetchPlan {
    pub generation: u64,
    pub date: String,
    pub pinned_ticker: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DateFetchResult {
    pub generation: u64,
    pub many: Result<DatasetByCategory, FetchError>,
    pub one_ticker: Option<Result<TickerRecord, FetchError>>,
}

/// Runs the many-tickers fetch and, when a ticker is pinned, the one-ticker
/// fetch concurrently.
pub async fn fetch_for_date(source: &dyn AnalyticsSource, plan: &DateFetchPlan) -> DateFetchResult {
    let many = source.fetch_many(&plan.date);
    let (many, one_ticker) = match plan.pinned_ticker.as_deref() {
        Some(ticker) => {
            let (many, one) =
                futures::future::join(many, source.fetch_one_ticker(&plan.date, ticker)).await;
            (many, Some(one))
        }
        None => (many.await, None),
    };

    DateFetchResult {
        generation: plan.generation,
        many,
        one_ticker,
    }
}
