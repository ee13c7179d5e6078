use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::{ANALYTICS_API, ApiClientConfig};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::source::{AnalyticsSource, FetchError};
use crate::models::{DatasetByCategory, TickerRecord};
use crate::utils::app_time::now;
use crate::utils::time_utils::parse_calendar_date;

/// Analytics service reached over HTTP.
pub struct HttpAnalyticsSource {
    client: Client,
    base_url: String,
}

impl HttpAnalyticsSource {
    pub fn new(config: &ApiClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(ANALYTICS_API.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GETs `path` and decodes the body. A 404 yields `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, FetchError> {
        let url = self.url(path);
        let started = now();

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_events {
            log::info!(
                "GET {} {:?} -> {} in {:?}",
                url,
                query,
                status,
                started.elapsed()
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = started;

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        // The service answers an unknown ticker with a literal `null`
        Ok(serde_json::from_str::<Option<T>>(&body)?)
    }
}

#[async_trait]
impl AnalyticsSource for HttpAnalyticsSource {
    fn signature(&self) -> &'static str {
        "Analytics API"
    }

    async fn fetch_one_record(
        &self,
        date: &str,
        ticker: &str,
    ) -> Result<Option<TickerRecord>, FetchError> {
        self.get_json(
            ANALYTICS_API.endpoints.one_ticker,
            &[("date", date), ("ticker", ticker)],
        )
        .await
    }

    async fn fetch_many(&self, date: &str) -> Result<DatasetByCategory, FetchError> {
        self.get_json(ANALYTICS_API.endpoints.many_tickers, &[("date", date)])
            .await?
            .ok_or_else(|| FetchError::DateUnavailable(date.to_string()))
    }

    async fn available_dates(&self) -> Result<Vec<NaiveDate>, FetchError> {
        let raw: Vec<String> = self
            .get_json(ANALYTICS_API.endpoints.dates, &[])
            .await?
            .unwrap_or_default();

        let dates: Vec<NaiveDate> = raw.iter().filter_map(|d| parse_calendar_date(d)).collect();
        if dates.len() < raw.len() {
            log::warn!(
                "Ignored {} unparseable dates from {}",
                raw.len() - dates.len(),
                self.signature()
            );
        }
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let source = HttpAnalyticsSource::new(&ApiClientConfig {
            base_url: "http://example.test/api/".to_string(),
            timeout_ms: 1_000,
        })
        .unwrap();

        assert_eq!(source.url("dates"), "http://example.test/api/dates");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let source = HttpAnalyticsSource::new(&ApiClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_ms: 500,
        })
        .unwrap();

        let result = source.fetch_one_record("2023-03-01", "AAPL").await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
