//! Analytics service configuration constants and types.

/// Runtime settings for the HTTP analytics client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: ANALYTICS_API.base_url.to_string(),
            timeout_ms: ANALYTICS_API.timeout_ms,
        }
    }
}

/// Endpoint paths, relative to the base URL
pub struct Endpoints {
    /// All categories for a date
    pub many_tickers: &'static str,
    /// One record for (date, ticker)
    pub one_ticker: &'static str,
    /// Dates with analytics available
    pub dates: &'static str,
}

/// The Master Analytics API Configuration Struct
pub struct AnalyticsApiConfig {
    pub base_url: &'static str,
    pub endpoints: Endpoints,
    pub timeout_ms: u64,
    pub user_agent: &'static str,
    /// Longest ticker symbol the search box accepts
    pub max_ticker_len: usize,
}

pub const ANALYTICS_API: AnalyticsApiConfig = AnalyticsApiConfig {
    base_url: "http://localhost:8000/api",
    endpoints: Endpoints {
        many_tickers: "analytics",
        one_ticker: "analytics/ticker",
        dates: "dates",
    },
    timeout_ms: 10_000,
    user_agent: concat!("ticker-scope/", env!("CARGO_PKG_VERSION")),
    max_ticker_len: 5,
};
