// Analytics sources and the session store
pub mod http_source;
pub mod snapshot;
pub mod source;
pub mod store;

// Re-export commonly used types
pub use http_source::HttpAnalyticsSource;
pub use snapshot::{AnalyticsSnapshot, SnapshotSource};
pub use source::{AnalyticsSource, DateFetchPlan, DateFetchResult, FetchError, fetch_for_date};
pub use store::AnalyticsStore;
