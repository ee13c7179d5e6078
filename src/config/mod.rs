//! Configuration module for the ticker-scope application.

pub mod api;
pub mod columns;

mod debug; // Private: files use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod visibility;

// Re-export commonly used items
pub use api::{ANALYTICS_API, ApiClientConfig};
pub use columns::{COLUMN_DEFINITIONS, CellFormat, ColumnDef, column_definitions};
pub use persistence::{APP_STATE_PATH, PERSISTENCE};
pub use visibility::{ConfigError, VisibilityRules};
