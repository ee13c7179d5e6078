// Domain types and view-state controllers
pub mod category;
pub mod column_visibility;
pub mod search;

// Re-export commonly used types
pub use category::Category;
pub use column_visibility::{ColumnVisibility, apply_visibility};
pub use search::{LookupRequest, SearchController, SearchError, SearchPhase, SearchState};
