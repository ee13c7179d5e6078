// Analytics records and the shapes the table consumes

pub mod dataset;
pub mod grid;
pub mod ticker_record;

// Re-export key types for convenience
pub use dataset::DatasetByCategory;
pub use grid::{GridRow, rows_for};
pub use ticker_record::{IndicatorValue, TickerRecord};
