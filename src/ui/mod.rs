// User interface components
pub mod app;
mod app_async;
mod app_state;
pub mod config;
pub mod paging;
pub mod styles;
pub mod ui_panels;
mod ui_render;
pub mod utils;

// Re-export main app
pub use app::{AppContext, TickerScopeApp, UiPreferences};
pub use config::{UI_CONFIG, UI_TEXT};
