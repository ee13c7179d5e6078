use eframe::{Frame, egui};
use poll_promise::Promise;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::config::{ColumnDef, ConfigError, VisibilityRules};
use crate::data::{AnalyticsSource, AnalyticsStore, DateFetchResult};
use crate::domain::{Category, ColumnVisibility, SearchController};
use crate::ui::app_async::{DatesResult, LookupResult};
use crate::ui::config::UI_CONFIG;
use crate::ui::paging::TablePager;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// What survives a restart. Everything else is rebuilt from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    pub category: Category,
    pub rows_per_page: usize,
    /// `YYYY-MM-DD`
    pub selected_date: Option<String>,
    pub pinned_ticker: Option<String>,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            category: Category::default(),
            rows_per_page: UI_CONFIG.default_rows_per_page,
            selected_date: None,
            pinned_ticker: None,
        }
    }
}

/// Everything `run_app` hands over from `main`.
pub struct AppContext {
    pub source: Arc<dyn AnalyticsSource>,
    pub runtime: Handle,
    pub columns: Vec<ColumnDef>,
    pub rules: VisibilityRules,
    /// `--pin-ticker` wins over the persisted pin
    pub pin_ticker: Option<String>,
}

pub struct TickerScopeApp {
    pub(super) prefs: UiPreferences,

    pub(super) source: Arc<dyn AnalyticsSource>,
    pub(super) runtime: Handle,

    pub(super) store: AnalyticsStore,
    pub(super) search: SearchController,
    pub(super) columns: ColumnVisibility,
    pub(super) config_error: Option<ConfigError>,
    pub(super) pager: TablePager,

    pub(super) dates_promise: Option<Promise<DatesResult>>,
    pub(super) date_fetch_promise: Option<Promise<DateFetchResult>>,
    pub(super) lookup_promise: Option<Promise<LookupResult>>,

    pub(super) show_help: bool,
}

impl TickerScopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, context: AppContext) -> Self {
        let mut prefs = UiPreferences::default();

        // Attempt to load the persisted state
        if let Some(storage) = cc.storage {
            if let Some(value) = eframe::get_value::<UiPreferences>(storage, eframe::APP_KEY) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("Successfully loaded persisted state: {:?}", value);
                }
                prefs = value;
            } else {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("No persisted Ticker Scope state in storage. Creating anew.");
                }
            }
        }

        let mut app = Self::with_preferences(prefs, context);
        app.start_dates_fetch();
        app
    }

    /// Builds the app without touching eframe storage or starting any fetch.
    pub(super) fn with_preferences(mut prefs: UiPreferences, context: AppContext) -> Self {
        if let Some(ticker) = context.pin_ticker {
            prefs.pinned_ticker = Some(ticker.to_uppercase());
        }

        let store = AnalyticsStore::new(prefs.category, prefs.pinned_ticker.clone());
        let pager = TablePager::new(prefs.rows_per_page);
        prefs.rows_per_page = pager.rows_per_page();

        let mut app = Self {
            prefs,
            source: context.source,
            runtime: context.runtime,
            store,
            search: SearchController::new(),
            columns: ColumnVisibility::new(context.columns, context.rules),
            config_error: None,
            pager,
            dates_promise: None,
            date_fetch_promise: None,
            lookup_promise: None,
            show_help: false,
        };
        app.refresh_columns();
        app
    }

    pub(super) fn refresh_columns(&mut self) {
        let category = self.store.category();
        self.config_error = match self.columns.on_category_changed(category) {
            Ok(_) => None,
            Err(e) => {
                log::error!("Cannot show columns for {}: {}", category, e);
                Some(e)
            }
        };
    }

    pub(super) fn is_fetching(&self) -> bool {
        self.dates_promise.is_some() || self.date_fetch_promise.is_some()
    }

    pub(super) fn is_searching(&self) -> bool {
        self.lookup_promise.is_some()
    }
}

impl eframe::App for TickerScopeApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop outstanding promises so no worker reports into a dead app
        self.dates_promise = None;
        self.date_fetch_promise = None;
        self.lookup_promise = None;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_dates_fetch(ctx);
        self.poll_date_fetch(ctx);
        self.poll_lookup(ctx);

        self.handle_global_shortcuts(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
        if self.show_help {
            self.render_help_panel(ctx);
        }
    }
}
