use chrono::NaiveDate;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Category;
use crate::models::{GridRow, rows_for};
use crate::ui::ui_panels::{PagingEvent, SearchEvent};
use crate::utils::time_utils::local_midnight;

use super::app::TickerScopeApp;

impl TickerScopeApp {
    pub(super) fn handle_date_selected(&mut self, day: NaiveDate) {
        let Some(midnight) = local_midnight(day) else {
            log::warn!("Cannot represent local midnight of {}", day);
            return;
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("[date] Selected {}", day);
        }

        self.prefs.selected_date = Some(day.to_string());
        let plan = self.store.select_date(midnight);
        self.search.on_fetch_started();
        self.start_date_fetch(plan);
    }

    pub(super) fn step_selected_date(&mut self, days: i64) {
        let Some(current) = self.store.selected_date().map(|d| d.date_naive()) else {
            return;
        };
        let next = crate::utils::time_utils::step_day(current, days);
        if next != current {
            self.handle_date_selected(next);
        }
    }

    pub(super) fn handle_category_changed(&mut self, category: Category) {
        if !self.store.set_category(category) {
            return;
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("[category] Switched to {}", category.key());
        }

        self.prefs.category = category;
        self.refresh_columns();
        self.pager.reset();
    }

    pub(super) fn handle_search_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::InputChanged(text) => {
                self.search.on_input_changed(&text);
                // The response would be stale anyway
                self.lookup_promise = None;
            }
            SearchEvent::Submit => {
                if let Ok(request) = self.search.submit(self.store.selected_date()) {
                    self.start_lookup(request);
                }
            }
            SearchEvent::Clear => {
                self.lookup_promise = None;
                self.search.clear(&mut self.store);
                self.pager.reset();
            }
            SearchEvent::Pin(ticker) => self.pin_ticker(&ticker),
        }
    }

    pub(super) fn pin_ticker(&mut self, ticker: &str) {
        self.store.pin_ticker(ticker);
        self.prefs.pinned_ticker = self.store.pinned_ticker().map(str::to_string);
        if let Some(plan) = self.store.refresh() {
            self.search.on_fetch_started();
            self.start_date_fetch(plan);
        }
    }

    pub(super) fn unpin_ticker(&mut self) {
        self.store.unpin_ticker();
        self.prefs.pinned_ticker = None;
        self.search.on_dataset_refreshed();
        self.pager.reset();
    }

    pub(super) fn handle_paging_event(&mut self, event: PagingEvent, total_rows: usize) {
        match event {
            PagingEvent::RowsPerPage(rows) => {
                self.pager.set_rows_per_page(rows);
                self.prefs.rows_per_page = self.pager.rows_per_page();
            }
            PagingEvent::Prev => self.pager.prev(total_rows),
            PagingEvent::Next => self.pager.next(total_rows),
        }
    }

    /// Rows of the displayed dataset for the selected category.
    pub(super) fn table_rows(&self) -> Vec<GridRow> {
        self.store
            .current_data()
            .map(|dataset| rows_for(dataset, self.store.category(), self.columns.columns()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FetchError;
    use crate::data::source::tests::MockSource;
    use crate::domain::{SearchError, SearchPhase};
    use crate::models::DatasetByCategory;
    use crate::models::ticker_record::tests::sample_record;
    use crate::ui::app::tests::test_app;
    use eframe::egui;
    use tokio::runtime::Runtime;

    const DAY: &str = "2023-03-01";

    fn dataset() -> DatasetByCategory {
        DatasetByCategory {
            by_volume: (0..12)
                .map(|i| sample_record(&format!("T{}", i), i as f64))
                .chain(std::iter::once(sample_record("AAPL", 99.0)))
                .collect(),
            ..Default::default()
        }
    }

    /// Waits for every promise in flight and applies the results.
    fn settle(app: &mut TickerScopeApp) {
        let ctx = egui::Context::default();
        for _ in 0..4 {
            if let Some(p) = &app.dates_promise {
                p.block_until_ready();
            }
            app.poll_dates_fetch(&ctx);
            if let Some(p) = &app.date_fetch_promise {
                p.block_until_ready();
            }
            app.poll_date_fetch(&ctx);
            if let Some(p) = &app.lookup_promise {
                p.block_until_ready();
            }
            app.poll_lookup(&ctx);
        }
    }

    fn loaded_app(runtime: &Runtime, source: MockSource) -> TickerScopeApp {
        let mut app = test_app(source, runtime);
        app.handle_category_changed(Category::ByVolume);
        app.start_dates_fetch();
        settle(&mut app);
        app
    }

    #[test]
    fn start_up_selects_newest_date_and_loads_it() {
        let runtime = Runtime::new().unwrap();
        let app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));

        assert_eq!(app.prefs.selected_date.as_deref(), Some(DAY));
        assert!(app.store.is_ready());
        assert_eq!(app.table_rows().len(), 13);
        assert_eq!(app.pager.range(13), 0..10);
    }

    #[test]
    fn search_then_clear_restores_full_table() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));

        app.handle_search_event(SearchEvent::InputChanged("aapl".to_string()));
        app.handle_search_event(SearchEvent::Submit);
        settle(&mut app);

        assert_eq!(app.search.phase(), &SearchPhase::Searched);
        let rows = app.table_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0], "AAPL");

        app.handle_search_event(SearchEvent::Clear);
        assert_eq!(app.search.phase(), &SearchPhase::Idle);
        assert_eq!(app.table_rows().len(), 13);
    }

    #[test]
    fn date_arriving_after_lookup_shows_full_table() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));
        let ctx = egui::Context::default();

        app.handle_date_selected(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        app.handle_search_event(SearchEvent::InputChanged("aapl".to_string()));
        app.handle_search_event(SearchEvent::Submit);

        if let Some(p) = &app.lookup_promise {
            p.block_until_ready();
        }
        app.poll_lookup(&ctx);
        assert_eq!(app.search.phase(), &SearchPhase::Searched);
        assert_eq!(app.table_rows().len(), 1);

        if let Some(p) = &app.date_fetch_promise {
            p.block_until_ready();
        }
        app.poll_date_fetch(&ctx);
        assert_eq!(app.search.phase(), &SearchPhase::Editing);
        assert_eq!(app.table_rows().len(), 13);
    }

    #[test]
    fn clear_while_pinned_keeps_one_row() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));
        app.pin_ticker("T3");
        settle(&mut app);

        app.handle_search_event(SearchEvent::InputChanged("aapl".to_string()));
        app.handle_search_event(SearchEvent::Submit);
        settle(&mut app);
        assert_eq!(app.table_rows()[0].cells[0], "AAPL");

        app.handle_search_event(SearchEvent::Clear);
        let rows = app.table_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0], "T3");
    }

    #[test]
    fn unknown_ticker_keeps_table_and_shows_help() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));

        app.handle_search_event(SearchEvent::InputChanged("ZZZ".to_string()));
        app.handle_search_event(SearchEvent::Submit);
        settle(&mut app);

        assert_eq!(app.search.phase(), &SearchPhase::Error(SearchError::NotFound));
        assert_eq!(app.search.state().help_text, "Incorrect input ticker symbol");
        assert_eq!(app.table_rows().len(), 13);
    }

    #[test]
    fn typing_after_submit_drops_the_lookup() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));

        app.handle_search_event(SearchEvent::InputChanged("AAPL".to_string()));
        app.handle_search_event(SearchEvent::Submit);
        app.handle_search_event(SearchEvent::InputChanged("MS".to_string()));
        settle(&mut app);

        assert_eq!(app.search.phase(), &SearchPhase::Editing);
        assert_eq!(app.table_rows().len(), 13);
    }

    #[test]
    fn pinning_shows_one_row_across_refreshes() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));

        app.pin_ticker("aapl");
        settle(&mut app);
        assert_eq!(app.prefs.pinned_ticker.as_deref(), Some("AAPL"));
        assert_eq!(app.table_rows().len(), 1);

        app.unpin_ticker();
        assert_eq!(app.prefs.pinned_ticker, None);
        assert_eq!(app.table_rows().len(), 13);
    }

    #[test]
    fn failed_date_keeps_previous_rows() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));

        app.step_selected_date(1);
        settle(&mut app);

        assert_eq!(app.prefs.selected_date.as_deref(), Some("2023-03-02"));
        assert!(matches!(app.store.last_error(), Some(FetchError::DateUnavailable(_))));
        assert_eq!(app.table_rows().len(), 13);
    }

    #[test]
    fn category_and_paging_changes_reset_the_page() {
        let runtime = Runtime::new().unwrap();
        let mut app = loaded_app(&runtime, MockSource::with_dataset(DAY, dataset()));

        app.handle_paging_event(PagingEvent::RowsPerPage(5), 13);
        app.handle_paging_event(PagingEvent::Next, 13);
        assert_eq!(app.pager.range(13), 5..10);
        assert_eq!(app.prefs.rows_per_page, 5);

        app.handle_category_changed(Category::ByOneDayAvgMf);
        assert_eq!(app.pager.page(13), 0);
        assert_eq!(app.prefs.category, Category::ByOneDayAvgMf);
        assert!(app.table_rows().is_empty());
    }
}
