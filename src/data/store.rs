use chrono::{DateTime, Local, NaiveDate};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::source::{DateFetchPlan, DateFetchResult, FetchError};
use crate::domain::Category;
use crate::models::DatasetByCategory;
use crate::utils::time_utils::normalize_selected_date;

/// Session-scoped application data shared by the table and the search box.
///
/// `full_data` is what the source last returned for the selected date;
/// `fetched_display` is what that fetch put on screen (the full data, or the
/// pinned record in one-ticker mode); `current_data` is what the table shows
/// (the fetched display or a search override). All are replaced wholesale,
/// never patched.
#[derive(Debug, Default)]
pub struct AnalyticsStore {
    full_data: Option<DatasetByCategory>,
    fetched_display: Option<DatasetByCategory>,
    current_data: Option<DatasetByCategory>,
    category: Category,
    selected_date: Option<DateTime<Local>>,
    available_dates: Vec<NaiveDate>,
    pinned_ticker: Option<String>,
    many_tickers_loaded: bool,
    current_loaded: bool,
    fetch_generation: u64,
    last_error: Option<FetchError>,
}

impl AnalyticsStore {
    pub fn new(category: Category, pinned_ticker: Option<String>) -> Self {
        Self {
            category,
            pinned_ticker: pinned_ticker.map(|t| t.to_uppercase()),
            ..Default::default()
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns true when the category actually changed.
    pub fn set_category(&mut self, category: Category) -> bool {
        if self.category == category {
            return false;
        }
        self.category = category;
        true
    }

    pub fn selected_date(&self) -> Option<&DateTime<Local>> {
        self.selected_date.as_ref()
    }

    /// Stores the date and starts a new fetch generation. Responses from older
    /// generations are ignored from now on.
    pub fn select_date(&mut self, date: DateTime<Local>) -> DateFetchPlan {
        self.selected_date = Some(date);
        self.many_tickers_loaded = false;
        self.current_loaded = false;
        self.fetch_generation += 1;

        DateFetchPlan {
            generation: self.fetch_generation,
            date: normalize_selected_date(&date),
            pinned_ticker: self.pinned_ticker.clone(),
        }
    }

    /// Re-issues the fetch for the current date, if there is one.
    pub fn refresh(&mut self) -> Option<DateFetchPlan> {
        let date = self.selected_date?;
        Some(self.select_date(date))
    }

    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    fn is_stale(&self, generation: u64) -> bool {
        let stale = generation != self.fetch_generation;
        #[cfg(debug_assertions)]
        if stale && DEBUG_FLAGS.print_stale_responses {
            log::info!(
                "Discarding analytics response from generation {} (current {})",
                generation,
                self.fetch_generation
            );
        }
        stale
    }

    /// Applies a finished date fetch. Returns true when it replaced the
    /// displayed dataset; stale or failed fetches leave the screen alone.
    pub fn apply_fetch(&mut self, result: DateFetchResult) -> bool {
        if self.is_stale(result.generation) {
            return false;
        }
        let mut replaced = self.apply_many(result.generation, result.many);
        if let Some(one) = result.one_ticker {
            replaced |= self.apply_one_ticker(result.generation, one);
        }
        replaced
    }

    /// Returns true when the fetched data went on screen.
    pub fn apply_many(
        &mut self,
        generation: u64,
        result: Result<DatasetByCategory, FetchError>,
    ) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        match result {
            Ok(dataset) => {
                self.full_data = Some(dataset.clone());
                self.many_tickers_loaded = true;
                self.last_error = None;
                if self.pinned_ticker.is_some() {
                    return false;
                }
                self.show_fetched(dataset);
                true
            }
            Err(e) => {
                log::warn!("Failed to fetch analytics: {}", e);
                // Keep whatever is on screen, but stop waiting for it
                self.many_tickers_loaded = true;
                if self.pinned_ticker.is_none() {
                    self.current_loaded = true;
                }
                self.last_error = Some(e);
                false
            }
        }
    }

    /// Returns true when the pinned record went on screen.
    pub fn apply_one_ticker(
        &mut self,
        generation: u64,
        result: Result<crate::models::TickerRecord, FetchError>,
    ) -> bool {
        if self.is_stale(generation) {
            return false;
        }
        match result {
            Ok(record) => {
                self.show_fetched(DatasetByCategory::single(record));
                true
            }
            Err(e) => {
                log::warn!("Failed to fetch pinned ticker: {}", e);
                self.last_error = Some(e);
                self.current_loaded = true;
                false
            }
        }
    }

    fn show_fetched(&mut self, dataset: DatasetByCategory) {
        self.fetched_display = Some(dataset.clone());
        self.current_data = Some(dataset);
        self.current_loaded = true;
    }

    pub fn pinned_ticker(&self) -> Option<&str> {
        self.pinned_ticker.as_deref()
    }

    /// Switches to one-ticker mode. The caller re-fetches with `refresh`.
    pub fn pin_ticker(&mut self, ticker: &str) {
        self.pinned_ticker = Some(ticker.to_uppercase());
    }

    pub fn unpin_ticker(&mut self) {
        if self.pinned_ticker.take().is_some() {
            self.fetched_display = self.full_data.clone();
            self.restore_fetched();
        }
    }

    /// Displays `dataset` instead of the fetched data (search override).
    pub fn replace_displayed(&mut self, dataset: DatasetByCategory) {
        self.current_data = Some(dataset);
        self.current_loaded = true;
    }

    /// Drops any override and shows what the last fetch displayed again.
    pub fn restore_fetched(&mut self) {
        self.current_data = self.fetched_display.clone();
    }

    pub fn full_data(&self) -> Option<&DatasetByCategory> {
        self.full_data.as_ref()
    }

    pub fn current_data(&self) -> Option<&DatasetByCategory> {
        self.current_data.as_ref()
    }

    pub fn many_tickers_loaded(&self) -> bool {
        self.many_tickers_loaded
    }

    /// The table renders only once the displayed dataset has arrived.
    pub fn is_ready(&self) -> bool {
        self.current_loaded && self.current_data.is_some()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn available_dates(&self) -> &[NaiveDate] {
        &self.available_dates
    }

    /// Newest first, without duplicates.
    pub fn set_available_dates(&mut self, mut dates: Vec<NaiveDate>) {
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        self.available_dates = dates;
    }
}
