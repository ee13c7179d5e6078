use chrono::{DateTime, TimeZone};
use thiserror::Error;

use crate::config::ANALYTICS_API;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::source::{AnalyticsSource, FetchError};
use crate::data::store::AnalyticsStore;
use crate::models::{DatasetByCategory, TickerRecord};
use crate::utils::time_utils::normalize_selected_date;

/// Recoverable search failures. The `Display` text is the help text shown
/// under the search box.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Incorrect input ticker symbol")]
    NotFound,

    #[error("No date selected")]
    MissingDate,

    #[error("Service unavailable")]
    TransportFailure { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Editing,
    Error(SearchError),
    Searched,
}

/// What the search box renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    pub input: String,
    pub help_text: String,
    pub error: bool,
}

/// A lookup the caller should run against the analytics source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub date: String,
    pub ticker: String,
    pub generation: u64,
}

/// Drives the ticker search box: input validation, lookup, and clear.
#[derive(Debug, Default)]
pub struct SearchController {
    state: SearchState,
    phase: SearchPhase,
    generation: u64,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// Any lookup issued before this point is stale.
    fn invalidate_in_flight(&mut self) {
        self.generation += 1;
    }

    fn fail(&mut self, error: SearchError) -> SearchError {
        self.state.help_text = error.to_string();
        self.state.error = true;
        self.phase = SearchPhase::Error(error.clone());
        error
    }

    fn settle_input_phase(&mut self) {
        self.phase = if self.state.input.is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Editing
        };
    }

    pub fn on_input_changed(&mut self, text: &str) {
        // Upper-casing can lengthen the text ("ß" becomes "SS")
        self.state.input = text
            .to_uppercase()
            .chars()
            .take(ANALYTICS_API.max_ticker_len)
            .collect();
        self.state.help_text.clear();
        self.state.error = false;
        self.invalidate_in_flight();
        self.settle_input_phase();
    }

    /// Validates the input and the selected date. On success the returned
    /// request must be run and handed back to [`SearchController::complete`].
    pub fn submit<Tz: TimeZone>(
        &mut self,
        selected_date: Option<&DateTime<Tz>>,
    ) -> Result<LookupRequest, SearchError> {
        if self.state.input.is_empty() {
            return Err(self.fail(SearchError::EmptyInput));
        }
        let Some(date) = selected_date else {
            return Err(self.fail(SearchError::MissingDate));
        };

        self.invalidate_in_flight();
        let request = LookupRequest {
            date: normalize_selected_date(date),
            ticker: self.state.input.clone(),
            generation: self.generation,
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Searching {} on {}", request.ticker, request.date);
        }
        Ok(request)
    }

    /// Applies a lookup result. Returns false when the request was superseded
    /// by newer input, a clear, or another search.
    pub fn complete(
        &mut self,
        request: &LookupRequest,
        outcome: Result<Option<TickerRecord>, FetchError>,
        store: &mut AnalyticsStore,
    ) -> bool {
        if request.generation != self.generation {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_stale_responses {
                log::info!("Discarding stale lookup for {}", request.ticker);
            }
            return false;
        }

        match outcome {
            Ok(Some(record)) => {
                store.replace_displayed(DatasetByCategory::single(record));
                self.state.help_text.clear();
                self.state.error = false;
                self.phase = SearchPhase::Searched;
            }
            Ok(None) => {
                self.fail(SearchError::NotFound);
            }
            Err(e) => {
                log::warn!("Ticker lookup for {} failed: {}", request.ticker, e);
                self.fail(SearchError::TransportFailure {
                    detail: e.to_string(),
                });
            }
        }
        true
    }

    /// Validates, looks up, and applies in one go.
    pub async fn search<Tz: TimeZone>(
        &mut self,
        source: &dyn AnalyticsSource,
        selected_date: Option<&DateTime<Tz>>,
        store: &mut AnalyticsStore,
    ) -> Result<(), SearchError> {
        let request = self.submit(selected_date)?;
        let outcome = source
            .fetch_one_record(&request.date, &request.ticker)
            .await;
        self.complete(&request, outcome, store);
        match &self.phase {
            SearchPhase::Error(e) => Err(e.clone()),
            _ => Ok(()),
        }
    }

    pub fn clear(&mut self, store: &mut AnalyticsStore) {
        self.state = SearchState::default();
        self.phase = SearchPhase::Idle;
        self.invalidate_in_flight();
        store.restore_fetched();
    }

    /// A new date fetch has started. Lookups issued before it are stale, but
    /// the override stays on screen until the new dataset arrives.
    pub fn on_fetch_started(&mut self) {
        self.invalidate_in_flight();
    }

    /// The store replaced the displayed dataset, so any search override is gone.
    pub fn on_dataset_refreshed(&mut self) {
        if self.phase == SearchPhase::Searched {
            self.settle_input_phase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::tests::MockSource;
    use crate::data::source::{DateFetchPlan, DateFetchResult};
    use crate::domain::Category;
    use crate::models::ticker_record::tests::sample_record;
    use chrono::{FixedOffset, Local};
    use strum::IntoEnumIterator;

    const DATE: &str = "2023-03-01";

    fn full_dataset() -> DatasetByCategory {
        DatasetByCategory {
            by_one_day_avg_mf: vec![sample_record("AAPL", 1.0), sample_record("MSFT", 2.0)],
            by_volume: vec![sample_record("MSFT", 2.0), sample_record("AAPL", 1.0)],
            ..Default::default()
        }
    }

    fn selected_date() -> DateTime<FixedOffset> {
        // UTC-5 midnight, a positive JS-style timezone offset
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 3, 1, 0, 0, 0)
            .unwrap()
    }

    fn loaded_store() -> AnalyticsStore {
        let mut store = AnalyticsStore::new(Category::ByVolume, None);
        let plan = store.select_date(Local.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap());
        store.apply_many(plan.generation, Ok(full_dataset()));
        store
    }

    #[test]
    fn input_is_upper_cased_and_clears_errors() {
        let mut search = SearchController::new();
        search.submit::<Local>(None).unwrap_err();
        assert!(search.state().error);

        search.on_input_changed("aapl");
        assert_eq!(search.state().input, "AAPL");
        assert!(!search.state().error);
        assert!(search.state().help_text.is_empty());
        assert_eq!(search.phase(), &SearchPhase::Editing);

        search.on_input_changed("");
        assert_eq!(search.phase(), &SearchPhase::Idle);
    }

    #[test]
    fn input_is_truncated_to_ticker_length() {
        let mut search = SearchController::new();
        search.on_input_changed("googlx");
        assert_eq!(search.state().input, "GOOGL");

        search.on_input_changed("straße");
        assert_eq!(search.state().input, "STRAS");
    }

    #[tokio::test]
    async fn empty_input_never_fetches() {
        let source = MockSource::with_dataset(DATE, full_dataset());
        let mut store = loaded_store();
        let mut search = SearchController::new();

        let result = search.search(&source, Some(&selected_date()), &mut store).await;

        assert_eq!(result, Err(SearchError::EmptyInput));
        assert_eq!(search.state().help_text, "Input is empty");
        assert!(search.state().error);
        assert_eq!(source.lookup_count(), 0);
    }

    #[tokio::test]
    async fn missing_date_never_fetches() {
        let source = MockSource::with_dataset(DATE, full_dataset());
        let mut store = loaded_store();
        let mut search = SearchController::new();
        search.on_input_changed("aapl");

        let result = search.search::<Local>(&source, None, &mut store).await;

        assert_eq!(result, Err(SearchError::MissingDate));
        assert_eq!(search.state().help_text, "No date selected");
        assert_eq!(source.lookup_count(), 0);
    }

    #[tokio::test]
    async fn found_record_replaces_every_category() {
        let source = MockSource::with_dataset(DATE, full_dataset());
        let mut store = loaded_store();
        let mut search = SearchController::new();
        search.on_input_changed("msft");

        search
            .search(&source, Some(&selected_date()), &mut store)
            .await
            .unwrap();

        assert_eq!(search.phase(), &SearchPhase::Searched);
        assert_eq!(
            source.last_lookup.lock().unwrap().clone(),
            Some((DATE.to_string(), "MSFT".to_string()))
        );
        let shown = store.current_data().unwrap();
        let expected = sample_record("MSFT", 2.0);
        for category in Category::iter() {
            assert_eq!(shown.records(category), std::slice::from_ref(&expected));
        }
    }

    #[tokio::test]
    async fn unknown_ticker_leaves_data_unchanged() {
        let source = MockSource::with_dataset(DATE, full_dataset());
        let mut store = loaded_store();
        let before = store.current_data().cloned();
        let mut search = SearchController::new();
        search.on_input_changed("zzzz");

        let result = search.search(&source, Some(&selected_date()), &mut store).await;

        assert_eq!(result, Err(SearchError::NotFound));
        assert_eq!(search.state().help_text, "Incorrect input ticker symbol");
        assert_eq!(store.current_data().cloned(), before);
    }

    #[tokio::test]
    async fn transport_failure_is_its_own_error() {
        let source = MockSource {
            fail_with: Some(FetchError::Transport("connection refused".into())),
            ..MockSource::with_dataset(DATE, full_dataset())
        };
        let mut store = loaded_store();
        let before = store.current_data().cloned();
        let mut search = SearchController::new();
        search.on_input_changed("aapl");

        let result = search.search(&source, Some(&selected_date()), &mut store).await;

        assert!(matches!(result, Err(SearchError::TransportFailure { .. })));
        assert_eq!(search.state().help_text, "Service unavailable");
        assert_eq!(store.current_data().cloned(), before);
    }

    #[tokio::test]
    async fn clear_restores_the_pre_search_dataset() {
        let source = MockSource::with_dataset(DATE, full_dataset());
        let mut store = loaded_store();
        let mut search = SearchController::new();

        for ticker in ["aapl", "msft", "nope", "aapl"] {
            search.on_input_changed(ticker);
            let _ = search.search(&source, Some(&selected_date()), &mut store).await;
        }
        assert_ne!(store.current_data(), Some(&full_dataset()));

        search.clear(&mut store);

        assert_eq!(store.current_data(), Some(&full_dataset()));
        assert_eq!(search.state(), &SearchState::default());
        assert_eq!(search.phase(), &SearchPhase::Idle);
    }

    #[test]
    fn superseded_lookups_are_discarded() {
        let mut store = loaded_store();
        let mut search = SearchController::new();
        search.on_input_changed("aapl");
        let first = search.submit(Some(&selected_date())).unwrap();

        search.on_input_changed("msft");
        let second = search.submit(Some(&selected_date())).unwrap();

        assert!(!search.complete(&first, Ok(Some(sample_record("AAPL", 1.0))), &mut store));
        assert_eq!(store.current_data(), Some(&full_dataset()));

        assert!(search.complete(&second, Ok(Some(sample_record("MSFT", 2.0))), &mut store));
        assert_eq!(store.current_data().unwrap().by_volume[0].ticker, "MSFT");
    }

    #[test]
    fn clear_discards_in_flight_lookup() {
        let mut store = loaded_store();
        let mut search = SearchController::new();
        search.on_input_changed("aapl");
        let request = search.submit(Some(&selected_date())).unwrap();

        search.clear(&mut store);

        assert!(!search.complete(&request, Ok(Some(sample_record("AAPL", 1.0))), &mut store));
        assert_eq!(store.current_data(), Some(&full_dataset()));
    }

    #[test]
    fn refresh_drops_searched_phase_but_keeps_text() {
        let mut store = loaded_store();
        let mut search = SearchController::new();
        search.on_input_changed("aapl");
        let request = search.submit(Some(&selected_date())).unwrap();
        search.complete(&request, Ok(Some(sample_record("AAPL", 1.0))), &mut store);
        assert_eq!(search.phase(), &SearchPhase::Searched);

        search.on_dataset_refreshed();
        assert_eq!(search.phase(), &SearchPhase::Editing);
        assert_eq!(search.state().input, "AAPL");
    }

    fn fetch_for(plan: &DateFetchPlan) -> DateFetchResult {
        DateFetchResult {
            generation: plan.generation,
            many: Ok(full_dataset()),
            one_ticker: None,
        }
    }

    #[test]
    fn dataset_arriving_after_lookup_ends_the_search() {
        let mut store = loaded_store();
        let mut search = SearchController::new();
        let plan = store.select_date(Local.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap());
        search.on_fetch_started();

        search.on_input_changed("aapl");
        let request = search.submit(Some(&selected_date())).unwrap();
        assert!(search.complete(&request, Ok(Some(sample_record("AAPL", 1.0))), &mut store));
        assert_eq!(search.phase(), &SearchPhase::Searched);

        assert!(store.apply_fetch(fetch_for(&plan)));
        search.on_dataset_refreshed();

        assert_eq!(search.phase(), &SearchPhase::Editing);
        assert_eq!(store.current_data(), Some(&full_dataset()));
    }

    #[test]
    fn lookup_arriving_after_dataset_stays_on_screen() {
        let mut store = loaded_store();
        let mut search = SearchController::new();
        let plan = store.select_date(Local.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap());
        search.on_fetch_started();

        search.on_input_changed("aapl");
        let request = search.submit(Some(&selected_date())).unwrap();

        assert!(store.apply_fetch(fetch_for(&plan)));
        search.on_dataset_refreshed();
        assert_eq!(search.phase(), &SearchPhase::Editing);

        assert!(search.complete(&request, Ok(Some(sample_record("AAPL", 1.0))), &mut store));
        assert_eq!(search.phase(), &SearchPhase::Searched);
        assert_eq!(store.current_data().unwrap().by_volume.len(), 1);
    }

    #[test]
    fn fetch_started_discards_older_lookup() {
        let mut store = loaded_store();
        let mut search = SearchController::new();
        search.on_input_changed("aapl");
        let request = search.submit(Some(&selected_date())).unwrap();

        store.select_date(Local.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap());
        search.on_fetch_started();

        assert!(!search.complete(&request, Ok(Some(sample_record("AAPL", 1.0))), &mut store));
    }

    #[test]
    fn clear_in_pinned_mode_keeps_the_pinned_record() {
        let mut store = AnalyticsStore::new(Category::ByVolume, Some("MSFT".to_string()));
        let plan = store.select_date(Local.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap());
        store.apply_fetch(DateFetchResult {
            one_ticker: Some(Ok(sample_record("MSFT", 2.0))),
            ..fetch_for(&plan)
        });
        let mut search = SearchController::new();
        search.on_input_changed("aapl");
        let request = search.submit(Some(&selected_date())).unwrap();
        search.complete(&request, Ok(Some(sample_record("AAPL", 1.0))), &mut store);

        search.clear(&mut store);

        assert_eq!(store.pinned_ticker(), Some("MSFT"));
        assert_eq!(
            store.current_data(),
            Some(&DatasetByCategory::single(sample_record("MSFT", 2.0)))
        );
    }
}
