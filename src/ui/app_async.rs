use chrono::{Local, NaiveDate};
use eframe::egui;
use poll_promise::Promise;
use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{AnalyticsSource, DateFetchPlan, FetchError, fetch_for_date};
use crate::domain::LookupRequest;
use crate::models::TickerRecord;
use crate::ui::app::TickerScopeApp;
use crate::utils::app_time::now;
use crate::utils::time_utils::{initial_date, parse_calendar_date};

pub(super) type DatesResult = Result<Vec<NaiveDate>, FetchError>;

#[derive(Clone)]
pub(super) struct LookupResult {
    pub(super) request: LookupRequest,
    pub(super) outcome: Result<Option<TickerRecord>, FetchError>,
}

impl TickerScopeApp {
    pub(super) fn start_dates_fetch(&mut self) {
        if self.dates_promise.is_some() {
            return;
        }
        let source = Arc::clone(&self.source);
        let runtime = self.runtime.clone();

        self.dates_promise = Some(Promise::spawn_thread("available_dates", move || {
            runtime.block_on(async move { source.available_dates().await })
        }));
    }

    pub(super) fn poll_dates_fetch(&mut self, ctx: &egui::Context) {
        let outcome = self
            .dates_promise
            .as_ref()
            .and_then(|promise| promise.ready().cloned());

        if let Some(result) = outcome {
            self.dates_promise = None;

            let persisted = self
                .prefs
                .selected_date
                .as_deref()
                .and_then(parse_calendar_date);
            let today = Local::now().date_naive();

            let day = match result {
                Ok(dates) => {
                    self.store.set_available_dates(dates);
                    initial_date(persisted, self.store.available_dates(), today)
                }
                Err(e) => {
                    log::warn!("Failed to list available dates from {}: {}", self.source.signature(), e);
                    persisted.unwrap_or(today)
                }
            };

            // A date the user already picked wins over the start-up default
            if self.store.selected_date().is_none() {
                self.handle_date_selected(day);
            }
        } else if self.dates_promise.is_some() {
            ctx.request_repaint();
        }
    }

    /// Replaces any fetch in flight. The store's generation check drops the
    /// older response if its thread still finishes.
    pub(super) fn start_date_fetch(&mut self, plan: DateFetchPlan) {
        let source = Arc::clone(&self.source);
        let runtime = self.runtime.clone();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_events {
            log::info!(
                "Fetching analytics for {} (generation {}, pinned {:?})",
                plan.date,
                plan.generation,
                plan.pinned_ticker
            );
        }

        self.date_fetch_promise = Some(Promise::spawn_thread("analytics_fetch", move || {
            let started = now();
            let result = runtime.block_on(async move { fetch_for_date(source.as_ref(), &plan).await });
            log::info!(
                "Fetched analytics for generation {} in {:.2}s",
                result.generation,
                started.elapsed().as_secs_f32()
            );
            result
        }));
    }

    pub(super) fn poll_date_fetch(&mut self, ctx: &egui::Context) {
        let outcome = self
            .date_fetch_promise
            .as_ref()
            .and_then(|promise| promise.ready().cloned());

        if let Some(result) = outcome {
            self.date_fetch_promise = None;
            if self.store.apply_fetch(result) {
                self.search.on_dataset_refreshed();
                self.pager.reset();
            }
        } else if self.date_fetch_promise.is_some() {
            ctx.request_repaint();
        }
    }

    pub(super) fn start_lookup(&mut self, request: LookupRequest) {
        let source = Arc::clone(&self.source);
        let runtime = self.runtime.clone();

        self.lookup_promise = Some(Promise::spawn_thread("ticker_lookup", move || {
            let outcome = runtime.block_on(async {
                source
                    .fetch_one_record(&request.date, &request.ticker)
                    .await
            });
            LookupResult { request, outcome }
        }));
    }

    pub(super) fn poll_lookup(&mut self, ctx: &egui::Context) {
        let outcome = self
            .lookup_promise
            .as_ref()
            .and_then(|promise| promise.ready().cloned());

        if let Some(LookupResult { request, outcome }) = outcome {
            self.lookup_promise = None;
            if self.search.complete(&request, outcome, &mut self.store) {
                self.pager.reset();
            }
        } else if self.lookup_promise.is_some() {
            ctx.request_repaint();
        }
    }
}
