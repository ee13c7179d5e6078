use chrono::NaiveDate;
use eframe::egui::{ComboBox, Key, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::config::ANALYTICS_API;
use crate::domain::{Category, SearchPhase, SearchState};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Ticker search box with its Search and Clear buttons
pub struct SearchPanel<'a> {
    state: &'a SearchState,
    phase: &'a SearchPhase,
    is_searching: bool,
}

impl<'a> SearchPanel<'a> {
    pub fn new(state: &'a SearchState, phase: &'a SearchPhase, is_searching: bool) -> Self {
        Self {
            state,
            phase,
            is_searching,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    InputChanged(String),
    Submit,
    Clear,
    /// Keep showing the searched ticker across date changes
    Pin(String),
}

impl<'a> Panel for SearchPanel<'a> {
    type Event = SearchEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.search_heading);

        let mut text = self.state.input.clone();
        ui.horizontal(|ui| {
            let response = ui.add(
                TextEdit::singleline(&mut text)
                    .hint_text(UI_TEXT.search_hint)
                    .char_limit(ANALYTICS_API.max_ticker_len)
                    .desired_width(UI_CONFIG.search_box_width),
            );
            if response.changed() {
                events.push(SearchEvent::InputChanged(text.clone()));
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                events.push(SearchEvent::Submit);
            }
            if self.is_searching {
                ui.spinner();
            }
        });

        ui.horizontal(|ui| {
            if ui.button(UI_TEXT.search_button).clicked() {
                events.push(SearchEvent::Submit);
            }
            if ui.button(UI_TEXT.clear_button).clicked() {
                events.push(SearchEvent::Clear);
            }
            if *self.phase == SearchPhase::Searched
                && ui.button(format!("📌 {}", self.state.input)).clicked()
            {
                events.push(SearchEvent::Pin(self.state.input.clone()));
            }
        });

        if !self.state.help_text.is_empty() {
            ui.label_help(&self.state.help_text, self.state.error);
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions && !events.is_empty() {
            log::info!("Search panel events: {:?}", events);
        }
        events
    }
}

/// Date picker: the available dates plus one-day steps
pub struct DatePanel<'a> {
    selected: Option<NaiveDate>,
    available: &'a [NaiveDate],
}

impl<'a> DatePanel<'a> {
    pub fn new(selected: Option<NaiveDate>, available: &'a [NaiveDate]) -> Self {
        Self {
            selected,
            available,
        }
    }
}

impl<'a> Panel for DatePanel<'a> {
    type Event = NaiveDate;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.date_heading);

        let selected_text = self
            .selected
            .map(|d| d.to_string())
            .unwrap_or_else(|| UI_TEXT.date_none.to_string());

        ui.horizontal(|ui| {
            let day = self.selected;
            if ui
                .add_enabled(day.is_some(), eframe::egui::Button::new(UI_TEXT.date_prev))
                .clicked()
            {
                if let Some(day) = day.and_then(|d| d.pred_opt()) {
                    events.push(day);
                }
            }

            ComboBox::from_id_salt("date_picker")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for date in self.available {
                        let is_selected = self.selected == Some(*date);
                        if ui.selectable_label(is_selected, date.to_string()).clicked()
                            && !is_selected
                        {
                            events.push(*date);
                        }
                    }
                });

            if ui
                .add_enabled(day.is_some(), eframe::egui::Button::new(UI_TEXT.date_next))
                .clicked()
            {
                if let Some(day) = day.and_then(|d| d.succ_opt()) {
                    events.push(day);
                }
            }
        });

        if let Some(day) = self.selected {
            if !self.available.is_empty() && !self.available.contains(&day) {
                ui.label_warning(format!("No published analytics for {}", day));
            }
        }
        events
    }
}

/// Which ranking the table shows
pub struct CategoryPanel {
    selected: Category,
}

impl CategoryPanel {
    pub fn new(selected: Category) -> Self {
        Self { selected }
    }
}

impl Panel for CategoryPanel {
    type Event = Category;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.category_heading);

        for category in Category::iter() {
            if ui
                .selectable_value(&mut self.selected, category, category.to_string())
                .clicked()
            {
                events.push(category);
            }
        }
        events
    }
}

/// Shown only while a ticker is pinned
pub struct PinnedPanel<'a> {
    ticker: &'a str,
}

impl<'a> PinnedPanel<'a> {
    pub fn new(ticker: &'a str) -> Self {
        Self { ticker }
    }
}

pub struct UnpinEvent;

impl<'a> Panel for PinnedPanel<'a> {
    type Event = UnpinEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.add_space(10.0);
        ui.label(colored_subsection_heading(UI_TEXT.pinned_heading));
        ui.horizontal(|ui| {
            ui.label(format!("📌 {}", self.ticker));
            if ui.small_button(UI_TEXT.unpin_button).clicked() {
                events.push(UnpinEvent);
            }
        });
        events
    }
}

/// Page size selector and page navigation under the table
pub struct PagingPanel {
    rows_per_page: usize,
    page: usize,
    page_count: usize,
    total_rows: usize,
}

impl PagingPanel {
    pub fn new(rows_per_page: usize, page: usize, page_count: usize, total_rows: usize) -> Self {
        Self {
            rows_per_page,
            page,
            page_count,
            total_rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingEvent {
    RowsPerPage(usize),
    Prev,
    Next,
}

impl Panel for PagingPanel {
    type Event = PagingEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.rows_per_page_label);
            ComboBox::from_id_salt("rows_per_page")
                .selected_text(self.rows_per_page.to_string())
                .width(50.0)
                .show_ui(ui, |ui| {
                    for option in UI_CONFIG.rows_per_page_options {
                        if ui
                            .selectable_value(&mut self.rows_per_page, option, option.to_string())
                            .clicked()
                        {
                            events.push(PagingEvent::RowsPerPage(option));
                        }
                    }
                });

            ui.separator();
            if ui
                .add_enabled(self.page > 0, eframe::egui::Button::new(UI_TEXT.page_prev))
                .clicked()
            {
                events.push(PagingEvent::Prev);
            }
            ui.label(format!("{} / {}", self.page + 1, self.page_count));
            if ui
                .add_enabled(
                    self.page + 1 < self.page_count,
                    eframe::egui::Button::new(UI_TEXT.page_next),
                )
                .clicked()
            {
                events.push(PagingEvent::Next);
            }
            ui.separator();
            ui.label_subdued(format!("{} rows", self.total_rows));
        });
        events
    }
}
