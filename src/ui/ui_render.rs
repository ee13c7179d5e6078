use eframe::egui::{
    CentralPanel, Color32, Context, Frame, Grid, Key, Margin, RichText, ScrollArea, SidePanel,
    TopBottomPanel, Ui, Window,
};

use crate::data::AnalyticsSource;
use crate::domain::SearchPhase;
use crate::models::GridRow;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{
    CategoryPanel, DatePanel, PagingPanel, Panel, PinnedPanel, SearchPanel,
};
use crate::ui::utils::{error_placeholder, loading_placeholder, spaced_separator};
use crate::utils::time_utils::normalize_selected_date;

use super::app::TickerScopeApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl TickerScopeApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let search_events = {
                    let mut panel = SearchPanel::new(
                        self.search.state(),
                        self.search.phase(),
                        self.is_searching(),
                    );
                    panel.render(ui)
                };
                for event in search_events {
                    self.handle_search_event(event);
                }

                spaced_separator(ui);

                let selected = self.store.selected_date().map(|d| d.date_naive());
                let date_events = DatePanel::new(selected, self.store.available_dates()).render(ui);
                if let Some(day) = date_events.last() {
                    self.handle_date_selected(*day);
                }

                spaced_separator(ui);

                for category in CategoryPanel::new(self.store.category()).render(ui) {
                    self.handle_category_changed(category);
                }

                if let Some(ticker) = self.store.pinned_ticker().map(str::to_string) {
                    if !PinnedPanel::new(&ticker).render(ui).is_empty() {
                        self.unpin_ticker();
                    }
                }
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(8));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                if let Some(error) = &self.config_error {
                    error_placeholder(ui, UI_TEXT.config_error_heading, &error.to_string());
                    return;
                }

                if !self.store.is_ready() {
                    match self.store.last_error() {
                        Some(error) if !self.is_fetching() => {
                            error_placeholder(ui, UI_TEXT.fetch_error_heading, &error.to_string());
                        }
                        _ => loading_placeholder(ui, UI_TEXT.loading_heading, UI_TEXT.loading_detail),
                    }
                    return;
                }

                if let Some(error) = self.store.last_error() {
                    ui.label_error(format!("{}: {}", UI_TEXT.fetch_error_heading, error));
                    ui.add_space(4.0);
                }

                let rows = self.table_rows();
                let total_rows = rows.len();
                let page_range = self.pager.range(total_rows);

                let paging_events = PagingPanel::new(
                    self.pager.rows_per_page(),
                    self.pager.page(total_rows),
                    self.pager.page_count(total_rows),
                    total_rows,
                )
                .render(ui);
                ui.add_space(6.0);

                if rows.is_empty() {
                    ui.label_subdued(UI_TEXT.empty_table);
                } else {
                    self.render_table(ui, &rows[page_range]);
                }

                for event in paging_events {
                    self.handle_paging_event(event, total_rows);
                }
            });
    }

    fn render_table(&self, ui: &mut Ui, rows: &[GridRow]) {
        let visible: Vec<_> = self.columns.visible_columns().collect();

        ScrollArea::both().id_salt("analytics_table").show(ui, |ui| {
            Grid::new("analytics_grid")
                .num_columns(visible.len() + 1)
                .spacing([12.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label(RichText::new(UI_TEXT.row_id_header).strong());
                    for column in &visible {
                        ui.add_sized(
                            [column.width, 18.0],
                            eframe::egui::Label::new(
                                RichText::new(column.header)
                                    .strong()
                                    .color(UI_CONFIG.colors.table_header),
                            ),
                        );
                    }
                    ui.end_row();

                    for row in rows {
                        ui.label_subdued(row.id.to_string());
                        for cell in &row.cells {
                            ui.label(RichText::new(cell).monospace());
                        }
                        ui.end_row();
                    }
                });
        });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric("📡", self.source.signature(), Color32::from_rgb(100, 200, 100));
                    ui.separator();

                    if let Some(date) = self.store.selected_date() {
                        ui.metric("📅", &normalize_selected_date(date), UI_CONFIG.colors.help_text);
                        ui.separator();
                    }

                    ui.metric("📊", &self.store.category().to_string(), UI_CONFIG.colors.help_text);
                    ui.separator();

                    if let Some(data) = self.store.current_data() {
                        ui.label_subdued(format!("{} records", data.total_records()));
                        ui.separator();
                    }

                    if let Some(ticker) = self.store.pinned_ticker() {
                        ui.metric("📌", ticker, Color32::from_rgb(255, 200, 100));
                        ui.separator();
                    }

                    if *self.search.phase() == SearchPhase::Searched {
                        ui.label_warning(format!("🔍 {}", self.search.state().input));
                        ui.separator();
                    }

                    if self.is_fetching() {
                        ui.label_warning("⚙ Fetching analytics...");
                        ui.separator();
                    }

                    #[cfg(debug_assertions)]
                    {
                        ui.label_subdued(format!("gen {}", self.store.fetch_generation()));
                    }

                    ui.label_subdued("H: help");
                });
            });
    }

    fn render_shortcut_rows(ui: &mut Ui, rows: &[(&str, &str)]) {
        for (key, description) in rows {
            ui.label(RichText::new(*key).monospace().strong());
            ui.label(*description);
            ui.end_row();
        }
    }

    pub(super) fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.help_window_title)
            .open(&mut self.show_help)
            .resizable(false)
            .collapsible(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.add_space(10.0);

                let shortcuts = [
                    ("H", "Toggle this help panel"),
                    ("Esc", "Close help, or clear the search"),
                    ("Enter", "Search the typed ticker"),
                    ("PgUp / PgDn", "Previous / next page"),
                    ("Alt+← / Alt+→", "Previous / next day"),
                ];

                Grid::new("shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        Self::render_shortcut_rows(ui, &shortcuts);
                    });
                ui.add_space(10.0);
            });
    }

    pub(super) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        // Keys typed into the search box are not shortcuts
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let total_rows = self.table_rows().len();
        let (toggle_help, escape, page_up, page_down, day_back, day_forward) = ctx.input(|i| {
            (
                i.key_pressed(Key::H),
                i.key_pressed(Key::Escape),
                i.key_pressed(Key::PageUp),
                i.key_pressed(Key::PageDown),
                i.modifiers.alt && i.key_pressed(Key::ArrowLeft),
                i.modifiers.alt && i.key_pressed(Key::ArrowRight),
            )
        });

        if toggle_help {
            self.show_help = !self.show_help;
        }
        if escape {
            if self.show_help {
                self.show_help = false;
            } else if *self.search.phase() != SearchPhase::Idle {
                self.handle_search_event(crate::ui::ui_panels::SearchEvent::Clear);
            }
        }
        if page_up {
            self.pager.prev(total_rows);
        }
        if page_down {
            self.pager.next(total_rows);
        }
        if day_back {
            self.step_selected_date(-1);
        }
        if day_forward {
            self.step_selected_date(1);
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions && (toggle_help || escape || day_back || day_forward) {
            log::info!("Shortcut handled (help: {}, escape: {})", toggle_help, escape);
        }
    }
}
