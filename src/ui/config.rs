use eframe::egui::Color32;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub help_text: Color32,
    pub error_text: Color32,
    pub table_header: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub rows_per_page_options: [usize; 3],
    pub default_rows_per_page: usize,
    pub side_panel_min_width: f32,
    pub search_box_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(30, 34, 42),
        side_panel: Color32::from_rgb(25, 25, 25),
        help_text: Color32::from_rgb(150, 200, 255),
        error_text: Color32::from_rgb(255, 100, 100),
        table_header: Color32::from_rgb(0, 255, 255),
    },
    rows_per_page_options: [5, 10, 20],
    default_rows_per_page: 10,
    side_panel_min_width: 180.0,
    search_box_width: 90.0,
};

/// Every user-facing string in one place
pub struct UiText {
    pub window_title: &'static str,
    pub search_heading: &'static str,
    pub search_hint: &'static str,
    pub search_button: &'static str,
    pub clear_button: &'static str,
    pub date_heading: &'static str,
    pub date_prev: &'static str,
    pub date_next: &'static str,
    pub date_none: &'static str,
    pub category_heading: &'static str,
    pub pinned_heading: &'static str,
    pub unpin_button: &'static str,
    pub rows_per_page_label: &'static str,
    pub page_prev: &'static str,
    pub page_next: &'static str,
    pub loading_heading: &'static str,
    pub loading_detail: &'static str,
    pub empty_table: &'static str,
    pub fetch_error_heading: &'static str,
    pub config_error_heading: &'static str,
    pub row_id_header: &'static str,
    pub help_window_title: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    window_title: "Ticker Scope - Daily Ticker Analytics",
    search_heading: "Search",
    search_hint: "Ticker",
    search_button: "🔍 Search",
    clear_button: "✖ Clear",
    date_heading: "Date",
    date_prev: "◀",
    date_next: "▶",
    date_none: "No date",
    category_heading: "Category",
    pinned_heading: "Pinned ticker",
    unpin_button: "Unpin",
    rows_per_page_label: "Rows per page:",
    page_prev: "◀ Prev",
    page_next: "Next ▶",
    loading_heading: "Loading analytics...",
    loading_detail: "Waiting for the analytics source",
    empty_table: "No records for this category",
    fetch_error_heading: "⚠ Unable to refresh analytics",
    config_error_heading: "⚠ Column configuration error",
    row_id_header: "#",
    help_window_title: "⌨️ Keyboard Shortcuts",
};
