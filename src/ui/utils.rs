use eframe::egui::{Color32, Context, RichText, Ui, Visuals};

use crate::ui::config::UI_CONFIG;

/// Uppercase monospace heading with a trailing colon
pub fn colored_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into().to_uppercase() + ":")
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Centered spinner with a heading and a dim detail line
pub fn loading_placeholder(ui: &mut Ui, heading: &str, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.add_space(12.0);
        ui.heading(heading);
        ui.add_space(6.0);
        ui.label(RichText::new(detail).color(Color32::from_gray(190)));
    });
}

/// Centered warning block for failures the user can't fix from the table
pub fn error_placeholder(ui: &mut Ui, heading: &str, detail: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(heading);
        ui.add_space(10.0);
        ui.label(RichText::new(detail).color(UI_CONFIG.colors.error_text));
    });
}
