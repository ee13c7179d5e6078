use eframe::egui::{Color32, RichText, Ui};

use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Small, gray text for secondary information.
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a "Label: Value" pair. The label is subdued, the value is colored.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    /// Inline help under an input. Red when `is_error`.
    fn label_help(&mut self, text: impl Into<String>, is_error: bool);

    fn label_error(&mut self, text: impl Into<String>);

    fn label_warning(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_help(&mut self, text: impl Into<String>, is_error: bool) {
        let color = if is_error {
            UI_CONFIG.colors.error_text
        } else {
            UI_CONFIG.colors.help_text
        };
        self.label(RichText::new(text).small().color(color));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.error_text));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::from_rgb(255, 215, 0)));
    }
}
