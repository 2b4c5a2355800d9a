//! Controlled dropdowns for the syntax language and the diff layout

use crate::language::Language;
use crate::workspace::DiffMode;
use egui::Ui;

pub struct LanguageSelector;

impl LanguageSelector {
    /// Returns the newly picked language, if the user changed it this frame
    pub fn show(ui: &mut Ui, current: Language) -> Option<Language> {
        let mut selected = current;
        egui::ComboBox::from_id_salt("language_selector")
            .selected_text(current.name())
            .show_ui(ui, |ui| {
                for language in Language::ALL {
                    ui.selectable_value(&mut selected, language, language.name());
                }
            })
            .response
            .on_hover_text("Syntax highlighting");

        (selected != current).then_some(selected)
    }
}

pub struct ModeSelector;

impl ModeSelector {
    /// Returns the newly picked diff mode, if the user changed it this frame
    pub fn show(ui: &mut Ui, current: DiffMode) -> Option<DiffMode> {
        let mut selected = current;
        egui::ComboBox::from_id_salt("mode_selector")
            .selected_text(current.name())
            .show_ui(ui, |ui| {
                for mode in DiffMode::ALL {
                    ui.selectable_value(&mut selected, mode, mode.name());
                }
            })
            .response
            .on_hover_text("Diff layout");

        (selected != current).then_some(selected)
    }
}
