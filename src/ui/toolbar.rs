use crate::constant::{MAX_VISIBLE_LINES, MIN_VISIBLE_LINES};
use crate::diff::DiffStats;
use crate::language::Language;
use crate::ui::selectors::{LanguageSelector, ModeSelector};
use crate::workspace::DiffMode;
use egui::{Align, Color32, Layout, RichText, Ui};

pub enum ToolbarAction {
    SetLanguage(Language),
    SetDiffMode(DiffMode),
    SetNumLines(u32),
    ToggleDiff,
}

pub struct Toolbar;

pub struct ToolbarState {
    pub language: Language,
    pub diff_mode: DiffMode,
    pub num_lines: u32,
    pub diff_visible: bool,
    /// Stats of the diff on screen, if any
    pub stats: Option<DiffStats>,
}

impl Toolbar {
    pub fn show(ui: &mut Ui, state: ToolbarState) -> Option<ToolbarAction> {
        let ToolbarState {
            language,
            diff_mode,
            num_lines,
            diff_visible,
            stats,
        } = state;

        let mut action = None;

        ui.horizontal(|ui| {
            // Selectors
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                if let Some(language) = LanguageSelector::show(ui, language) {
                    action = Some(ToolbarAction::SetLanguage(language));
                }
                if let Some(mode) = ModeSelector::show(ui, diff_mode) {
                    action = Some(ToolbarAction::SetDiffMode(mode));
                }

                ui.add_space(16.0);
                ui.label("Visible Lines:");
                let mut lines = num_lines;
                let slider = egui::Slider::new(&mut lines, MIN_VISIBLE_LINES..=MAX_VISIBLE_LINES)
                    .show_value(false);
                if ui.add(slider).changed() && lines != num_lines {
                    action = Some(ToolbarAction::SetNumLines(lines));
                }
                ui.label(format!("{} lines", lines));
            });

            // Toggle and stats
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if diff_visible { "Edit Input" } else { "Show Diff" };
                let button = egui::Button::new(RichText::new(label).strong())
                    .fill(Color32::from_rgb(220, 232, 255));
                if ui.add(button).clicked() {
                    action = Some(ToolbarAction::ToggleDiff);
                }

                if let Some(stats) = stats {
                    ui.add_space(16.0);
                    ui.label(
                        RichText::new(format!("-{}", stats.removed_lines))
                            .color(Color32::from_rgb(150, 0, 0)),
                    )
                    .on_hover_text(format!("{} characters removed", stats.removed_chars));
                    ui.label(
                        RichText::new(format!("+{}", stats.added_lines))
                            .color(Color32::from_rgb(0, 100, 0)),
                    )
                    .on_hover_text(format!("{} characters added", stats.added_chars));
                }
            });
        });

        action
    }
}
