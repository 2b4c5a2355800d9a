use crate::highlight::{HighlightCache, Highlighter};
use crate::language::Language;
use crate::workspace::Side;
use egui::{Align, Layout, RichText, TextBuffer, TextStyle, Ui};

pub enum PanelAction {
    Paste,
    Open,
    Clear,
}

/// One editable, syntax-highlighted input panel
pub struct TextPanel {
    side: Side,
    cache: HighlightCache,
}

impl TextPanel {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            cache: HighlightCache::default(),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        text: &mut String,
        language: Language,
        num_lines: u32,
        height: f32,
        highlighter: &Highlighter,
    ) -> Option<PanelAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label(RichText::new(self.side.label()).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("✖").on_hover_text("Clear").clicked() {
                    action = Some(PanelAction::Clear);
                }
                if ui.small_button("📂").on_hover_text("Open file").clicked() {
                    action = Some(PanelAction::Open);
                }
                if ui.small_button("📋").on_hover_text("Paste from clipboard").clicked() {
                    action = Some(PanelAction::Paste);
                }
            });
        });

        let font_id = TextStyle::Monospace.resolve(ui.style());
        let fallback_color = ui.visuals().text_color();
        let cache = &mut self.cache;
        let mut layouter = |ui: &Ui, buf: &dyn TextBuffer, wrap_width: f32| {
            let mut job = cache.layout_job(
                highlighter,
                buf.as_str(),
                language,
                &font_id,
                fallback_color,
            );
            job.wrap.max_width = wrap_width;
            ui.painter().layout_job(job)
        };

        egui::ScrollArea::vertical()
            .id_salt(("text_panel_scroll", self.side))
            .max_height(height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(text)
                        .id_salt(("text_panel", self.side))
                        .code_editor()
                        .desired_rows(num_lines as usize)
                        .desired_width(f32::INFINITY)
                        .layouter(&mut layouter),
                );
            });

        action
    }
}
