use crate::constant::EDITOR_FONT_SIZE;
use egui::{Color32, Context, FontFamily, FontId, Stroke, Style, TextStyle, Visuals};

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.text_styles.insert(
        TextStyle::Monospace,
        FontId::new(EDITOR_FONT_SIZE, FontFamily::Monospace),
    );

    ctx.set_style(style);

    let mut visuals = Visuals::light();
    visuals.window_shadow = egui::epaint::Shadow::NONE;
    visuals.popup_shadow = egui::epaint::Shadow::NONE;

    // Panels keep a thin border so the two editors read as separate sheets
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Color32::from_gray(225));
    visuals.widgets.hovered.bg_fill = Color32::from_gray(240);
    visuals.widgets.active.bg_fill = Color32::from_gray(230);
    visuals.extreme_bg_color = Color32::WHITE;

    visuals.selection.bg_fill = Color32::from_rgb(200, 220, 255);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(100, 100, 100));

    ctx.set_visuals(visuals);
}
