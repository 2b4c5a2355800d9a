use crate::diff::{DiffDocument, DiffLine, DiffRow, DiffStats, LineTag, inline_changes};
use crate::highlight::{Highlighter, StyledSpan, overlay};
use crate::language::Language;
use crate::workspace::{DiffMode, DiffWorkspace, Snapshot};
use egui::{Color32, FontId, RichText, TextFormat, TextStyle, Ui, text::LayoutJob};
use std::ops::Range;

const REMOVED_LINE_BG: Color32 = Color32::from_rgb(255, 235, 235);
const ADDED_LINE_BG: Color32 = Color32::from_rgb(230, 255, 235);
const REMOVED_WORD_BG: Color32 = Color32::from_rgb(255, 180, 180);
const ADDED_WORD_BG: Color32 = Color32::from_rgb(170, 240, 180);
const FILLER_BG: Color32 = Color32::from_gray(246);

/// Diff and highlight results for one snapshot, reused across frames
struct DiffRender {
    generation: u64,
    language: Language,
    document: DiffDocument,
    old_spans: Vec<Vec<StyledSpan>>,
    new_spans: Vec<Vec<StyledSpan>>,
}

impl DiffRender {
    fn spans(&self, line: &DiffLine, old_side: bool) -> &[StyledSpan] {
        let (index, spans) = if old_side {
            (line.old_index, &self.old_spans)
        } else {
            (line.new_index, &self.new_spans)
        };
        index
            .and_then(|i| spans.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// One line as drawn, with what it needs for styling
struct Cell<'a> {
    line: &'a DiffLine,
    spans: &'a [StyledSpan],
    emphasis: Vec<Range<usize>>,
}

/// Read-only rendering of the last snapshot
#[derive(Default)]
pub struct DiffView {
    render: Option<DiffRender>,
}

impl DiffView {
    /// Make sure the diff for the workspace's current snapshot is computed and
    /// return its stats
    pub fn prepare_for(
        &mut self,
        workspace: &DiffWorkspace,
        highlighter: &Highlighter,
    ) -> DiffStats {
        self.prepare(
            workspace.snapshot(),
            workspace.generation(),
            workspace.language(),
            highlighter,
        )
        .document
        .stats
    }

    /// Recompute only when a new snapshot was taken or the language changed
    fn prepare(
        &mut self,
        snapshot: &Snapshot,
        generation: u64,
        language: Language,
        highlighter: &Highlighter,
    ) -> &DiffRender {
        let render = match self.render.take() {
            Some(render) if render.generation == generation && render.language == language => {
                render
            }
            _ => {
                tracing::debug!("Computing diff for snapshot {}", generation);
                let document = DiffDocument::compute(&snapshot.left, &snapshot.right);
                // Highlight the lines exactly as the diff split them
                let old_spans = highlighter.line_spans(document.old_lines(), language);
                let new_spans = highlighter.line_spans(document.new_lines(), language);
                DiffRender {
                    generation,
                    language,
                    document,
                    old_spans,
                    new_spans,
                }
            }
        };

        self.render.insert(render)
    }

    pub fn show(&mut self, ui: &mut Ui, workspace: &DiffWorkspace, highlighter: &Highlighter) {
        let render = self.prepare(
            workspace.snapshot(),
            workspace.generation(),
            workspace.language(),
            highlighter,
        );
        let height = workspace.editor_height();

        if render.document.is_identical() {
            ui.label(RichText::new("No differences").italics().weak());
        }

        egui::ScrollArea::vertical()
            .id_salt("diff_view_scroll")
            .max_height(height)
            .min_scrolled_height(height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.style_mut().spacing.item_spacing.y = 0.0;
                match workspace.diff_mode() {
                    DiffMode::SideBySide => render_side_by_side(ui, render),
                    DiffMode::Inline => render_inline(ui, render),
                }
            });
    }
}

fn render_side_by_side(ui: &mut Ui, render: &DiffRender) {
    // Leave room for the grid spacing so the scroll area does not jitter horizontally
    let col_w = (ui.available_width() / 2.0 - 8.0).max(100.0);

    egui::Grid::new("side_by_side_diff")
        .num_columns(2)
        .min_col_width(col_w)
        .max_col_width(col_w)
        .spacing(egui::vec2(4.0, 0.0))
        .show(ui, |ui| {
            for row in &render.document.rows {
                match row {
                    DiffRow::Unchanged(line) => {
                        let left = Cell {
                            line,
                            spans: render.spans(line, true),
                            emphasis: Vec::new(),
                        };
                        let right = Cell {
                            line,
                            spans: render.spans(line, false),
                            emphasis: Vec::new(),
                        };
                        render_cell(ui, Some(&left), line.old_index, col_w);
                        render_cell(ui, Some(&right), line.new_index, col_w);
                        ui.end_row();
                    }
                    DiffRow::Pair(removed, added) => {
                        for i in 0..removed.len().max(added.len()) {
                            let (left, right) =
                                paired_cells(render, removed.get(i), added.get(i));
                            let old_number = left.as_ref().and_then(|c| c.line.old_index);
                            let new_number = right.as_ref().and_then(|c| c.line.new_index);
                            render_cell(ui, left.as_ref(), old_number, col_w);
                            render_cell(ui, right.as_ref(), new_number, col_w);
                            ui.end_row();
                        }
                    }
                }
            }
        });
}

fn render_inline(ui: &mut Ui, render: &DiffRender) {
    let width = ui.available_width();

    for row in &render.document.rows {
        match row {
            DiffRow::Unchanged(line) => {
                let cell = Cell {
                    line,
                    spans: render.spans(line, false),
                    emphasis: Vec::new(),
                };
                render_inline_cell(ui, &cell, width);
            }
            DiffRow::Pair(removed, added) => {
                let mut added_cells = Vec::with_capacity(added.len());
                for i in 0..removed.len().max(added.len()) {
                    let (left, right) = paired_cells(render, removed.get(i), added.get(i));
                    if let Some(cell) = left {
                        render_inline_cell(ui, &cell, width);
                    }
                    added_cells.extend(right);
                }
                for cell in &added_cells {
                    render_inline_cell(ui, cell, width);
                }
            }
        }
    }
}

/// Cells for the i-th removed and added line of a block; a line with a
/// counterpart gets character-level emphasis
fn paired_cells<'a>(
    render: &'a DiffRender,
    removed: Option<&'a DiffLine>,
    added: Option<&'a DiffLine>,
) -> (Option<Cell<'a>>, Option<Cell<'a>>) {
    let (removed_ranges, added_ranges) = match (removed, added) {
        (Some(old), Some(new)) => inline_changes(&old.content, &new.content),
        _ => (Vec::new(), Vec::new()),
    };

    let left = removed.map(|line| Cell {
        line,
        spans: render.spans(line, true),
        emphasis: removed_ranges,
    });
    let right = added.map(|line| Cell {
        line,
        spans: render.spans(line, false),
        emphasis: added_ranges,
    });
    (left, right)
}

fn render_cell(ui: &mut Ui, cell: Option<&Cell<'_>>, number: Option<usize>, width: f32) {
    let fill = cell.map_or(FILLER_BG, |cell| line_bg(cell.line.tag));

    egui::Frame::default()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(4, 1))
        .show(ui, |ui| {
            ui.set_min_width(width - 8.0);

            let Some(cell) = cell else {
                ui.label("");
                return;
            };

            let prefix = format!("{} {} ", line_number(number), sign(cell.line.tag));
            let job = line_job(ui, &prefix, cell, width - 8.0);
            ui.add(egui::Label::new(job).wrap());
        });
}

fn render_inline_cell(ui: &mut Ui, cell: &Cell<'_>, width: f32) {
    egui::Frame::default()
        .fill(line_bg(cell.line.tag))
        .inner_margin(egui::Margin::symmetric(4, 1))
        .show(ui, |ui| {
            ui.set_min_width(width - 8.0);

            let prefix = format!(
                "{} {} {} ",
                line_number(cell.line.old_index),
                line_number(cell.line.new_index),
                sign(cell.line.tag)
            );
            let job = line_job(ui, &prefix, cell, width - 8.0);
            ui.add(egui::Label::new(job).wrap());
        });
}

/// Gutter prefix in a weak color followed by the syntax-colored content
fn line_job(ui: &Ui, prefix: &str, cell: &Cell<'_>, wrap_width: f32) -> LayoutJob {
    let font_id = TextStyle::Monospace.resolve(ui.style());
    let base_color = ui.visuals().text_color();
    let emphasis_bg = match cell.line.tag {
        LineTag::Removed => REMOVED_WORD_BG,
        LineTag::Added => ADDED_WORD_BG,
        LineTag::Equal => Color32::TRANSPARENT,
    };

    let mut job = LayoutJob::default();
    let gutter_color = base_color.gamma_multiply(0.5);
    job.append(
        prefix,
        0.0,
        text_format(&font_id, gutter_color, Color32::TRANSPARENT),
    );

    let content = cell.line.content.as_str();
    for segment in overlay(content.len(), cell.spans, &cell.emphasis, base_color) {
        let Some(text) = content.get(segment.range.clone()) else {
            continue;
        };
        let background = if segment.emphasized {
            emphasis_bg
        } else {
            Color32::TRANSPARENT
        };
        job.append(text, 0.0, text_format(&font_id, segment.color, background));
    }

    job.wrap.max_width = wrap_width;
    job
}

fn text_format(font_id: &FontId, color: Color32, background: Color32) -> TextFormat {
    TextFormat {
        font_id: font_id.clone(),
        color,
        background,
        ..Default::default()
    }
}

fn line_bg(tag: LineTag) -> Color32 {
    match tag {
        LineTag::Removed => REMOVED_LINE_BG,
        LineTag::Added => ADDED_LINE_BG,
        LineTag::Equal => Color32::TRANSPARENT,
    }
}

fn sign(tag: LineTag) -> char {
    match tag {
        LineTag::Removed => '-',
        LineTag::Added => '+',
        LineTag::Equal => ' ',
    }
}

fn line_number(index: Option<usize>) -> String {
    index.map_or_else(|| " ".repeat(4), |i| format!("{:>4}", i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::DEFAULT_THEME;
    use crate::workspace::Side;

    fn snapshot(left: &str, right: &str) -> Snapshot {
        Snapshot {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    #[test]
    fn diff_is_reused_until_a_new_snapshot() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let mut view = DiffView::default();

        let render = view.prepare(&snapshot("a\n", "b\n"), 1, Language::PlainText, &highlighter);
        assert_eq!(render.document.stats.added_lines, 1);

        // Same generation: the cached diff stays, whatever is passed in
        let render = view.prepare(&snapshot("a\n", "a\n"), 1, Language::PlainText, &highlighter);
        assert_eq!(render.document.stats.added_lines, 1);

        let render = view.prepare(&snapshot("a\n", "a\n"), 2, Language::PlainText, &highlighter);
        assert_eq!(render.document.stats.added_lines, 0);
    }

    #[test]
    fn prepare_for_follows_the_workspace_snapshot() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let mut view = DiffView::default();
        let mut workspace = DiffWorkspace::default();
        workspace.set_text(Side::Left, "[1]");
        workspace.set_text(Side::Right, "[2]");
        workspace.toggle_diff();

        let stats = view.prepare_for(&workspace, &highlighter);
        assert_eq!((stats.removed_lines, stats.added_lines), (1, 1));

        workspace.toggle_diff();
        workspace.set_text(Side::Right, "[1]");
        workspace.toggle_diff();
        assert_eq!(view.prepare_for(&workspace, &highlighter), DiffStats::default());
    }

    #[test]
    fn spans_line_up_with_diff_lines() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let mut view = DiffView::default();
        let render = view.prepare(
            &snapshot("a\r\u{e9}\n[1]\n", "[1]\n"),
            1,
            Language::Json,
            &highlighter,
        );

        for line in &render.document.lines {
            let spans = render.spans(line, line.old_index.is_some());
            let covered: usize = spans.iter().map(|s| s.range.len()).sum();
            assert_eq!(covered, line.content.len());

            let rebuilt: String = overlay(line.content.len(), spans, &[], Color32::BLACK)
                .iter()
                .filter_map(|segment| line.content.get(segment.range.clone()))
                .collect();
            assert_eq!(rebuilt, line.content);
        }
        assert!(render.document.lines.iter().any(|line| line.content == "\u{e9}"));
    }

    #[test]
    fn language_change_rehighlights() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let mut view = DiffView::default();
        let snap = snapshot("{\"a\": 1}", "{\"a\": 2}");

        let plain = view.prepare(&snap, 1, Language::PlainText, &highlighter);
        let plain_spans = plain.old_spans.clone();
        let json = view.prepare(&snap, 1, Language::Json, &highlighter);
        assert_eq!(json.language, Language::Json);
        assert!(json.old_spans[0].len() > plain_spans[0].len());
    }

    #[test]
    fn paired_cells_emphasize_changed_bytes() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let mut view = DiffView::default();
        let render = view.prepare(
            &snapshot("{\n  \"a\": 1\n}", "{\n  \"a\": 2\n}"),
            1,
            Language::Json,
            &highlighter,
        );

        let DiffRow::Pair(removed, added) = &render.document.rows[1] else {
            panic!("expected a changed block");
        };
        let (left, right) = paired_cells(render, removed.first(), added.first());
        assert_eq!(left.unwrap().emphasis, vec![7..8]);
        assert_eq!(right.unwrap().emphasis, vec![7..8]);

        let (left, right) = paired_cells(render, removed.first(), None);
        assert!(left.unwrap().emphasis.is_empty());
        assert!(right.is_none());
    }

    #[test]
    fn gutter_formatting() {
        assert_eq!(line_number(Some(0)), "   1");
        assert_eq!(line_number(None), "    ");
        assert_eq!(sign(LineTag::Added), '+');
        assert_eq!(sign(LineTag::Removed), '-');
    }
}
