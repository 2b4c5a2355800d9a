//! Syntax highlighting backed by syntect's bundled grammars and themes

use crate::language::Language;
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};
use std::ops::Range;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::warn;
use xxhash_rust::xxh64::xxh64;

/// A colored byte range within one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub color: Color32,
}

/// A piece of a rendered diff line: syntax color plus change emphasis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub range: Range<usize>,
    pub color: Color32,
    pub emphasized: bool,
}

pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Load the default grammars and the named theme, falling back to syntect's
    /// default theme if the name is unknown
    pub fn new(theme_name: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.remove(theme_name).unwrap_or_else(|| {
            warn!("Unknown highlight theme '{}', using default", theme_name);
            Theme::default()
        });
        Self { syntax_set, theme }
    }

    fn syntax(&self, language: Language) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_token(language.syntax_token())
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Build a layout job for the whole text, keeping every byte so the job can
    /// back an editable text field
    pub fn layout_job(
        &self,
        text: &str,
        language: Language,
        font_id: &FontId,
        fallback_color: Color32,
    ) -> LayoutJob {
        let mut job = LayoutJob::default();
        let mut highlighter = HighlightLines::new(self.syntax(language), &self.theme);

        for line in LinesWithEndings::from(text) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(tokens) => {
                    for (style, token) in tokens {
                        job.append(token, 0.0, text_format(font_id, to_color(style.foreground)));
                    }
                }
                Err(_) => job.append(line, 0.0, text_format(font_id, fallback_color)),
            }
        }

        job
    }

    /// Colored spans for each of `lines`, with offsets relative to the line.
    /// Lines are highlighted in order so multi-line constructs carry over, and
    /// must not include their line ending.
    pub fn line_spans<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
        language: Language,
    ) -> Vec<Vec<StyledSpan>> {
        let mut highlighter = HighlightLines::new(self.syntax(language), &self.theme);

        lines
            .into_iter()
            .map(|line| {
                // The bundled grammars expect every line to end in a newline
                let terminated = format!("{line}\n");
                let tokens = highlighter
                    .highlight_line(&terminated, &self.syntax_set)
                    .unwrap_or_default();

                let mut spans = Vec::with_capacity(tokens.len());
                let mut pos = 0usize;
                for (style, token) in tokens {
                    let start = pos.min(line.len());
                    pos += token.len();
                    let end = pos.min(line.len());
                    if start < end {
                        spans.push(StyledSpan {
                            range: start..end,
                            color: to_color(style.foreground),
                        });
                    }
                }
                spans
            })
            .collect()
    }
}

/// Per-panel cache of the last highlighted layout
#[derive(Default)]
pub struct HighlightCache {
    key: Option<(u64, Language)>,
    job: LayoutJob,
}

impl HighlightCache {
    pub fn layout_job(
        &mut self,
        highlighter: &Highlighter,
        text: &str,
        language: Language,
        font_id: &FontId,
        fallback_color: Color32,
    ) -> LayoutJob {
        let key = (xxh64(text.as_bytes(), 0), language);
        if self.key != Some(key) {
            self.job = highlighter.layout_job(text, language, font_id, fallback_color);
            self.key = Some(key);
        }
        self.job.clone()
    }
}

/// Split a line of `len` bytes into segments carrying a syntax color and
/// whether they fall inside one of the `emphasis` ranges
pub fn overlay(
    len: usize,
    spans: &[StyledSpan],
    emphasis: &[Range<usize>],
    fallback_color: Color32,
) -> Vec<Segment> {
    let mut bounds = vec![0, len];
    for range in spans.iter().map(|s| &s.range).chain(emphasis) {
        bounds.push(range.start.min(len));
        bounds.push(range.end.min(len));
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut segments: Vec<Segment> = Vec::new();
    for window in bounds.windows(2) {
        let (start, end) = (window[0], window[1]);
        let color = spans
            .iter()
            .find(|s| s.range.contains(&start))
            .map_or(fallback_color, |s| s.color);
        let emphasized = emphasis.iter().any(|r| r.contains(&start));

        match segments.last_mut() {
            Some(last) if last.color == color && last.emphasized == emphasized => {
                last.range.end = end;
            }
            _ => segments.push(Segment {
                range: start..end,
                color,
                emphasized,
            }),
        }
    }

    segments
}

fn text_format(font_id: &FontId, color: Color32) -> TextFormat {
    TextFormat {
        font_id: font_id.clone(),
        color,
        ..Default::default()
    }
}

fn to_color(color: syntect::highlighting::Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::DEFAULT_THEME;

    const RED: Color32 = Color32::from_rgb(200, 0, 0);
    const GRAY: Color32 = Color32::GRAY;

    #[test]
    fn json_resolves_to_json_grammar() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        assert_eq!(highlighter.syntax(Language::Json).name, "JSON");
        assert_eq!(highlighter.syntax(Language::PlainText).name, "Plain Text");
    }

    #[test]
    fn layout_job_keeps_every_byte() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let text = "{\n  \"a\": [1, true, null]\n}\n";
        let job = highlighter.layout_job(text, Language::Json, &FontId::monospace(13.0), GRAY);
        assert_eq!(job.text, text);
        assert!(job.sections.len() > 3);
    }

    #[test]
    fn line_spans_cover_content_without_newlines() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let lines = ["{", "  \"k\u{e9}y\": \"value\"", "}", ""];
        let spans = highlighter.line_spans(lines, Language::Json);
        assert_eq!(spans.len(), 4);

        for (spans, line) in spans.iter().zip(lines) {
            let covered: usize = spans.iter().map(|s| s.range.len()).sum();
            assert_eq!(covered, line.len());
            for span in spans {
                assert!(line.get(span.range.clone()).is_some());
            }
        }
    }

    #[test]
    fn unknown_theme_falls_back() {
        let highlighter = Highlighter::new("no such theme");
        let job = highlighter.layout_job("x", Language::PlainText, &FontId::monospace(13.0), GRAY);
        assert_eq!(job.text, "x");
    }

    #[test]
    fn cache_reuses_layout_until_text_or_language_changes() {
        let highlighter = Highlighter::new(DEFAULT_THEME);
        let font = FontId::monospace(13.0);
        let mut cache = HighlightCache::default();

        let first = cache.layout_job(&highlighter, "[1]", Language::Json, &font, GRAY);
        let key = cache.key;
        let again = cache.layout_job(&highlighter, "[1]", Language::Json, &font, GRAY);
        assert_eq!(first.text, again.text);
        assert_eq!(cache.key, key);

        cache.layout_job(&highlighter, "[1]", Language::PlainText, &font, GRAY);
        assert_ne!(cache.key, key);
    }

    #[test]
    fn overlay_splits_on_span_and_emphasis_edges() {
        let spans = vec![
            StyledSpan { range: 0..4, color: RED },
            StyledSpan { range: 4..8, color: GRAY },
        ];
        let segments = overlay(8, &spans, &[2..6], Color32::BLACK);
        let ranges: Vec<_> = segments.iter().map(|s| (s.range.clone(), s.emphasized)).collect();
        assert_eq!(ranges, vec![(0..2, false), (2..4, true), (4..6, true), (6..8, false)]);
        assert_eq!(segments[1].color, RED);
        assert_eq!(segments[2].color, GRAY);
    }

    #[test]
    fn overlay_without_spans_uses_fallback() {
        let segments = overlay(5, &[], &[], GRAY);
        assert_eq!(
            segments,
            vec![Segment { range: 0..5, color: GRAY, emphasized: false }]
        );
        assert!(overlay(0, &[], &[], GRAY).is_empty());
    }
}
