//! Editor state shared by the toolbar, the two text panels and the diff view

use crate::constant::{DEFAULT_VISIBLE_LINES, LINE_HEIGHT, MAX_VISIBLE_LINES, MIN_VISIBLE_LINES};
use crate::language::Language;
use crate::seed::{self, Seed};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Original",
            Side::Right => "Modified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DiffMode {
    #[default]
    SideBySide,
    Inline,
}

impl DiffMode {
    pub const ALL: [DiffMode; 2] = [DiffMode::SideBySide, DiffMode::Inline];

    pub fn name(self) -> &'static str {
        match self {
            DiffMode::SideBySide => "Side by Side",
            DiffMode::Inline => "Inline",
        }
    }
}

impl fmt::Display for DiffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The texts captured by the last "Show Diff"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone)]
pub struct DiffWorkspace {
    left_text: String,
    right_text: String,
    num_lines: u32,
    diff_mode: DiffMode,
    language: Language,
    diff_visible: bool,
    snapshot: Snapshot,
    /// Bumped every time a new snapshot is taken
    generation: u64,
}

impl Default for DiffWorkspace {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE_LINES, Language::default(), DiffMode::default())
    }
}

impl DiffWorkspace {
    pub fn new(num_lines: u32, language: Language, diff_mode: DiffMode) -> Self {
        let mut workspace = Self {
            left_text: String::new(),
            right_text: String::new(),
            num_lines: DEFAULT_VISIBLE_LINES,
            diff_mode,
            language,
            diff_visible: false,
            snapshot: Snapshot::default(),
            generation: 0,
        };
        workspace.set_num_lines(i64::from(num_lines));
        workspace
    }

    /// Seed the initial texts from a query string, once at startup
    pub fn seed_from_query(&mut self, query: &str) {
        self.apply_seed(seed::parse_query(query));
    }

    pub fn apply_seed(&mut self, seed: Seed) {
        if let Some(left) = seed.left {
            self.left_text = left;
        }
        if let Some(right) = seed.right {
            self.right_text = right;
        }
    }

    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_text,
            Side::Right => &self.right_text,
        }
    }

    pub fn set_text(&mut self, side: Side, value: impl Into<String>) {
        let value = value.into();
        match side {
            Side::Left => self.left_text = value,
            Side::Right => self.right_text = value,
        }
    }

    pub fn clear(&mut self, side: Side) {
        self.set_text(side, String::new());
    }

    /// Both texts at once, for binding the two panels in the same frame
    pub fn texts_mut(&mut self) -> (&mut String, &mut String) {
        (&mut self.left_text, &mut self.right_text)
    }

    /// Flip between edit and diff mode, returning the new visibility
    ///
    /// Only the edit -> diff transition captures a snapshot; going back to edit
    /// mode leaves the previous snapshot in place.
    pub fn toggle_diff(&mut self) -> bool {
        self.diff_visible = !self.diff_visible;
        if self.diff_visible {
            self.snapshot = Snapshot {
                left: self.left_text.clone(),
                right: self.right_text.clone(),
            };
            self.generation += 1;
        }
        self.diff_visible
    }

    pub fn diff_visible(&self) -> bool {
        self.diff_visible
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_num_lines(&mut self, n: i64) {
        self.num_lines = n.clamp(i64::from(MIN_VISIBLE_LINES), i64::from(MAX_VISIBLE_LINES)) as u32;
    }

    pub fn num_lines(&self) -> u32 {
        self.num_lines
    }

    /// Panel height in points for the current line count
    pub fn editor_height(&self) -> f32 {
        self.num_lines as f32 * LINE_HEIGHT
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_diff_mode(&mut self, diff_mode: DiffMode) {
        self.diff_mode = diff_mode;
    }

    pub fn diff_mode(&self) -> DiffMode {
        self.diff_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_lines_is_clamped() {
        let mut ws = DiffWorkspace::default();
        assert_eq!(ws.num_lines(), 25);

        ws.set_num_lines(3);
        assert_eq!(ws.num_lines(), 10);
        ws.set_num_lines(-40);
        assert_eq!(ws.num_lines(), 10);
        ws.set_num_lines(51);
        assert_eq!(ws.num_lines(), 50);
        ws.set_num_lines(i64::MAX);
        assert_eq!(ws.num_lines(), 50);
        ws.set_num_lines(30);
        assert_eq!(ws.num_lines(), 30);
        assert_eq!(ws.editor_height(), 30.0 * LINE_HEIGHT);
    }

    #[test]
    fn constructor_clamps_configured_line_count() {
        let ws = DiffWorkspace::new(200, Language::Yaml, DiffMode::Inline);
        assert_eq!(ws.num_lines(), 50);
        assert_eq!(ws.language(), Language::Yaml);
        assert_eq!(ws.diff_mode(), DiffMode::Inline);
    }

    #[test]
    fn snapshot_is_taken_only_when_showing() {
        let mut ws = DiffWorkspace::default();
        ws.set_text(Side::Left, "A");
        ws.set_text(Side::Right, "B");

        assert!(ws.toggle_diff());
        assert_eq!(ws.snapshot().left, "A");
        assert_eq!(ws.snapshot().right, "B");

        // Edits after showing do not reach the snapshot
        ws.set_text(Side::Left, "C");
        assert_eq!(ws.snapshot().left, "A");

        // Hiding keeps the stale snapshot
        assert!(!ws.toggle_diff());
        assert_eq!(ws.snapshot().left, "A");
        assert_eq!(ws.generation(), 1);

        // Showing again takes a fresh one
        assert!(ws.toggle_diff());
        assert_eq!(ws.snapshot().left, "C");
        assert_eq!(ws.snapshot().right, "B");
        assert_eq!(ws.generation(), 2);
    }

    #[test]
    fn mode_and_language_do_not_touch_snapshot() {
        let mut ws = DiffWorkspace::default();
        ws.set_text(Side::Left, "x");
        ws.toggle_diff();
        let before = ws.snapshot().clone();

        ws.set_diff_mode(DiffMode::Inline);
        ws.set_language(Language::PlainText);
        assert_eq!(ws.diff_mode(), DiffMode::Inline);
        assert_eq!(ws.language(), Language::PlainText);
        assert_eq!(ws.snapshot(), &before);
        assert_eq!(ws.generation(), 1);
        assert!(ws.diff_visible());
    }

    #[test]
    fn seeding_from_query_pretty_prints() {
        let mut ws = DiffWorkspace::default();
        ws.seed_from_query("?left=%7B%22a%22%3A1%7D&right=%7B%22a%22%3A2%7D");
        assert_eq!(ws.text(Side::Left), "{\n  \"a\": 1\n}");
        assert_eq!(ws.text(Side::Right), "{\n  \"a\": 2\n}");
    }

    #[test]
    fn malformed_seed_leaves_side_empty() {
        let mut ws = DiffWorkspace::default();
        ws.seed_from_query("?left=%7B&right=%5B%5D");
        assert_eq!(ws.text(Side::Left), "");
        assert_eq!(ws.text(Side::Right), "[]");
    }

    #[test]
    fn clear_and_texts_mut() {
        let mut ws = DiffWorkspace::default();
        {
            let (left, right) = ws.texts_mut();
            left.push_str("left");
            right.push_str("right");
        }
        assert_eq!(ws.text(Side::Left), "left");
        ws.clear(Side::Right);
        assert_eq!(ws.text(Side::Right), "");
    }
}
