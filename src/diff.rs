use similar::{ChangeTag, TextDiff};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    Equal,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: LineTag,
    /// Zero-based line index in the original text
    pub old_index: Option<usize>,
    /// Zero-based line index in the modified text
    pub new_index: Option<usize>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
    Unchanged(DiffLine),
    /// A block of removed lines followed by the block of added lines replacing it.
    /// Either side may be empty.
    Pair(Vec<DiffLine>, Vec<DiffLine>),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub added_lines: usize,
    pub removed_lines: usize,
    pub added_chars: usize,
    pub removed_chars: usize,
}

/// A computed line diff between the original and modified texts
#[derive(Debug, Clone)]
pub struct DiffDocument {
    pub lines: Vec<DiffLine>,
    pub rows: Vec<DiffRow>,
    pub stats: DiffStats,
}

impl DiffDocument {
    pub fn compute(old: &str, new: &str) -> Self {
        let lines = compute_diff(old, new);
        let rows = group_into_rows(&lines);
        let stats = calculate_stats(&rows);
        Self { lines, rows, stats }
    }

    pub fn is_identical(&self) -> bool {
        self.lines.iter().all(|line| line.tag == LineTag::Equal)
    }

    /// Content of the original text's lines, in order, as the diff split them
    pub fn old_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|line| line.old_index.is_some())
            .map(|line| line.content.as_str())
    }

    /// Content of the modified text's lines, in order, as the diff split them
    pub fn new_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|line| line.new_index.is_some())
            .map(|line| line.content.as_str())
    }
}

/// Compute line-based diff between old and new text
pub fn compute_diff(old: &str, new: &str) -> Vec<DiffLine> {
    let diff = TextDiff::from_lines(old, new);

    diff.iter_all_changes()
        .map(|change| DiffLine {
            tag: match change.tag() {
                ChangeTag::Delete => LineTag::Removed,
                ChangeTag::Insert => LineTag::Added,
                ChangeTag::Equal => LineTag::Equal,
            },
            old_index: change.old_index(),
            new_index: change.new_index(),
            content: change.value().trim_end_matches(['\n', '\r']).to_string(),
        })
        .collect()
}

/// Group raw diff lines into rows where unchanged lines are single rows,
/// and contiguous removed/added blocks become paired rows.
pub fn group_into_rows(diff_lines: &[DiffLine]) -> Vec<DiffRow> {
    let mut rows = Vec::new();
    let mut i = 0usize;

    while i < diff_lines.len() {
        match diff_lines[i].tag {
            LineTag::Equal => {
                rows.push(DiffRow::Unchanged(diff_lines[i].clone()));
                i += 1;
            }
            LineTag::Removed | LineTag::Added => {
                let mut removed = Vec::new();
                while i < diff_lines.len() && diff_lines[i].tag == LineTag::Removed {
                    removed.push(diff_lines[i].clone());
                    i += 1;
                }

                let mut added = Vec::new();
                while i < diff_lines.len() && diff_lines[i].tag == LineTag::Added {
                    added.push(diff_lines[i].clone());
                    i += 1;
                }

                rows.push(DiffRow::Pair(removed, added));
            }
        }
    }

    rows
}

/// Count changed lines, and changed characters within each paired block
pub fn calculate_stats(rows: &[DiffRow]) -> DiffStats {
    let mut stats = DiffStats::default();

    for row in rows {
        if let DiffRow::Pair(left, right) = row {
            stats.removed_lines += left.len();
            stats.added_lines += right.len();

            let left_str = join_block(left);
            let right_str = join_block(right);

            let diff = TextDiff::from_chars(&left_str, &right_str);
            for change in diff.iter_all_changes() {
                match change.tag() {
                    ChangeTag::Insert => stats.added_chars += change.value().chars().count(),
                    ChangeTag::Delete => stats.removed_chars += change.value().chars().count(),
                    ChangeTag::Equal => {}
                }
            }
        }
    }

    stats
}

fn join_block(block: &[DiffLine]) -> String {
    block
        .iter()
        .map(|line| line.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte ranges that differ between two paired lines, as (in old, in new)
///
/// Adjacent changed characters are merged into a single range.
pub fn inline_changes(old: &str, new: &str) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let diff = TextDiff::from_chars(old, new);
    let mut removed = Vec::new();
    let mut added = Vec::new();
    let (mut old_pos, mut new_pos) = (0usize, 0usize);

    for change in diff.iter_all_changes() {
        let len = change.value().len();
        match change.tag() {
            ChangeTag::Equal => {
                old_pos += len;
                new_pos += len;
            }
            ChangeTag::Delete => {
                push_merged(&mut removed, old_pos..old_pos + len);
                old_pos += len;
            }
            ChangeTag::Insert => {
                push_merged(&mut added, new_pos..new_pos + len);
                new_pos += len;
            }
        }
    }

    (removed, added)
}

fn push_merged(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    match ranges.last_mut() {
        Some(last) if last.end == range.start => last.end = range.end,
        _ => ranges.push(range),
    }
}
