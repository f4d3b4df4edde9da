//! Edit script computation.
//!
//! Uses the `similar` crate for the line-level diff and again, over the
//! characters of each replaced hunk, for intraline sub-edits.

use std::ops::Range;

use hunkview_diff::{Edit, EditKind, InternalEdit, TextPos};
use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::config::DiffConfig;

/// Split text into logical lines, each keeping its `'\n'` (and any `'\r'`
/// before it). Only the last line may lack a terminator.
///
/// Lines are compared with their terminators, so CRLF against LF text and a
/// missing final newline both show up as changes.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// A line as stored and rendered: without its `'\n'`. A `'\r'` stays.
pub fn display_line(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

/// Compute the line-level edit script between `old` and `new`.
///
/// Adjacent deletions and insertions are merged into one REPLACE hunk. When
/// intraline is enabled every REPLACE hunk within the size limit carries
/// character-level sub-edits.
pub fn compute_edits(old: &[&str], new: &[&str], config: &DiffConfig) -> Vec<Edit> {
    let ops = capture_diff_slices(config.algorithm.into(), old, new);
    let mut edits = merge_ranges(ops.iter().map(|op| op.as_tag_tuple()))
        .into_iter()
        .map(|(a, b)| Edit::new(a.start, a.end, b.start, b.end))
        .collect::<Vec<_>>();

    if config.intraline {
        for edit in edits.iter_mut().filter(|e| e.kind() == EditKind::Replace) {
            let a = &old[edit.begin_a..edit.end_a];
            let b = &new[edit.begin_b..edit.end_b];
            edit.internal = intraline(a, b, config.intraline_max_chars);
        }
    }
    edits
}

/// Collapse non-equal ops into maximal hunks; ops that touch in both
/// spaces belong to the same hunk.
fn merge_ranges(
    ops: impl Iterator<Item = (DiffTag, Range<usize>, Range<usize>)>,
) -> Vec<(Range<usize>, Range<usize>)> {
    let mut hunks: Vec<(Range<usize>, Range<usize>)> = Vec::new();
    for (tag, a, b) in ops {
        if tag == DiffTag::Equal {
            continue;
        }
        match hunks.last_mut() {
            Some((la, lb)) if la.end == a.start && lb.end == b.start => {
                la.end = a.end;
                lb.end = b.end;
            }
            _ => hunks.push((a, b)),
        }
    }
    hunks
}

/// Character-level sub-edits between the lines of a replaced hunk.
///
/// Each line contributes its characters plus its newline, if it has one.
/// Returns `None` when either side exceeds `max_chars`.
pub fn intraline(a: &[&str], b: &[&str], max_chars: usize) -> Option<Vec<InternalEdit>> {
    let text_a = HunkText::new(a);
    let text_b = HunkText::new(b);
    if text_a.chars.len() > max_chars || text_b.chars.len() > max_chars {
        return None;
    }

    let ops = capture_diff_slices(Algorithm::Myers, &text_a.chars, &text_b.chars);
    let internal = merge_ranges(ops.iter().map(|op| op.as_tag_tuple()))
        .into_iter()
        .map(|(ra, rb)| {
            InternalEdit::new(
                text_a.pos(ra.start),
                text_a.pos(ra.end),
                text_b.pos(rb.start),
                text_b.pos(rb.end),
            )
        })
        .collect();
    Some(internal)
}

/// The characters of a hunk with each line's starting offset.
struct HunkText {
    chars: Vec<char>,
    starts: Vec<usize>,
}

impl HunkText {
    fn new(lines: &[&str]) -> Self {
        let mut chars = Vec::new();
        let mut starts = Vec::with_capacity(lines.len());
        for line in lines {
            starts.push(chars.len());
            chars.extend(line.chars());
        }
        Self { chars, starts }
    }

    fn pos(&self, offset: usize) -> TextPos {
        let line = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        let column = offset - self.starts.get(line).copied().unwrap_or(0);
        TextPos::new(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_intraline() -> DiffConfig {
        DiffConfig {
            intraline: false,
            ..Default::default()
        }
    }

    #[test]
    fn identical_lines_no_edits() {
        let lines = ["a", "b"];
        assert!(compute_edits(&lines, &lines, &DiffConfig::default()).is_empty());
    }

    #[test]
    fn replace_is_single_hunk() {
        let edits = compute_edits(&["a", "b", "c"], &["a", "x", "c"], &no_intraline());
        assert_eq!(edits, vec![Edit::replace(1, 2, 1, 2)]);
    }

    #[test]
    fn pure_insert_and_delete() {
        let edits = compute_edits(&["a", "c"], &["a", "b", "c"], &no_intraline());
        assert_eq!(edits, vec![Edit::insert(1, 1, 2)]);

        let edits = compute_edits(&["a", "b"], &["a"], &no_intraline());
        assert_eq!(edits, vec![Edit::delete(1, 2, 1)]);
    }

    #[test]
    fn adjacent_delete_and_insert_merge() {
        let hunks = merge_ranges(
            vec![
                (DiffTag::Equal, 0..1, 0..1),
                (DiffTag::Delete, 1..3, 1..1),
                (DiffTag::Insert, 3..3, 1..2),
                (DiffTag::Equal, 3..4, 2..3),
                (DiffTag::Insert, 4..4, 3..4),
            ]
            .into_iter(),
        );
        assert_eq!(hunks, vec![(1..3, 1..2), (4..4, 3..4)]);
    }

    #[test]
    fn intraline_single_character_change() {
        let internal = intraline(&["abcdef\n"], &["abXdef\n"], 100).unwrap();
        assert_eq!(internal, vec![InternalEdit::on_first_line(2, 3, 2, 3)]);
    }

    #[test]
    fn intraline_positions_on_later_lines() {
        let internal = intraline(&["same\n", "old\n"], &["same\n", "olD\n"], 100).unwrap();
        assert_eq!(
            internal,
            vec![InternalEdit::new(
                TextPos::new(1, 2),
                TextPos::new(1, 3),
                TextPos::new(1, 2),
                TextPos::new(1, 3),
            )]
        );
    }

    #[test]
    fn intraline_respects_size_limit() {
        assert!(intraline(&["abcdef"], &["xyz"], 5).is_none());
    }

    #[test]
    fn replace_carries_intraline_by_default() {
        let edits = compute_edits(&["keep", "abc"], &["keep", "abd"], &DiffConfig::default());
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].internal, Some(vec![InternalEdit::on_first_line(2, 3, 2, 3)]));
    }

    #[test]
    fn insert_has_no_intraline() {
        let edits = compute_edits(&["a"], &["a", "b"], &DiffConfig::default());
        assert_eq!(edits, vec![Edit::insert(1, 1, 2)]);
    }

    #[test]
    fn split_lines_keeps_terminators() {
        assert_eq!(split_lines("a\nb\r\nc"), vec!["a\n", "b\r\n", "c"]);
        assert_eq!(split_lines("a\n"), vec!["a\n"]);
        assert!(split_lines("").is_empty());
        assert_eq!(display_line("b\r\n"), "b\r");
        assert_eq!(display_line("c"), "c");
    }

    #[test]
    fn line_endings_are_changes() {
        let old = split_lines("a\r\nb\r\n");
        let new = split_lines("a\nb\n");
        let edits = compute_edits(&old, &new, &DiffConfig::default());
        assert_eq!(edits.len(), 1);
        assert_eq!((edits[0].begin_a, edits[0].end_a), (0, 2));
        // A drops one '\r' per line.
        let p = TextPos::new;
        assert_eq!(
            edits[0].internal,
            Some(vec![
                InternalEdit::new(p(0, 1), p(0, 2), p(0, 1), p(0, 1)),
                InternalEdit::new(p(1, 1), p(1, 2), p(1, 1), p(1, 1)),
            ])
        );
    }

    #[test]
    fn missing_final_newline_is_a_change() {
        let old = split_lines("a\nb");
        let new = split_lines("a\nb\n");
        let edits = compute_edits(&old, &new, &DiffConfig::default());
        // Only the newline itself differs.
        assert_eq!(
            edits,
            vec![Edit::replace(1, 2, 1, 2).with_internal(vec![InternalEdit::new(
                TextPos::new(0, 1),
                TextPos::new(0, 1),
                TextPos::new(0, 1),
                TextPos::new(0, 2),
            )])]
        );
    }
}
