//! Edit scripts: line-range hunks describing how side A becomes side B.
//!
//! Coordinates are 0-based line indices with exclusive ends. A REPLACE
//! hunk may carry internal edits that locate changed characters inside
//! the hunk's lines.

use crate::error::{DiffError, DiffResult};

/// Classification of an [`Edit`], derived from its ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Lines present only in B.
    Insert,
    /// Lines present only in A.
    Delete,
    /// Lines of A replaced by lines of B.
    Replace,
    /// Both ranges empty; carries no change.
    Empty,
}

/// A hunk-relative text position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPos {
    /// Line index counted from the first line of the hunk.
    pub line: usize,
    /// Character column within that line.
    pub column: usize,
}

impl TextPos {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A character-level sub-edit inside a REPLACE hunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InternalEdit {
    pub begin_a: TextPos,
    pub end_a: TextPos,
    pub begin_b: TextPos,
    pub end_b: TextPos,
}

impl InternalEdit {
    pub const fn new(begin_a: TextPos, end_a: TextPos, begin_b: TextPos, end_b: TextPos) -> Self {
        Self {
            begin_a,
            end_a,
            begin_b,
            end_b,
        }
    }

    /// Sub-edit confined to the first line of the hunk on both sides.
    pub const fn on_first_line(begin_a: usize, end_a: usize, begin_b: usize, end_b: usize) -> Self {
        Self::new(
            TextPos::new(0, begin_a),
            TextPos::new(0, end_a),
            TextPos::new(0, begin_b),
            TextPos::new(0, end_b),
        )
    }
}

/// A contiguous line-range hunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub begin_a: usize,
    pub end_a: usize,
    pub begin_b: usize,
    pub end_b: usize,
    /// Intraline sub-edits; only meaningful on REPLACE hunks.
    pub internal: Option<Vec<InternalEdit>>,
}

impl Edit {
    pub fn new(begin_a: usize, end_a: usize, begin_b: usize, end_b: usize) -> Self {
        Self {
            begin_a,
            end_a,
            begin_b,
            end_b,
            internal: None,
        }
    }

    /// Lines `[begin_b, end_b)` of B inserted before line `at_a` of A.
    pub fn insert(at_a: usize, begin_b: usize, end_b: usize) -> Self {
        Self::new(at_a, at_a, begin_b, end_b)
    }

    /// Lines `[begin_a, end_a)` of A removed before line `at_b` of B.
    pub fn delete(begin_a: usize, end_a: usize, at_b: usize) -> Self {
        Self::new(begin_a, end_a, at_b, at_b)
    }

    pub fn replace(begin_a: usize, end_a: usize, begin_b: usize, end_b: usize) -> Self {
        Self::new(begin_a, end_a, begin_b, end_b)
    }

    /// Attach intraline sub-edits.
    pub fn with_internal(mut self, internal: Vec<InternalEdit>) -> Self {
        self.internal = Some(internal);
        self
    }

    pub fn kind(&self) -> EditKind {
        match (self.begin_a < self.end_a, self.begin_b < self.end_b) {
            (false, true) => EditKind::Insert,
            (true, false) => EditKind::Delete,
            (true, true) => EditKind::Replace,
            (false, false) => EditKind::Empty,
        }
    }

    pub fn len_a(&self) -> usize {
        self.end_a.saturating_sub(self.begin_a)
    }

    pub fn len_b(&self) -> usize {
        self.end_b.saturating_sub(self.begin_b)
    }
}

/// Check that `edits` is a well-formed script over files of `size_a` and
/// `size_b` lines.
///
/// Empty edits are permitted (the assembler drops them), but every other
/// edit must lie within the files and start at or after the end of its
/// predecessor in both spaces. Internal edits are only allowed on REPLACE
/// hunks and must be ordered. Their positions must fall on a line of the
/// hunk or at the very start of the line after it; columns are not checked
/// because only the line counts are known here (see
/// [`validate_edits_against`]).
pub fn validate_edits(edits: &[Edit], size_a: usize, size_b: usize) -> DiffResult<()> {
    let malformed = |index: usize, reason: String| DiffError::MalformedEditScript { index, reason };

    let mut last_a = 0usize;
    let mut last_b = 0usize;

    for (index, edit) in edits.iter().enumerate() {
        if edit.begin_a > edit.end_a || edit.begin_b > edit.end_b {
            return Err(malformed(index, "inverted range".into()));
        }
        if edit.kind() == EditKind::Empty {
            continue;
        }
        if edit.end_a > size_a {
            return Err(malformed(
                index,
                format!("A range ends at {} past {} lines", edit.end_a, size_a),
            ));
        }
        if edit.end_b > size_b {
            return Err(malformed(
                index,
                format!("B range ends at {} past {} lines", edit.end_b, size_b),
            ));
        }
        if edit.begin_a < last_a || edit.begin_b < last_b {
            return Err(malformed(index, "overlaps or precedes previous edit".into()));
        }
        // The gap before each edit is common text, so it has equal length
        // on both sides.
        if edit.begin_a - last_a != edit.begin_b - last_b {
            return Err(malformed(index, "common gap differs in length between sides".into()));
        }

        if let Some(internal) = &edit.internal {
            if edit.kind() != EditKind::Replace {
                return Err(malformed(index, "internal edits on a non-replace hunk".into()));
            }
            let (lines_a, lines_b) = (edit.len_a(), edit.len_b());
            validate_internal(
                internal,
                |pos| within_lines(pos, lines_a),
                |pos| within_lines(pos, lines_b),
            )
            .map_err(|reason| malformed(index, reason))?;
        }

        last_a = edit.end_a;
        last_b = edit.end_b;
    }

    if size_a - last_a != size_b - last_b {
        return Err(malformed(edits.len(), "trailing common text differs in length".into()));
    }

    Ok(())
}

/// Like [`validate_edits`], but also checks every internal edit column
/// against the text of its hunk.
///
/// `lines_a` and `lines_b` hold every line of each file, with or without a
/// trailing `'\n'`. A line spans its characters plus one newline, so a
/// column may run up to the line's length plus one.
pub fn validate_edits_against(
    edits: &[Edit],
    lines_a: &[&str],
    lines_b: &[&str],
) -> DiffResult<()> {
    validate_edits(edits, lines_a.len(), lines_b.len())?;

    for (index, edit) in edits.iter().enumerate() {
        // Internal edits on empty hunks are ignored, like the hunks themselves.
        let internal = match &edit.internal {
            Some(internal) if edit.kind() == EditKind::Replace => internal,
            _ => continue,
        };
        let widths_a = line_widths(&lines_a[edit.begin_a..edit.end_a]);
        let widths_b = line_widths(&lines_b[edit.begin_b..edit.end_b]);
        validate_internal(
            internal,
            |pos| within_text(pos, &widths_a),
            |pos| within_text(pos, &widths_b),
        )
        .map_err(|reason| DiffError::MalformedEditScript { index, reason })?;
    }
    Ok(())
}

/// Character count of each line including its newline.
fn line_widths(lines: &[&str]) -> Vec<usize> {
    lines
        .iter()
        .map(|line| line.strip_suffix('\n').unwrap_or(line).chars().count() + 1)
        .collect()
}

fn within_lines(pos: TextPos, lines: usize) -> bool {
    pos.line < lines || (pos.line == lines && pos.column == 0)
}

fn within_text(pos: TextPos, widths: &[usize]) -> bool {
    match widths.get(pos.line) {
        Some(&width) => pos.column <= width,
        None => pos.line == widths.len() && pos.column == 0,
    }
}

fn validate_internal(
    internal: &[InternalEdit],
    fits_a: impl Fn(TextPos) -> bool,
    fits_b: impl Fn(TextPos) -> bool,
) -> Result<(), String> {
    let mut prev_a = TextPos::default();
    let mut prev_b = TextPos::default();
    for ie in internal {
        if ie.begin_a > ie.end_a || ie.begin_b > ie.end_b {
            return Err("inverted internal edit".into());
        }
        if ie.begin_a < prev_a || ie.begin_b < prev_b {
            return Err("internal edits out of order".into());
        }
        if ![ie.begin_a, ie.end_a].into_iter().all(&fits_a)
            || ![ie.begin_b, ie.end_b].into_iter().all(&fits_b)
        {
            return Err("internal edit outside hunk".into());
        }
        prev_a = ie.end_a;
        prev_b = ie.end_b;
    }
    Ok(())
}
