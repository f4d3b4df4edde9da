//! The renderable output of the assembler.

/// A highlighted character range within a REPLACE hunk.
///
/// `offset` counts characters from the start of the hunk's text, where every
/// line contributes its length plus one for the implicit newline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
}

impl Span {
    pub const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }
}

/// One segment of an assembled diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffEntry {
    /// Lines identical and loaded on both sides.
    Common(Vec<String>),
    /// Common lines that exist on both sides but were not materialized.
    Skip(usize),
    /// Lines present only in A.
    OnlyA(Vec<String>),
    /// Lines present only in B.
    OnlyB(Vec<String>),
    /// Lines of A replaced by lines of B, optionally with intraline spans.
    Replace {
        a: Vec<String>,
        b: Vec<String>,
        edit_a: Option<Vec<Span>>,
        edit_b: Option<Vec<Span>>,
    },
}

impl DiffEntry {
    /// Replacement without intraline data.
    pub fn replace(a: Vec<String>, b: Vec<String>) -> Self {
        DiffEntry::Replace {
            a,
            b,
            edit_a: None,
            edit_b: None,
        }
    }

    /// Number of side-A lines this entry accounts for.
    pub fn lines_a(&self) -> usize {
        match self {
            DiffEntry::Common(lines) | DiffEntry::OnlyA(lines) => lines.len(),
            DiffEntry::Skip(count) => *count,
            DiffEntry::OnlyB(_) => 0,
            DiffEntry::Replace { a, .. } => a.len(),
        }
    }

    /// Number of side-B lines this entry accounts for.
    pub fn lines_b(&self) -> usize {
        match self {
            DiffEntry::Common(lines) | DiffEntry::OnlyB(lines) => lines.len(),
            DiffEntry::Skip(count) => *count,
            DiffEntry::OnlyA(_) => 0,
            DiffEntry::Replace { b, .. } => b.len(),
        }
    }

    /// Returns `true` for entries that represent a change.
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            DiffEntry::OnlyA(_) | DiffEntry::OnlyB(_) | DiffEntry::Replace { .. }
        )
    }
}

/// Line counts over an assembled diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Lines only in B, including the B side of replacements.
    pub insertions: usize,
    /// Lines only in A, including the A side of replacements.
    pub deletions: usize,
    /// Common lines shown.
    pub common: usize,
    /// Common lines elided.
    pub skipped: usize,
}

impl DiffSummary {
    pub fn of(entries: &[DiffEntry]) -> Self {
        let mut s = Self::default();
        for entry in entries {
            match entry {
                DiffEntry::Common(lines) => s.common += lines.len(),
                DiffEntry::Skip(count) => s.skipped += count,
                DiffEntry::OnlyA(lines) => s.deletions += lines.len(),
                DiffEntry::OnlyB(lines) => s.insertions += lines.len(),
                DiffEntry::Replace { a, b, .. } => {
                    s.deletions += a.len();
                    s.insertions += b.len();
                }
            }
        }
        s
    }

    /// Returns `true` if the diff contains no changes.
    pub fn is_unchanged(&self) -> bool {
        self.insertions == 0 && self.deletions == 0
    }
}
