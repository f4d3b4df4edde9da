//! The diff assembler: walks an edit script against two sparse line stores
//! and emits an ordered sequence of [`DiffEntry`] values.
//!
//! Two cursors, one per side, track how far each file has been consumed.
//! Before every edit the common text in front of it is flushed as
//! [`DiffEntry::Common`] runs (for loaded lines) and [`DiffEntry::Skip`]
//! runs (for lines the store never materialized). After the last edit the
//! trailing common text is flushed the same way.
//!
//! # Invariants
//!
//! - After flushing, both cursors sit exactly at the edit's begin
//!   coordinates. Anything else means the edit script does not describe the
//!   supplied content, and assembly stops with
//!   [`DiffError::InvariantViolation`].
//! - Common text has equal length on both sides, so every line consumed on
//!   side A during a flush advances side B by one as well.
//! - Every line inside an edit range is loaded.

use tracing::{debug, warn};

use crate::edit::{Edit, EditKind, InternalEdit, TextPos};
use crate::entry::{DiffEntry, Span};
use crate::error::{DiffError, DiffResult, Side};
use crate::sparse::SparseLines;

/// Receiver of assembled entries, in emission order.
///
/// Renderers implement this to stream output without an intermediate list.
/// When assembly fails the sink may hold a partial diff; callers must
/// discard it.
pub trait DiffSink {
    fn push(&mut self, entry: DiffEntry);
}

impl DiffSink for Vec<DiffEntry> {
    fn push(&mut self, entry: DiffEntry) {
        Vec::push(self, entry);
    }
}

/// Assemble `edits` over the two stores into a list of entries.
///
/// # Examples
///
/// ```
/// use hunkview_diff::{assemble, DiffEntry, Edit, SparseFileContent};
///
/// let a = SparseFileContent::full(["a", "b"]);
/// let b = SparseFileContent::full(["a"]);
/// let entries = assemble(&[Edit::delete(1, 2, 1)], &a, &b).unwrap();
/// assert_eq!(
///     entries,
///     vec![
///         DiffEntry::Common(vec!["a".into()]),
///         DiffEntry::OnlyA(vec!["b".into()]),
///     ]
/// );
/// ```
pub fn assemble<A, B>(edits: &[Edit], a: &A, b: &B) -> DiffResult<Vec<DiffEntry>>
where
    A: SparseLines + ?Sized,
    B: SparseLines + ?Sized,
{
    let mut entries = Vec::new();
    assemble_into(edits, a, b, &mut entries)?;
    Ok(entries)
}

/// Assemble `edits` over the two stores, pushing each entry into `sink`.
///
/// Empty edits are ignored. On error nothing further is pushed.
pub fn assemble_into<A, B, S>(edits: &[Edit], a: &A, b: &B, sink: &mut S) -> DiffResult<()>
where
    A: SparseLines + ?Sized,
    B: SparseLines + ?Sized,
    S: DiffSink + ?Sized,
{
    debug!(edits = edits.len(), size_a = a.size(), size_b = b.size(), "assembling diff");

    let mut asm = Assembler {
        a,
        b,
        sink,
        next_a: 0,
        next_b: 0,
        emitted: 0,
    };

    for edit in edits.iter().filter(|e| e.kind() != EditKind::Empty) {
        asm.emit_common(edit.begin_a);
        asm.check_position(edit)?;
        asm.emit_edit(edit)?;
    }
    asm.emit_common(a.size());

    debug!(entries = asm.emitted, "diff assembled");
    Ok(())
}

struct Assembler<'s, A: ?Sized, B: ?Sized, S: ?Sized> {
    a: &'s A,
    b: &'s B,
    sink: &'s mut S,
    next_a: usize,
    next_b: usize,
    emitted: usize,
}

impl<A, B, S> Assembler<'_, A, B, S>
where
    A: SparseLines + ?Sized,
    B: SparseLines + ?Sized,
    S: DiffSink + ?Sized,
{
    fn push(&mut self, entry: DiffEntry) {
        self.emitted += 1;
        self.sink.push(entry);
    }

    /// Flush common text on side A up to `target`, never past the end of A.
    ///
    /// Loaded-ness is decided by `get` alone, and every pass advances the
    /// cursor by at least one line, so a store whose `contains` or `next`
    /// disagrees with `get` cannot stall the flush.
    fn emit_common(&mut self, target: usize) {
        let end = target.min(self.a.size());

        while self.next_a < end {
            if self.a.get(self.next_a).is_some() {
                let mut lines = Vec::new();
                while self.next_a < end {
                    match self.a.get(self.next_a) {
                        Some(line) => lines.push(line.to_owned()),
                        None => break,
                    }
                    self.next_a += 1;
                    self.next_b += 1;
                }
                self.push(DiffEntry::Common(lines));
            } else {
                let boundary = self.a.next(self.next_a).clamp(self.next_a + 1, end);
                let count = boundary - self.next_a;
                self.next_a = boundary;
                self.next_b += count;
                self.push(DiffEntry::Skip(count));
            }
        }
    }

    fn check_position(&self, edit: &Edit) -> DiffResult<()> {
        for (side, expected, actual) in [
            (Side::A, edit.begin_a, self.next_a),
            (Side::B, edit.begin_b, self.next_b),
        ] {
            if expected != actual {
                warn!(%side, expected, actual, "edit script does not match file content");
                return Err(DiffError::InvariantViolation {
                    side,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn emit_edit(&mut self, edit: &Edit) -> DiffResult<()> {
        match edit.kind() {
            EditKind::Delete => {
                let lines = take_lines(self.a, Side::A, self.next_a, edit.end_a)?;
                self.next_a = edit.end_a;
                self.push(DiffEntry::OnlyA(lines));
            }
            EditKind::Insert => {
                let lines = take_lines(self.b, Side::B, self.next_b, edit.end_b)?;
                self.next_b = edit.end_b;
                self.push(DiffEntry::OnlyB(lines));
            }
            EditKind::Replace => {
                let a = take_lines(self.a, Side::A, self.next_a, edit.end_a)?;
                let b = take_lines(self.b, Side::B, self.next_b, edit.end_b)?;
                let (edit_a, edit_b) = match &edit.internal {
                    Some(internal) => {
                        let (ea, eb) = intraline_spans(internal, &a, &b);
                        (Some(ea), Some(eb))
                    }
                    None => (None, None),
                };
                self.next_a = edit.end_a;
                self.next_b = edit.end_b;
                self.push(DiffEntry::Replace {
                    a,
                    b,
                    edit_a,
                    edit_b,
                });
            }
            kind @ EditKind::Empty => {
                warn!(?kind, "unsupported edit kind reached dispatch");
                return Err(DiffError::UnsupportedEditKind(kind));
            }
        }
        Ok(())
    }
}

fn take_lines<L>(store: &L, side: Side, begin: usize, end: usize) -> DiffResult<Vec<String>>
where
    L: SparseLines + ?Sized,
{
    (begin..end)
        .map(|line| {
            store
                .get(line)
                .map(str::to_owned)
                .ok_or(DiffError::LineNotLoaded { side, line })
        })
        .collect()
}

/// Translate hunk-relative sub-edits into `(offset, length)` spans on each
/// side. A side only gets a span when its range is non-empty.
fn intraline_spans(
    internal: &[InternalEdit],
    a: &[String],
    b: &[String],
) -> (Vec<Span>, Vec<Span>) {
    let starts_a = line_starts(a);
    let starts_b = line_starts(b);

    let mut edit_a = Vec::new();
    let mut edit_b = Vec::new();
    for ie in internal {
        if let Some(span) = span_between(&starts_a, ie.begin_a, ie.end_a) {
            edit_a.push(span);
        }
        if let Some(span) = span_between(&starts_b, ie.begin_b, ie.end_b) {
            edit_b.push(span);
        }
    }
    (edit_a, edit_b)
}

/// Character offset of each line start; the final element is the total
/// length of the hunk text.
fn line_starts(lines: &[String]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(lines.len() + 1);
    let mut offset = 0;
    starts.push(offset);
    for line in lines {
        offset += line.chars().count() + 1;
        starts.push(offset);
    }
    starts
}

fn span_between(starts: &[usize], begin: TextPos, end: TextPos) -> Option<Span> {
    let total = starts.last().copied().unwrap_or(0);
    let offset_of = |pos: TextPos| starts.get(pos.line).copied().unwrap_or(total) + pos.column;

    let begin = offset_of(begin);
    let end = offset_of(end);
    (end > begin).then(|| Span::new(begin, end - begin))
}
