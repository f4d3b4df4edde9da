//! Plain-text diff export.

use colored::Colorize;
use hunkview_diff::{assemble_into, DiffEntry, DiffSink, Edit, SparseLines};

use crate::error::RenderResult;

/// A [`DiffSink`] writing `-`, `+` and space prefixed lines.
///
/// Skipped regions have no text to show and become a single
/// `@@ <count> common lines skipped @@` marker.
#[derive(Debug, Default)]
pub struct TextSink {
    out: String,
    color: bool,
}

impl TextSink {
    pub fn new(color: bool) -> Self {
        Self {
            out: String::new(),
            color,
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn write(&mut self, line: String) {
        if self.color {
            let painted = match line.chars().next() {
                Some('-') => line.red(),
                Some('+') => line.green(),
                Some('@') => line.cyan(),
                _ => line.normal(),
            };
            self.out.push_str(&painted.to_string());
        } else {
            self.out.push_str(&line);
        }
        self.out.push('\n');
    }

    fn lines(&mut self, prefix: char, lines: &[String]) {
        for text in lines {
            self.write(format!("{prefix}{text}"));
        }
    }
}

impl DiffSink for TextSink {
    fn push(&mut self, entry: DiffEntry) {
        match entry {
            DiffEntry::Common(lines) => self.lines(' ', &lines),
            DiffEntry::Skip(count) => self.write(format!("@@ {count} common lines skipped @@")),
            DiffEntry::OnlyA(lines) => self.lines('-', &lines),
            DiffEntry::OnlyB(lines) => self.lines('+', &lines),
            DiffEntry::Replace { a, b, .. } => {
                self.lines('-', &a);
                self.lines('+', &b);
            }
        }
    }
}

/// Assemble and render as plain text. Nothing is returned if assembly
/// fails part way.
pub fn render_text<A, B>(edits: &[Edit], a: &A, b: &B, color: bool) -> RenderResult<String>
where
    A: SparseLines + ?Sized,
    B: SparseLines + ?Sized,
{
    let mut sink = TextSink::new(color);
    assemble_into(edits, a, b, &mut sink)?;
    Ok(sink.into_string())
}
