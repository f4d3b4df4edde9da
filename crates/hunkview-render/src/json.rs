//! JSON diff payloads.
//!
//! Each [`DiffEntry`] maps to a [`ContentEntry`] object carrying exactly one
//! shape of fields: `ab` for common lines, `a` and/or `b` for changed lines
//! (with optional `editA`/`editB` intraline spans as `[offset, length]`
//! pairs), or `skip` for elided common lines.

use hunkview_diff::{assemble_into, DiffEntry, DiffSink, Edit, Span, SparseLines};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// One object of the `content` array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ab: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<Vec<String>>,
    #[serde(rename = "editA", default, skip_serializing_if = "Option::is_none")]
    pub edit_a: Option<Vec<[usize; 2]>>,
    #[serde(rename = "editB", default, skip_serializing_if = "Option::is_none")]
    pub edit_b: Option<Vec<[usize; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<usize>,
}

fn to_pairs(spans: Vec<Span>) -> Vec<[usize; 2]> {
    spans.into_iter().map(|s| [s.offset, s.length]).collect()
}

fn to_spans(pairs: Vec<[usize; 2]>) -> Vec<Span> {
    pairs.into_iter().map(|[offset, length]| Span::new(offset, length)).collect()
}

impl From<DiffEntry> for ContentEntry {
    fn from(entry: DiffEntry) -> Self {
        match entry {
            DiffEntry::Common(lines) => ContentEntry {
                ab: Some(lines),
                ..Default::default()
            },
            DiffEntry::Skip(count) => ContentEntry {
                skip: Some(count),
                ..Default::default()
            },
            DiffEntry::OnlyA(lines) => ContentEntry {
                a: Some(lines),
                ..Default::default()
            },
            DiffEntry::OnlyB(lines) => ContentEntry {
                b: Some(lines),
                ..Default::default()
            },
            DiffEntry::Replace {
                a,
                b,
                edit_a,
                edit_b,
            } => ContentEntry {
                a: Some(a),
                b: Some(b),
                edit_a: edit_a.map(to_pairs),
                edit_b: edit_b.map(to_pairs),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<ContentEntry> for DiffEntry {
    type Error = RenderError;

    fn try_from(entry: ContentEntry) -> RenderResult<Self> {
        let has_edits = entry.edit_a.is_some() || entry.edit_b.is_some();
        match entry {
            ContentEntry {
                ab: Some(lines),
                a: None,
                b: None,
                edit_a: None,
                edit_b: None,
                skip: None,
            } => Ok(DiffEntry::Common(lines)),
            ContentEntry {
                ab: None,
                a: None,
                b: None,
                edit_a: None,
                edit_b: None,
                skip: Some(count),
            } => Ok(DiffEntry::Skip(count)),
            ContentEntry {
                ab: None,
                a: Some(a),
                b: Some(b),
                edit_a,
                edit_b,
                skip: None,
            } => Ok(DiffEntry::Replace {
                a,
                b,
                edit_a: edit_a.map(to_spans),
                edit_b: edit_b.map(to_spans),
            }),
            ContentEntry {
                ab: None,
                a: Some(lines),
                b: None,
                skip: None,
                ..
            } if !has_edits => Ok(DiffEntry::OnlyA(lines)),
            ContentEntry {
                ab: None,
                a: None,
                b: Some(lines),
                skip: None,
                ..
            } if !has_edits => Ok(DiffEntry::OnlyB(lines)),
            other => Err(RenderError::InvalidEntry(format!("{other:?}"))),
        }
    }
}

/// How the file changed between the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Added,
    Deleted,
    Modified,
}

/// Whether intraline highlighting is present in the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntralineStatus {
    /// Every replaced hunk carries highlight spans.
    Ok,
    /// Some replaced hunks have no spans, typically because their text
    /// exceeded the intraline size limit.
    Skipped,
    /// Intraline highlighting was not requested.
    Off,
}

/// Metadata describing one side of the diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub content_type: String,
    pub lines: usize,
}

impl FileMeta {
    /// Metadata for a plain-text file.
    pub fn text(name: impl Into<String>, lines: usize) -> Self {
        Self {
            name: name.into(),
            content_type: "text/plain".into(),
            lines,
        }
    }
}

/// A complete diff payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_a: Option<FileMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_b: Option<FileMeta>,
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intraline_status: Option<IntralineStatus>,
    pub content: Vec<ContentEntry>,
}

impl DiffInfo {
    /// Assemble `edits` over the two stores into a payload.
    ///
    /// A missing `meta_a` marks the file as added, a missing `meta_b` as
    /// deleted.
    pub fn build<A, B>(
        edits: &[Edit],
        a: &A,
        b: &B,
        meta_a: Option<FileMeta>,
        meta_b: Option<FileMeta>,
    ) -> RenderResult<Self>
    where
        A: SparseLines + ?Sized,
        B: SparseLines + ?Sized,
    {
        let mut sink = JsonSink::default();
        assemble_into(edits, a, b, &mut sink)?;

        let change_type = match (&meta_a, &meta_b) {
            (None, _) => ChangeType::Added,
            (_, None) => ChangeType::Deleted,
            _ => ChangeType::Modified,
        };
        let intraline_status = match (sink.replaces, sink.replaces_with_spans) {
            (0, _) => None,
            (all, with_spans) if with_spans == all => Some(IntralineStatus::Ok),
            _ => Some(IntralineStatus::Skipped),
        };
        debug!(entries = sink.content.len(), ?change_type, "built diff payload");

        Ok(Self {
            meta_a,
            meta_b,
            change_type,
            intraline_status,
            content: sink.content,
        })
    }

    /// Mark intraline highlighting as not requested.
    pub fn intraline_off(mut self) -> Self {
        self.intraline_status = Some(IntralineStatus::Off);
        self
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self, pretty: bool) -> RenderResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse a payload and decode its content back into entries.
    pub fn entries_from_json(json: &str) -> RenderResult<Vec<DiffEntry>> {
        let info: DiffInfo = serde_json::from_str(json)?;
        info.content.into_iter().map(DiffEntry::try_from).collect()
    }
}

/// A [`DiffSink`] collecting [`ContentEntry`] objects.
#[derive(Debug, Default)]
pub struct JsonSink {
    content: Vec<ContentEntry>,
    replaces: usize,
    replaces_with_spans: usize,
}

impl JsonSink {
    pub fn into_content(self) -> Vec<ContentEntry> {
        self.content
    }
}

impl DiffSink for JsonSink {
    fn push(&mut self, entry: DiffEntry) {
        if let DiffEntry::Replace { edit_a, edit_b, .. } = &entry {
            self.replaces += 1;
            if edit_a.is_some() || edit_b.is_some() {
                self.replaces_with_spans += 1;
            }
        }
        self.content.push(entry.into());
    }
}

/// Assemble and serialize only the `content` array.
pub fn render_json<A, B>(edits: &[Edit], a: &A, b: &B) -> RenderResult<String>
where
    A: SparseLines + ?Sized,
    B: SparseLines + ?Sized,
{
    let mut sink = JsonSink::default();
    assemble_into(edits, a, b, &mut sink)?;
    Ok(serde_json::to_string(&sink.content)?)
}
