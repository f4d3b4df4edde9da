//! Renderers for assembled diffs.
//!
//! Both renderers are [`hunkview_diff::DiffSink`] implementations fed by the
//! same assembler, so structured and plain-text output never diverge.
//!
//! # Key Types
//!
//! - [`DiffInfo`] / [`ContentEntry`] -- JSON diff payload
//!   (`ab`, `a`, `b`, `editA`, `editB`, `skip`)
//! - [`TextSink`] -- Plain-text export with `-`/`+`/space prefixes

pub mod error;
pub mod json;
pub mod text;

pub use error::{RenderError, RenderResult};
pub use json::{
    render_json, ChangeType, ContentEntry, DiffInfo, FileMeta, IntralineStatus, JsonSink,
};
pub use text::{render_text, TextSink};
