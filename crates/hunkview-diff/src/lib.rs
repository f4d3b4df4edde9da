//! Diff content assembler for hunkview.
//!
//! Turns a line-level edit script plus two partially materialized files into
//! an ordered, renderable list of diff entries, with character-level
//! highlighting inside replaced lines.
//!
//! # Key Types
//!
//! - [`SparseLines`] / [`SparseFileContent`] -- Partially loaded, line-indexed file views
//! - [`Edit`] / [`InternalEdit`] -- Line hunks and their intraline sub-edits
//! - [`DiffEntry`] -- Common / Skip / OnlyA / OnlyB / Replace output segments
//! - [`assemble`] / [`DiffSink`] -- The assembler and its streaming output seam

pub mod assemble;
pub mod edit;
pub mod entry;
pub mod error;
pub mod sparse;

pub use assemble::{assemble, assemble_into, DiffSink};
pub use edit::{validate_edits, validate_edits_against, Edit, EditKind, InternalEdit, TextPos};
pub use entry::{DiffEntry, DiffSummary, Span};
pub use error::{DiffError, DiffResult, Side};
pub use sparse::{SparseFileContent, SparseLines};
