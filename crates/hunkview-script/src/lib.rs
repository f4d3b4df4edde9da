//! Patch script construction for hunkview.
//!
//! Produces the inputs of the diff assembler from two whole texts: the
//! line-level edit script (with intraline sub-edits for replaced hunks) and
//! the two sparse line stores holding only the lines a view needs.
//!
//! # Key Types
//!
//! - [`PatchScript`] -- Edit script plus both sides' sparse content
//! - [`DiffConfig`] / [`DiffAlgorithm`] -- Context, intraline and algorithm settings

pub mod config;
pub mod edits;
pub mod error;
pub mod load;
pub mod patch;

pub use config::{DiffAlgorithm, DiffConfig};
pub use edits::{compute_edits, display_line, intraline, split_lines};
pub use error::{ScriptError, ScriptResult};
pub use load::load_sparse;
pub use patch::PatchScript;
