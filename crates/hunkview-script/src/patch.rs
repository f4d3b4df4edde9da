//! Patch scripts: everything the assembler needs for one file diff.

use hunkview_diff::{
    assemble, validate_edits_against, DiffEntry, DiffResult, Edit, Side, SparseFileContent,
};
use tracing::debug;

use crate::config::DiffConfig;
use crate::edits::{compute_edits, split_lines};
use crate::error::ScriptResult;
use crate::load::load_sparse;

/// The edit script for one file plus both sides' sparse content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchScript {
    pub a: SparseFileContent,
    pub b: SparseFileContent,
    pub edits: Vec<Edit>,
}

impl PatchScript {
    /// Diff two whole texts and load the lines a view needs.
    pub fn build(old: &str, new: &str, config: &DiffConfig) -> ScriptResult<Self> {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);

        let edits = compute_edits(&old_lines, &new_lines, config);
        validate_edits_against(&edits, &old_lines, &new_lines)?;

        let window = config.context_window();
        let a = load_sparse(&old_lines, &edits, Side::A, window)?;
        let b = load_sparse(&new_lines, &edits, Side::B, window)?;

        debug!(
            hunks = edits.len(),
            algorithm = %config.algorithm,
            loaded_a = a.loaded_count(),
            loaded_b = b.loaded_count(),
            "built patch script"
        );

        Ok(Self { a, b, edits })
    }

    /// Returns `true` if the two texts have no line differences.
    pub fn is_identical(&self) -> bool {
        self.edits.is_empty()
    }

    /// Assemble the diff entries for this script.
    pub fn assemble(&self) -> DiffResult<Vec<DiffEntry>> {
        assemble(&self.edits, &self.a, &self.b)
    }
}
