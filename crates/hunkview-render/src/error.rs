//! Error types for the render crate.

use hunkview_diff::DiffError;

/// Errors that can occur while rendering a diff.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Assembly failed; no output is produced.
    #[error("diff assembly failed: {0}")]
    Diff(#[from] DiffError),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A content entry carries an illegal combination of fields.
    #[error("invalid content entry: {0}")]
    InvalidEntry(String),
}

impl RenderError {
    /// Returns `true` if the underlying cause is a corrupt edit script.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RenderError::Diff(e) if e.is_fatal())
    }
}

/// Convenience alias for render results.
pub type RenderResult<T> = Result<T, RenderError>;
