//! Error types for patch script construction.

use std::path::PathBuf;

use hunkview_diff::DiffError;

/// Errors that can occur while building a patch script or loading config.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid TOML for [`DiffConfig`](crate::DiffConfig).
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The computed edit script or sparse stores are inconsistent.
    #[error("diff error: {0}")]
    Diff(#[from] DiffError),
}

/// Convenience alias for script results.
pub type ScriptResult<T> = Result<T, ScriptError>;
