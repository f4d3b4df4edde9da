use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScriptError, ScriptResult};

/// Line-level diff algorithm used to compute the edit script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<DiffAlgorithm> for similar::Algorithm {
    fn from(alg: DiffAlgorithm) -> Self {
        match alg {
            DiffAlgorithm::Myers => similar::Algorithm::Myers,
            DiffAlgorithm::Patience => similar::Algorithm::Patience,
            DiffAlgorithm::Lcs => similar::Algorithm::Lcs,
        }
    }
}

impl FromStr for DiffAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "myers" => Ok(DiffAlgorithm::Myers),
            "patience" => Ok(DiffAlgorithm::Patience),
            "lcs" => Ok(DiffAlgorithm::Lcs),
            other => Err(format!("unknown diff algorithm: {other}")),
        }
    }
}

impl fmt::Display for DiffAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffAlgorithm::Myers => f.write_str("myers"),
            DiffAlgorithm::Patience => f.write_str("patience"),
            DiffAlgorithm::Lcs => f.write_str("lcs"),
        }
    }
}

/// Configuration for building patch scripts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Common lines loaded before and after each edit.
    pub context: usize,
    /// Load both files completely, ignoring `context`.
    pub full_file: bool,
    /// Compute character-level sub-edits for replaced lines.
    pub intraline: bool,
    /// Hunks whose text exceeds this many characters on either side get no
    /// intraline data.
    pub intraline_max_chars: usize,
    /// Line-level diff algorithm.
    pub algorithm: DiffAlgorithm,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context: 10,
            full_file: false,
            intraline: true,
            intraline_max_chars: 10_000,
            algorithm: DiffAlgorithm::Myers,
        }
    }
}

impl DiffConfig {
    /// Context window to load, or `None` for whole files.
    pub fn context_window(&self) -> Option<usize> {
        (!self.full_file).then_some(self.context)
    }

    pub fn from_toml_str(s: &str) -> ScriptResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ScriptResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.context, 10);
        assert!(!c.full_file);
        assert!(c.intraline);
        assert_eq!(c.intraline_max_chars, 10_000);
        assert_eq!(c.algorithm, DiffAlgorithm::Myers);
        assert_eq!(c.context_window(), Some(10));
    }

    #[test]
    fn full_file_has_no_window() {
        let c = DiffConfig {
            full_file: true,
            ..Default::default()
        };
        assert_eq!(c.context_window(), None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = DiffConfig::from_toml_str("context = 3\nalgorithm = \"patience\"\n").unwrap();
        assert_eq!(c.context, 3);
        assert_eq!(c.algorithm, DiffAlgorithm::Patience);
        assert!(c.intraline);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = DiffConfig::from_toml_str("contxt = 3").unwrap_err();
        assert!(matches!(err, ScriptError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "full_file = true\nintraline = false").unwrap();
        let c = DiffConfig::load(file.path()).unwrap();
        assert!(c.full_file);
        assert!(!c.intraline);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiffConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!("LCS".parse::<DiffAlgorithm>().unwrap(), DiffAlgorithm::Lcs);
        assert!("histogram".parse::<DiffAlgorithm>().is_err());
        assert_eq!(DiffAlgorithm::Patience.to_string(), "patience");
    }
}
