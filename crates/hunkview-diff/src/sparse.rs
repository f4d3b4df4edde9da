//! Sparse line stores: partially materialized views of a file.
//!
//! Large unchanged regions of a file never need to be loaded to render a
//! diff. A store knows the logical line count of the whole file but only
//! holds text for a subset of line indices.
//!
//! # Invariants
//!
//! - Every loaded index is in `[0, size())`.
//! - `next(i)` is monotonically non-decreasing in `i`.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::error::{DiffError, DiffResult};

/// Read-only access to a line-indexed, partially loaded file.
pub trait SparseLines {
    /// Logical number of lines in the file, loaded or not.
    fn size(&self) -> usize;

    /// Returns `true` if line `index` is materialized.
    fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Text of line `index`, or `None` if it is not loaded.
    fn get(&self, index: usize) -> Option<&str>;

    /// Smallest loaded index, or `size()` if nothing is loaded.
    fn first(&self) -> usize;

    /// Smallest loaded index strictly greater than `index`, or `size()`
    /// if there is none.
    fn next(&self, index: usize) -> usize;
}

/// A [`SparseLines`] implementation backed by an ordered map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseFileContent {
    size: usize,
    lines: BTreeMap<usize, String>,
}

impl SparseFileContent {
    /// Create an empty store for a file of `size` lines.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            lines: BTreeMap::new(),
        }
    }

    /// Create a store with every line loaded.
    pub fn full<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: BTreeMap<usize, String> = lines
            .into_iter()
            .enumerate()
            .map(|(i, s)| (i, s.into()))
            .collect();
        Self {
            size: lines.len(),
            lines,
        }
    }

    /// Materialize line `index`.
    pub fn insert(&mut self, index: usize, text: impl Into<String>) -> DiffResult<()> {
        if index >= self.size {
            return Err(DiffError::LineOutOfRange {
                line: index,
                size: self.size,
            });
        }
        self.lines.insert(index, text.into());
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_line(mut self, index: usize, text: impl Into<String>) -> DiffResult<Self> {
        self.insert(index, text)?;
        Ok(self)
    }

    /// Number of materialized lines.
    pub fn loaded_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if every line of the file is materialized.
    pub fn is_fully_loaded(&self) -> bool {
        self.lines.len() == self.size
    }

    /// Loaded `(index, text)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().map(|(i, s)| (*i, s.as_str()))
    }
}

impl SparseLines for SparseFileContent {
    fn size(&self) -> usize {
        self.size
    }

    fn contains(&self, index: usize) -> bool {
        self.lines.contains_key(&index)
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(&index).map(String::as_str)
    }

    fn first(&self) -> usize {
        self.lines.keys().next().copied().unwrap_or(self.size)
    }

    fn next(&self, index: usize) -> usize {
        self.lines
            .range((Bound::Excluded(index), Bound::Unbounded))
            .next()
            .map(|(i, _)| *i)
            .unwrap_or(self.size)
    }
}
