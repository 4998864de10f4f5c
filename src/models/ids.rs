//! Deterministic comment identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source identifier for an imported comment.
///
/// Formatted as `<dataset>_<row>`, where `row` is the record's position in
/// the CSV file counting the header line as row 0. The first data row of a
/// dataset is therefore always `_1`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(String);

impl CommentId {
    /// Build the id for the row at `row_index` of `dataset`.
    pub fn new(dataset: &str, row_index: usize) -> Self {
        Self(format!("{}_{}", dataset, row_index))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommentId({})", self.0)
    }
}

impl AsRef<str> for CommentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> Self {
        id.0
    }
}
