//! Path-qualified mismatch reports

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrepancy between two compared graphs.
///
/// Mismatches are data, not errors: a comparison collects every one it
/// finds, in traversal order, and never fails early on a structural
/// difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Dotted path from the root to the differing node; empty at the root.
    pub path: String,

    /// Human-readable description of the discrepancy.
    pub description: String,
}

impl Mismatch {
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.description)
        } else {
            write!(f, "{}: {}", self.path, self.description)
        }
    }
}
