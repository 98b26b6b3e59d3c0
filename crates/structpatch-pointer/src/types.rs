//! Type definitions for patch paths.

use std::borrow::Cow;
use std::fmt;

use crate::is_valid_index;

/// A step in a patch path.
///
/// Record and mapping keys are usually `Key`, sequence and set positions are
/// `Index`. A mapping treats the two variants as distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// A path from the document root to a location.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// Interprets this step as a sequence index.
    ///
    /// `Key` steps count when they are canonical non-negative integers
    /// (`"0"`, `"12"`, but not `"012"` or `"-1"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(i) => Some(*i),
            PathStep::Key(k) if is_valid_index(k) => k.parse().ok(),
            PathStep::Key(_) => None,
        }
    }

    /// Interprets this step as a record key.
    pub fn to_key(&self) -> Cow<'_, str> {
        match self {
            PathStep::Key(k) => Cow::Borrowed(k.as_str()),
            PathStep::Index(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Builds a step from an unescaped pointer segment.
    ///
    /// Canonical integers become `Index`, everything else `Key`.
    pub fn from_segment(segment: String) -> Self {
        if is_valid_index(&segment) {
            if let Ok(i) = segment.parse() {
                return PathStep::Index(i);
            }
        }
        PathStep::Key(segment)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => f.write_str(k),
            PathStep::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Index(index)
    }
}
