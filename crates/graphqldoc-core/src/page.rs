//! Page identity within a build pass.

use std::fmt;

use serde::Serialize;

/// A page of the generated document set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "page", content = "type", rename_all = "lowercase")]
pub enum Page {
    /// The index page (`buildForType` absent).
    Index,
    /// The page documenting the named type.
    Type(String),
}

impl Page {
    /// The `buildForType` argument passed to page-level capabilities.
    pub fn build_for_type(&self) -> Option<&str> {
        match self {
            Self::Index => None,
            Self::Type(name) => Some(name),
        }
    }

    /// `true` for the index page.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => f.write_str("index"),
            Self::Type(name) => f.write_str(name),
        }
    }
}
