//! Records produced by plugins and consumed by the renderer.

use serde::{Deserialize, Serialize};

/// One entry of a navigation section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub text: String,
    pub href: String,
    /// Marks the item for the page currently being generated.
    pub is_active: bool,
}

impl NavigationItem {
    pub fn new(text: impl Into<String>, href: impl Into<String>, is_active: bool) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            is_active,
        }
    }
}

/// A titled group of navigation items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSection {
    pub title: String,
    pub items: Vec<NavigationItem>,
}

impl NavigationSection {
    pub fn new(title: impl Into<String>, items: Vec<NavigationItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// The active item, if this section contains one.
    pub fn active_item(&self) -> Option<&NavigationItem> {
        self.items.iter().find(|item| item.is_active)
    }
}

/// A titled block of page content. `description` is renderer-ready markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub title: String,
    pub description: String,
}

impl DocumentSection {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
