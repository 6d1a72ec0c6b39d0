//! Merging of per-plugin contributions.
//!
//! The merge policy is plain concatenation: plugin registration order first,
//! then each plugin's own ordering. Sections are never deduplicated or
//! re-sorted here, which keeps builds reproducible; a renderer that wants
//! deduplication by title does it downstream.

use std::path::PathBuf;

use graphqldoc_core::{DocumentSection, NavigationSection, Page};
use serde::Serialize;

/// What one plugin contributed to one page.
///
/// Failed or absent capabilities leave their vector empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginContribution {
    pub plugin: String,
    pub navigations: Vec<NavigationSection>,
    pub documents: Vec<DocumentSection>,
    pub headers: Vec<String>,
}

impl PluginContribution {
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.navigations.is_empty() && self.documents.is_empty() && self.headers.is_empty()
    }
}

/// The merged result for one page, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedPage {
    pub page: Page,
    pub headers: Vec<String>,
    pub documents: Vec<DocumentSection>,
    pub navigations: Vec<NavigationSection>,
}

impl MergedPage {
    /// An empty page.
    pub fn empty(page: Page) -> Self {
        Self {
            page,
            headers: Vec::new(),
            documents: Vec::new(),
            navigations: Vec::new(),
        }
    }

    /// The `buildForType` this page was generated for.
    pub fn build_for_type(&self) -> Option<&str> {
        self.page.build_for_type()
    }
}

/// Concatenates contributions, which must already be in registration order.
pub fn merge_page<I>(page: Page, contributions: I) -> MergedPage
where
    I: IntoIterator<Item = PluginContribution>,
{
    contributions
        .into_iter()
        .fold(MergedPage::empty(page), |mut merged, contribution| {
            merged.headers.extend(contribution.headers);
            merged.documents.extend(contribution.documents);
            merged.navigations.extend(contribution.navigations);
            merged
        })
}

/// Concatenates per-plugin asset lists, which must already be in
/// registration order.
pub fn merge_assets<I>(contributions: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = Vec<PathBuf>>,
{
    contributions.into_iter().flatten().collect()
}
