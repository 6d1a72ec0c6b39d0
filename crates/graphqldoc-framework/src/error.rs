//! Recoverable plugin failures.
//!
//! Nothing in this module aborts a build. Each failure excludes one
//! contribution (or one plugin) and is surfaced to the operator as a
//! [`BuildWarning`].

use graphqldoc_core::Page;
use thiserror::Error;

use crate::plugin::Capability;

/// A single capability call failed.
///
/// The failing call's contribution is excluded from the merge; the same
/// plugin's other capabilities and every other plugin are unaffected.
#[derive(Debug, Error)]
#[error("plugin '{plugin}' failed in {capability}{}: {error:#}", page_suffix(.page))]
pub struct PluginExecutionError {
    /// Name of the failing plugin.
    pub plugin: String,
    /// The capability that was being invoked.
    pub capability: Capability,
    /// The page being built; `None` for the once-per-build asset call.
    pub page: Option<Page>,
    /// The plugin's own error.
    pub error: anyhow::Error,
}

/// A plugin constructor returned an error; the plugin takes no part in the
/// build.
#[derive(Debug, Error)]
#[error("plugin '{plugin}' could not be instantiated: {error:#}")]
pub struct PluginInstantiateError {
    pub plugin: String,
    pub error: anyhow::Error,
}

/// A recoverable problem reported at the end of a build.
#[derive(Debug, Error)]
pub enum BuildWarning {
    #[error(transparent)]
    Execution(#[from] PluginExecutionError),

    #[error(transparent)]
    Instantiate(#[from] PluginInstantiateError),
}

impl BuildWarning {
    /// Name of the plugin the warning is attributed to.
    pub fn plugin(&self) -> &str {
        match self {
            Self::Execution(e) => &e.plugin,
            Self::Instantiate(e) => &e.plugin,
        }
    }

    /// The page the warning is attributed to, if any.
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Execution(e) => e.page.as_ref(),
            Self::Instantiate(_) => None,
        }
    }
}

fn page_suffix(page: &Option<Page>) -> String {
    match page {
        Some(page) => format!(" for page '{page}'"),
        None => String::new(),
    }
}
