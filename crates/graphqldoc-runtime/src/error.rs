//! Runtime error types.

use graphqldoc_core::{CoreError, Page};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a build pass.
///
/// Plugin failures never appear here; they are collected as warnings in the
/// [`BuildOutput`](crate::build::BuildOutput).
#[derive(Error, Debug)]
pub enum BuildError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The introspection payload could not be normalized.
    #[error(transparent)]
    Schema(#[from] CoreError),

    /// The page sink refused a fully merged page.
    #[error("Failed to publish page '{page}': {error:#}")]
    Publish { page: Page, error: anyhow::Error },

    /// The build was cancelled; pages published before cancellation stay
    /// published, the in-flight pages are dropped.
    #[error("Build cancelled after {published} published page(s)")]
    Cancelled { published: usize },
}

impl BuildError {
    /// `true` if the build was stopped through its cancellation token.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result type for runtime operations.
pub type BuildResult<T> = Result<T, BuildError>;
