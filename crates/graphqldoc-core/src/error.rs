//! Error types for schema normalization and type resolution.

use thiserror::Error;

/// Errors produced while turning an introspection payload into a [`Schema`]
/// or while resolving a [`TypeRef`] chain.
///
/// [`Schema`]: crate::Schema
/// [`TypeRef`]: crate::TypeRef
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload has neither a `data.__schema` nor a top-level `__schema`.
    ///
    /// Fatal for the whole build: no schema exists to proceed with.
    #[error("malformed introspection: {reason}")]
    MalformedIntrospection {
        /// What was found instead of a recognised shape.
        reason: String,
    },

    /// The `__schema` object was found but does not decode as a schema.
    #[error("invalid schema in introspection payload: {source}")]
    InvalidSchema {
        /// Underlying decode error.
        #[from]
        source: serde_json::Error,
    },

    /// A type-wrapping chain exceeded the depth bound.
    #[error("type reference '{type_name}' exceeds the maximum wrapping depth of {max_depth}")]
    CyclicTypeRef {
        /// Best available name for the offending reference.
        type_name: String,
        /// The bound that was exceeded.
        max_depth: usize,
    },

    /// The terminal node of a type-wrapping chain carries no name.
    #[error("type reference chain ends in an unnamed {kind} node")]
    UnnamedTypeRef {
        /// Kind of the terminal node.
        kind: String,
    },
}

impl CoreError {
    /// Creates a malformed introspection error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedIntrospection {
            reason: reason.into(),
        }
    }

    /// Returns `true` when the error must abort the whole build rather than
    /// a single page.
    pub fn is_build_fatal(&self) -> bool {
        matches!(
            self,
            Self::MalformedIntrospection { .. } | Self::InvalidSchema { .. }
        )
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
