//! Type references and their resolution to canonical names and URLs.
//!
//! A [`TypeRef`] is GraphQL's type-wrapping chain: zero or more `LIST` /
//! `NON_NULL` nodes linked through `ofType`, ending at a named type. The chain
//! is owned (`Option<Box<TypeRef>>`) and every walk over it is bounded by a
//! maximum depth, so a malformed payload cannot hang resolution.
//!
//! ```rust,ignore
//! let resolver = TypeRefResolver::new(default_url_resolver("/api/"));
//! let resolved = resolver.resolve(&field.ty)?;
//! assert_eq!(resolved.canonical_name, "ID");
//! assert_eq!(resolved.url, "/api/id.doc.html");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::schema::{Described, Description, TypeKind};

/// Maximum number of `ofType` links a chain may have.
///
/// Chains of depth `0..MAX_TYPE_REF_DEPTH` resolve; anything deeper fails with
/// [`CoreError::CyclicTypeRef`].
pub const MAX_TYPE_REF_DEPTH: usize = 32;

/// Maps a type reference to the URL of its documentation page.
///
/// Always invoked with the outermost reference so implementations can
/// inspect wrapper nodes.
pub type UrlResolver = Arc<dyn Fn(&TypeRef) -> String + Send + Sync>;

/// One node of a type-wrapping chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(flatten)]
    pub base: Description,
    #[serde(rename = "ofType", default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl Described for TypeRef {
    fn base(&self) -> &Description {
        &self.base
    }
}

impl TypeRef {
    /// Creates a terminal reference to a named type.
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            base: Description {
                name: name.into(),
                description: None,
                kind: Some(kind),
            },
            of_type: None,
        }
    }

    /// Wraps `inner` in a `NON_NULL` node.
    pub fn non_null(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::NonNull, inner)
    }

    /// Wraps `inner` in a `LIST` node.
    pub fn list(inner: TypeRef) -> Self {
        Self::wrap(TypeKind::List, inner)
    }

    fn wrap(kind: TypeKind, inner: TypeRef) -> Self {
        Self {
            base: Description {
                kind: Some(kind),
                ..Default::default()
            },
            of_type: Some(Box::new(inner)),
        }
    }

    /// Walks to the terminal node, failing when the chain has
    /// `max_depth` or more links.
    pub fn terminal_within(&self, max_depth: usize) -> CoreResult<&TypeRef> {
        let mut node = self;
        let mut depth = 0;
        while let Some(next) = node.of_type.as_deref() {
            depth += 1;
            if depth >= max_depth {
                return Err(CoreError::CyclicTypeRef {
                    type_name: self.best_name(),
                    max_depth,
                });
            }
            node = next;
        }
        Ok(node)
    }

    /// The terminal node, bounded by [`MAX_TYPE_REF_DEPTH`].
    pub fn terminal(&self) -> CoreResult<&TypeRef> {
        self.terminal_within(MAX_TYPE_REF_DEPTH)
    }

    /// Name of the terminal node, or `None` for an unnamed or over-deep chain.
    pub fn terminal_name(&self) -> Option<&str> {
        self.terminal()
            .ok()
            .map(|node| node.base.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Wrapper kinds from outermost to innermost.
    pub fn wrappers(&self) -> Vec<TypeKind> {
        self.chain()
            .take(MAX_TYPE_REF_DEPTH)
            .filter_map(|node| node.base.kind)
            .filter(TypeKind::is_wrapper)
            .collect()
    }

    /// `true` when the outermost node is `NON_NULL`.
    pub fn is_non_null(&self) -> bool {
        self.base.kind == Some(TypeKind::NonNull)
    }

    /// `true` when any node of the chain is a `LIST`.
    pub fn is_list(&self) -> bool {
        self.wrappers().contains(&TypeKind::List)
    }

    /// Renders the GraphQL type expression, e.g. `[ID!]!`.
    pub fn signature(&self) -> String {
        let nodes: Vec<&TypeRef> = self.chain().take(MAX_TYPE_REF_DEPTH).collect();
        let Some(last) = nodes.last() else {
            return String::new();
        };
        let mut out = if last.of_type.is_some() {
            "…".to_string()
        } else {
            last.base.name.clone()
        };
        for node in nodes.iter().rev().skip(1) {
            match node.base.kind {
                Some(TypeKind::List) => out = format!("[{out}]"),
                Some(TypeKind::NonNull) => out.push('!'),
                _ => {}
            }
        }
        out
    }

    fn chain(&self) -> impl Iterator<Item = &TypeRef> {
        std::iter::successors(Some(self), |node| node.of_type.as_deref())
    }

    /// Name of the innermost node, past the depth bound. Used in errors.
    fn best_name(&self) -> String {
        self.chain()
            .last()
            .map(|node| node.base.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("<unnamed>")
            .to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

/// A type reference resolved to its canonical identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedType {
    /// Name of the terminal named type.
    pub canonical_name: String,
    /// Documentation URL produced by the [`UrlResolver`].
    pub url: String,
}

/// Resolves type references to canonical names and documentation URLs.
#[derive(Clone)]
pub struct TypeRefResolver {
    url: UrlResolver,
    max_depth: usize,
}

impl TypeRefResolver {
    /// Creates a resolver bounded by [`MAX_TYPE_REF_DEPTH`].
    pub fn new(url: UrlResolver) -> Self {
        Self {
            url,
            max_depth: MAX_TYPE_REF_DEPTH,
        }
    }

    /// Overrides the depth bound. Values above [`MAX_TYPE_REF_DEPTH`] are
    /// clamped.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.clamp(1, MAX_TYPE_REF_DEPTH);
        self
    }

    /// The active depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The URL resolver used for [`resolve`](Self::resolve).
    pub fn url_resolver(&self) -> &UrlResolver {
        &self.url
    }

    /// Resolves `type_ref` to its terminal name and URL.
    ///
    /// The URL resolver receives `type_ref` itself, not the terminal node.
    pub fn resolve(&self, type_ref: &TypeRef) -> CoreResult<ResolvedType> {
        let terminal = type_ref.terminal_within(self.max_depth)?;
        if terminal.base.name.is_empty() {
            return Err(CoreError::UnnamedTypeRef {
                kind: terminal
                    .base
                    .kind
                    .map_or_else(|| "untyped".to_string(), |k| k.to_string()),
            });
        }
        Ok(ResolvedType {
            canonical_name: terminal.base.name.clone(),
            url: (self.url)(type_ref),
        })
    }

    /// Resolves only the URL of `type_ref`.
    pub fn url(&self, type_ref: &TypeRef) -> String {
        (self.url)(type_ref)
    }
}

impl fmt::Debug for TypeRefResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRefResolver")
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

/// The conventional page URL: `base_url` + lowercase terminal name +
/// `.doc.html`.
pub fn default_url_resolver(base_url: impl Into<String>) -> UrlResolver {
    let base_url = base_url.into();
    Arc::new(move |type_ref: &TypeRef| {
        let name = type_ref.terminal_name().unwrap_or_default();
        format!("{base_url}{}.doc.html", name.to_lowercase())
    })
}
