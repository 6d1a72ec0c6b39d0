//! # graphqldoc Core
//!
//! The schema layer of the graphqldoc documentation generator.
//!
//! This crate owns everything that can be computed from an introspection
//! result alone, without any plugin or async runtime:
//!
//! - **Schema model**: [`Schema`], [`SchemaType`], [`Field`], [`TypeRef`], …
//!   decoded straight from introspection JSON.
//! - **Normalizer**: [`normalize`] accepts both the raw (`{ "__schema" }`) and
//!   the wrapped (`{ "data": { "__schema" } }`) payload shapes.
//! - **Type resolution**: [`TypeRefResolver`] walks `ofType` chains under a
//!   depth bound and produces canonical names and page URLs.
//! - **Output records**: [`NavigationSection`], [`DocumentSection`], what
//!   plugins produce and renderers consume.
//!
//! ```text
//! introspection JSON ──normalize──▶ Schema ──▶ plugins ──▶ sections ──▶ renderer
//!                                     │
//!                                     └──▶ TypeRefResolver (name, url)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use graphqldoc_core::{normalize, TypeRefResolver, default_url_resolver};
//!
//! let schema = normalize(payload)?;
//! let resolver = TypeRefResolver::new(default_url_resolver("/"));
//! for ty in &schema.types {
//!     for field in &ty.fields {
//!         let resolved = resolver.resolve(&field.ty)?;
//!         println!("{}.{}: {} -> {}", ty.base.name, field.base.name, field.ty, resolved.url);
//!     }
//! }
//! ```

pub mod error;
pub mod introspection;
pub mod output;
pub mod page;
pub mod schema;
pub mod type_ref;

pub use error::{CoreError, CoreResult};
pub use introspection::{Introspection, IntrospectionShape, normalize, normalize_str};
pub use output::{DocumentSection, NavigationItem, NavigationSection};
pub use page::Page;
pub use schema::{
    DefaultValue, Deprecation, Described, Description, Directive, EnumValue, Field, InputValue,
    Schema, SchemaType, TypeKind,
};
pub use type_ref::{
    MAX_TYPE_REF_DEPTH, ResolvedType, TypeRef, TypeRefResolver, UrlResolver, default_url_resolver,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::output::*;
    pub use super::page::Page;
    pub use super::schema::{Described, Schema, SchemaType, TypeKind};
    pub use super::type_ref::{TypeRef, TypeRefResolver};
}
