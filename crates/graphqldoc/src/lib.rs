//! # graphqldoc
//!
//! A plugin-driven documentation generator for GraphQL schemas.
//!
//! ## Overview
//!
//! graphqldoc reads an introspection result, in either the raw
//! `{"__schema": …}` shape or the `{"data": {"__schema": …}}` shape returned
//! by a GraphQL endpoint, and produces one merged page per documented type
//! plus an index page. Everything that ends up on a page comes from plugins.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────────────────────────────┐
//! │ Introspection│────▶│  normalize   │────▶│ Plugin "navigation.objects"        │──┐
//! │   payload    │     │  (Schema)    │────▶│ Plugin "banner"                    │──┼──▶ MergedPage ──▶ PageSink
//! └──────────────┘     └──────────────┘────▶│ Plugin ...                         │──┘
//!                                           └────────────────────────────────────┘
//! ```
//!
//! - **Core**: the canonical schema, type reference resolution and page
//!   output types
//! - **Framework**: the plugin contract, plugin registry, orchestrator and
//!   order-preserving aggregator
//! - **Runtime**: configuration, logging and the build pass
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use graphqldoc::prelude::*;
//!
//! struct Banner;
//!
//! #[async_trait]
//! impl HeaderCapability for Banner {
//!     async fn get_headers(&self, _: Option<&str>) -> anyhow::Result<Vec<String>> {
//!         Ok(vec!["<meta name=\"generator\" content=\"graphqldoc\">".into()])
//!     }
//! }
//!
//! impl DocPlugin for Banner {
//!     fn headers(&self) -> Option<&dyn HeaderCapability> {
//!         Some(self)
//!     }
//! }
//!
//! fn create_banner(_: &PluginContext) -> anyhow::Result<BoxedPlugin> {
//!     Ok(Box::new(Banner))
//! }
//!
//! static BANNER: PluginDescriptor = define_plugin! {
//!     name: "banner",
//!     create: create_banner,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = DocRuntime::new();
//!     runtime.load_builtin_plugins();
//!     runtime.register_plugin(BANNER);
//!
//!     let introspection = serde_json::from_str(&std::fs::read_to_string("schema.json")?)?;
//!     let (output, pages) = runtime.build(introspection).await?;
//!     println!("{} pages, {} warnings", pages.len(), output.warning_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `builtin`: built-in navigation plugins (default)
//! - `toml-config`: `graphqldoc.toml` support (default)
//! - `yaml-config`: `graphqldoc.yaml` support
//! - `json-log`: JSON log output

pub use graphqldoc_core as core;
pub use graphqldoc_framework as framework;
pub use graphqldoc_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use graphqldoc::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use graphqldoc_runtime::{
        BuildError, BuildOutput, CancellationToken, DocRuntime, MemorySink, PageSink,
    };

    // Plugin system
    pub use graphqldoc_framework::{
        AssetCapability, BoxedPlugin, DocPlugin, DocumentCapability, HeaderCapability,
        MergedPage, NavigationCapability, PluginContext, PluginDescriptor, async_trait,
        define_plugin,
    };

    // Page content
    pub use graphqldoc_core::{
        DocumentSection, NavigationItem, NavigationSection, Page, Schema, TypeRef,
    };
}
