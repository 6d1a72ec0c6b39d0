//! Plugin contract for the graphqldoc framework.
//!
//! # Architecture
//!
//! A plugin contributes content to the generated document set through up to
//! four **optional capabilities**:
//!
//! | Capability | Trait | Invoked |
//! |------------|-------|---------|
//! | navigations | [`NavigationCapability`] | once per page |
//! | documents | [`DocumentCapability`] | once per page |
//! | headers | [`HeaderCapability`] | once per page |
//! | assets | [`AssetCapability`] | once per build, before any page |
//!
//! A live instance implements [`DocPlugin`], whose accessors return
//! `Some(&dyn Capability)` for the capabilities it supports and `None`
//! otherwise. The orchestrator checks support before invoking; an absent
//! capability contributes an empty sequence.
//!
//! A [`PluginDescriptor`] is the *static, `Copy` handle* to a plugin: its
//! name, metadata, API version, and constructor. The
//! [`PluginManager`](crate::manager::PluginManager) runs the constructor once
//! per build with a [`PluginContext`](crate::context::PluginContext).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use graphqldoc::prelude::*;
//!
//! struct Footer;
//!
//! #[async_trait]
//! impl DocumentCapability for Footer {
//!     async fn get_documents(&self, _: Option<&str>) -> anyhow::Result<Vec<DocumentSection>> {
//!         Ok(vec![DocumentSection::new("About", "Generated by graphqldoc")])
//!     }
//! }
//!
//! impl DocPlugin for Footer {
//!     fn documents(&self) -> Option<&dyn DocumentCapability> {
//!         Some(self)
//!     }
//! }
//!
//! fn create(_: &PluginContext) -> anyhow::Result<BoxedPlugin> {
//!     Ok(Box::new(Footer))
//! }
//!
//! pub static FOOTER: PluginDescriptor = define_plugin! {
//!     name: "footer",
//!     create: create,
//! };
//! ```
//!
//! # Configuration
//!
//! Plugin configuration is loaded from `graphqldoc.toml` under
//! `plugins.<name>` and exposed to the constructor through
//! [`PluginContext::get_config`](crate::context::PluginContext::get_config):
//!
//! ```toml
//! [plugins.footer]
//! text = "© Shop Inc."
//! ```

// ─── Submodules ──────────────────────────────────────────────────────────────
pub mod core;
pub mod descriptor;
pub mod macros;

#[cfg(feature = "builtin")]
pub mod builtin;

// ─── Re-exports from submodules ──────────────────────────────────────────────
pub use core::{
    AssetCapability, BoxedPlugin, Capability, DocPlugin, DocumentCapability, HeaderCapability,
    NavigationCapability, Plugin, PluginMetadata,
};
pub use descriptor::{GRAPHQLDOC_PLUGIN_API_VERSION, PluginDescriptor, PluginFactory};
