//! # graphqldoc Framework
//!
//! Plugin contract and orchestration for the graphqldoc documentation
//! generator.
//!
//! This layer provides:
//! - The plugin contract: four optional async capabilities behind
//!   [`DocPlugin`], static [`PluginDescriptor`]s and the
//!   [`define_plugin!`] macro
//! - [`BuildContext`] / [`PluginContext`], the read-only state plugins are
//!   constructed from
//! - [`PluginManager`], which instantiates plugins per build, and its
//!   [`Orchestrator`], which drives capability calls per page
//! - The order-preserving result aggregator
//! - Built-in navigation plugins (with the `builtin` feature)
//!
//! The framework never touches the file system or the network; the runtime
//! layer decides where schemas come from and where pages go.

pub mod aggregate;
pub mod context;
pub mod error;
pub mod manager;
pub mod plugin;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{MergedPage, PluginContribution, merge_assets, merge_page};
pub use context::{BuildContext, DEFAULT_INDEX_URL, Packages, PluginContext};
pub use error::{BuildWarning, PluginExecutionError, PluginInstantiateError};
pub use manager::{Orchestrator, PluginManager};
pub use plugin::{
    AssetCapability, BoxedPlugin, Capability, DocPlugin, DocumentCapability,
    GRAPHQLDOC_PLUGIN_API_VERSION, HeaderCapability, NavigationCapability, Plugin,
    PluginDescriptor, PluginFactory, PluginMetadata,
};

#[doc(hidden)]
pub use async_trait::async_trait;
