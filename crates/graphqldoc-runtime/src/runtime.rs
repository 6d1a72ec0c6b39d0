//! Runtime entry point: configuration, plugin registration and builds.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use graphqldoc_runtime::DocRuntime;
//!
//! // Loads graphqldoc.toml from the current directory, if any
//! let runtime = DocRuntime::new();
//! runtime.load_builtin_plugins();
//!
//! let (output, pages) = runtime.build(introspection).await?;
//! ```
//!
//! Use [`DocRuntime::build_into`] to stream pages to a custom [`PageSink`]
//! and to cancel a running build.

use std::sync::Arc;

use graphqldoc_core::{TypeRefResolver, UrlResolver, default_url_resolver, normalize};
use graphqldoc_framework::{
    BuildContext, DEFAULT_INDEX_URL, MergedPage, Packages, PluginDescriptor, PluginManager,
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::build::{BuildOutput, BuildPass, MemorySink, PageSink};
use crate::config::{ConfigLoader, ConfigResult, GraphqldocConfig, validate_config};
use crate::error::BuildResult;
use crate::logging;

/// Drives documentation builds for one configuration.
///
/// A runtime may run any number of builds; every build gets a fresh set of
/// plugin instances.
///
/// # Custom Configuration
///
/// ```rust,ignore
/// let runtime = DocRuntime::builder()
///     .config_file("docs/graphqldoc.toml")
///     .profile("production")
///     .set("build.base_url", "/api/")
///     .build()?;
/// ```
pub struct DocRuntime {
    config: GraphqldocConfig,
    manager: PluginManager,
    packages: Packages,
    url_resolver: Option<UrlResolver>,
}

impl DocRuntime {
    /// Creates a runtime from `graphqldoc.toml` in the current directory and
    /// the environment.
    ///
    /// Falls back to the default configuration if loading or validation
    /// fails.
    pub fn new() -> Self {
        let config = ConfigLoader::new()
            .with_current_dir()
            .load()
            .and_then(|config| validate_config(&config).map(|()| config))
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to load config ({e}), using defaults");
                GraphqldocConfig::default()
            });

        Self::from_config(&config)
    }

    /// Creates a runtime builder for custom configuration.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from an already loaded configuration.
    ///
    /// Initializes logging from `config.logging` unless a subscriber is
    /// already installed.
    pub fn from_config(config: &GraphqldocConfig) -> Self {
        logging::init_from_config(&config.logging);

        info!(
            log_level = %config.logging.level,
            base_url = %config.build.base_url,
            concurrent_plugins = config.build.concurrent_plugins,
            "Runtime initialized from configuration"
        );

        Self {
            config: config.clone(),
            manager: PluginManager::new(config.plugins.clone()),
            packages: Packages::new(default_package(), Value::Object(Default::default())),
            url_resolver: None,
        }
    }

    /// The effective configuration.
    pub fn config(&self) -> &GraphqldocConfig {
        &self.config
    }

    /// The plugin registry.
    pub fn manager(&self) -> &PluginManager {
        &self.manager
    }

    // ─── Plugins ─────────────────────────────────────────────────────────────

    /// Registers a plugin at the end of the registration order.
    pub fn register_plugin(&self, plugin: PluginDescriptor) {
        self.manager.register_plugin(plugin);
    }

    /// Registers several plugins, keeping their order.
    pub fn register_plugins<I>(&self, plugins: I)
    where
        I: IntoIterator<Item = PluginDescriptor>,
    {
        for plugin in plugins {
            self.manager.register_plugin(plugin);
        }
    }

    /// Registers every built-in navigation plugin.
    #[cfg(feature = "builtin")]
    pub fn load_builtin_plugins(&self) {
        self.register_plugins(graphqldoc_framework::plugin::builtin::builtin_plugins());
    }

    // ─── Build inputs ────────────────────────────────────────────────────────

    /// Replaces the package metadata handed to plugin constructors.
    pub fn with_packages(mut self, packages: Packages) -> Self {
        self.packages = packages;
        self
    }

    /// Sets the metadata of the project being documented.
    pub fn with_project_package(mut self, project: Value) -> Self {
        self.packages.project = Arc::new(project);
        self
    }

    /// Replaces the default `base_url + name + ".doc.html"` page URLs.
    pub fn with_url_resolver(mut self, url_resolver: UrlResolver) -> Self {
        self.url_resolver = Some(url_resolver);
        self
    }

    fn type_ref_resolver(&self) -> TypeRefResolver {
        let url = self
            .url_resolver
            .clone()
            .unwrap_or_else(|| default_url_resolver(self.config.build.base_url.clone()));
        TypeRefResolver::new(url).with_max_depth(self.config.build.max_type_depth)
    }

    /// The index page URL: `base_url` + `index.html`.
    pub fn index_url(&self) -> String {
        format!("{}{DEFAULT_INDEX_URL}", self.config.build.base_url)
    }

    // ─── Builds ──────────────────────────────────────────────────────────────

    /// Builds every page of `introspection` and returns them in page order.
    pub async fn build(&self, introspection: Value) -> BuildResult<(BuildOutput, Vec<MergedPage>)> {
        let sink = MemorySink::new();
        let output = self
            .build_into(introspection, &sink, &CancellationToken::new())
            .await?;
        Ok((output, sink.into_pages()))
    }

    /// Builds every page of `introspection`, publishing each one to `sink`
    /// as soon as it and all pages before it are merged.
    ///
    /// Cancelling `cancel` stops the build before the next page is
    /// published and returns [`BuildError::Cancelled`].
    ///
    /// [`BuildError::Cancelled`]: crate::error::BuildError::Cancelled
    pub async fn build_into(
        &self,
        introspection: Value,
        sink: &dyn PageSink,
        cancel: &CancellationToken,
    ) -> BuildResult<BuildOutput> {
        let schema = normalize(introspection)?;
        let build = Arc::new(
            BuildContext::new(Arc::new(schema), self.type_ref_resolver())
                .with_index_url(self.index_url()),
        );

        let (orchestrator, warnings) = self.manager.instantiate_all(Arc::clone(&build), &self.packages);
        let orchestrator = orchestrator.with_concurrency(self.config.build.concurrent_plugins);
        debug!(
            plugins = orchestrator.len(),
            excluded = warnings.len(),
            "Plugins instantiated"
        );

        BuildPass {
            build,
            orchestrator,
            warnings,
            page_concurrency: self.config.build.page_concurrency,
            include_introspection_types: self.config.build.include_introspection_types,
        }
        .run(sink, cancel)
        .await
    }
}

impl Default for DocRuntime {
    fn default() -> Self {
        Self::new()
    }
}

fn default_package() -> Value {
    json!({
        "name": "graphqldoc",
        "version": env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for creating a [`DocRuntime`] with custom configuration.
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder searching the current directory.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
        }
    }

    /// Loads exactly this file instead of searching.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Selects the `graphqldoc.<profile>.*` file layered under the main file.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Also searches `path` for configuration files.
    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Reads `GRAPHQLDOC_*` variables (the default).
    pub fn with_env(mut self) -> Self {
        self.config_loader = self.config_loader.with_env();
        self
    }

    /// Ignores `GRAPHQLDOC_*` variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges a base configuration under the files and the environment.
    pub fn merge(mut self, config: GraphqldocConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Overrides a single key, e.g. `set("build.page_concurrency", 1)`.
    pub fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        self.config_loader = self.config_loader.set(key, value);
        self
    }

    /// Loads and validates the configuration, then builds the runtime.
    pub fn build(self) -> ConfigResult<DocRuntime> {
        let config = self.config_loader.load()?;
        validate_config(&config)?;
        Ok(DocRuntime::from_config(&config))
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_builder_applies_overrides() {
        let runtime = DocRuntime::builder()
            .without_env()
            .set("build.base_url", "/api/")
            .set("build.max_type_depth", 8)
            .build()
            .unwrap();

        assert_eq!(runtime.config().build.base_url, "/api/");
        assert_eq!(runtime.index_url(), "/api/index.html");
        let resolver = runtime.type_ref_resolver();
        assert_eq!(resolver.max_depth(), 8);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = DocRuntime::builder()
            .without_env()
            .set("build.page_concurrency", 0)
            .build();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_packages() {
        let runtime = DocRuntime::from_config(&GraphqldocConfig::default())
            .with_project_package(json!({ "name": "petstore" }));
        assert_eq!(runtime.packages.graphqldoc["name"], "graphqldoc");
        assert_eq!(runtime.packages.project["name"], "petstore");
    }
}
