//! Plugin registration and per-build orchestration.
//!
//! [`PluginManager`] owns the ordered list of registered
//! [`PluginDescriptor`]s and the per-plugin configuration sections. For each
//! build pass it instantiates every descriptor against the shared
//! [`BuildContext`] and hands back an [`Orchestrator`], which:
//!
//! - calls `get_assets` once per build on every instance, in registration
//!   order ([`collect_assets`](Orchestrator::collect_assets));
//! - calls `get_navigations`, `get_documents` and `get_headers` on every
//!   instance for one page and merges the results in registration order
//!   ([`build_page`](Orchestrator::build_page)).
//!
//! Capability calls may run concurrently, but results are always merged in
//! registration order, never completion order. A failing call becomes a
//! [`BuildWarning`]; its contribution is dropped and everything else goes on.
//!
//! # Example
//!
//! ```rust,ignore
//! use graphqldoc_framework::manager::PluginManager;
//!
//! let manager = PluginManager::new(HashMap::new());
//! manager.register_plugin(MY_PLUGIN);
//!
//! let (orchestrator, mut warnings) = manager.instantiate_all(build, &packages);
//! let (assets, asset_warnings) = orchestrator.collect_assets().await;
//! let (index, page_warnings) = orchestrator.build_page(&Page::Index).await;
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future;
use graphqldoc_core::{DocumentSection, NavigationSection, Page};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::aggregate::{MergedPage, PluginContribution, merge_assets, merge_page};
use crate::context::{BuildContext, Packages, PluginContext};
use crate::error::{BuildWarning, PluginExecutionError, PluginInstantiateError};
use crate::plugin::descriptor::format_api_version;
use crate::plugin::{Capability, GRAPHQLDOC_PLUGIN_API_VERSION, Plugin, PluginDescriptor};

// =============================================================================
// PluginManager
// =============================================================================

/// Ordered registry of plugin descriptors.
///
/// Registration order is significant: it is the order in which every merged
/// sequence of the build is concatenated.
///
/// # Plugin configuration
///
/// `plugin_configs` maps a plugin name to the JSON value of
/// `graphqldoc.toml → plugins → <name>`. A plugin without a section receives
/// an empty object.
pub struct PluginManager {
    plugins: RwLock<Vec<PluginDescriptor>>,
    /// Per-plugin config sections, keyed by plugin name.
    plugin_configs: HashMap<String, Value>,
}

impl PluginManager {
    /// Creates a new manager with the given per-plugin config map.
    pub fn new(plugin_configs: HashMap<String, Value>) -> Self {
        Self {
            plugins: RwLock::new(Vec::new()),
            plugin_configs,
        }
    }

    // ─── Plugin registration ─────────────────────────────────────────────────

    /// Appends a plugin to the registration order.
    ///
    /// Logs a warning when the API version does not match, but registers the
    /// plugin anyway.
    pub fn register_plugin(&self, desc: PluginDescriptor) {
        if !desc.is_compatible() {
            warn!(
                plugin = %desc.name,
                descriptor_version = %format_api_version(desc.api_version),
                host_version = %format_api_version(GRAPHQLDOC_PLUGIN_API_VERSION),
                "Plugin API version mismatch, registering anyway"
            );
        }
        self.plugins.write().push(desc);
        info!(plugin = %desc.name, version = %desc.metadata.version, "Plugin registered");
    }

    /// Removes the first plugin whose name matches `name`.
    ///
    /// Returns `true` if a plugin was removed.
    pub fn remove_plugin(&self, name: &str) -> bool {
        let mut plugins = self.plugins.write();
        match plugins.iter().position(|d| d.name == name) {
            Some(pos) => {
                plugins.remove(pos);
                info!(plugin = %name, "Plugin removed");
                true
            }
            None => false,
        }
    }

    /// Returns the number of registered plugins.
    pub fn plugin_count(&self) -> usize {
        self.plugins.read().len()
    }

    /// Registered plugin names, in registration order.
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.read().iter().map(|d| d.name).collect()
    }

    /// The configuration section handed to `name`'s constructor.
    pub fn plugin_config(&self, name: &str) -> Value {
        match self.plugin_configs.get(name) {
            Some(Value::Null) | None => Value::Object(Map::default()),
            Some(config) => config.clone(),
        }
    }

    // ─── Instantiation ───────────────────────────────────────────────────────

    /// Runs every registered constructor against `build`.
    ///
    /// A constructor that fails excludes its plugin from this build; the
    /// failure is returned as a warning and the remaining plugins keep their
    /// relative order.
    pub fn instantiate_all(
        &self,
        build: Arc<BuildContext>,
        packages: &Packages,
    ) -> (Orchestrator, Vec<BuildWarning>) {
        let descriptors = self.plugins.read().clone();
        let mut plugins = Vec::with_capacity(descriptors.len());
        let mut warnings = Vec::new();

        for desc in descriptors {
            let ctx = PluginContext::new(
                Arc::clone(&build),
                packages.clone(),
                Arc::new(self.plugin_config(desc.name)),
            );
            match desc.instantiate(&ctx) {
                Ok(plugin) => {
                    debug!(
                        plugin = %plugin.name(),
                        capabilities = ?plugin.capabilities(),
                        "Plugin instantiated"
                    );
                    plugins.push(plugin);
                }
                Err(error) => {
                    warn!(
                        plugin = %desc.name,
                        error = %format!("{error:#}"),
                        "Plugin constructor failed, plugin excluded from this build"
                    );
                    warnings.push(
                        PluginInstantiateError {
                            plugin: desc.name.to_string(),
                            error,
                        }
                        .into(),
                    );
                }
            }
        }

        (Orchestrator::new(plugins), warnings)
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// The instantiated plugins of one build pass.
///
/// Read-only after construction, so pages may be built concurrently from a
/// shared reference.
pub struct Orchestrator {
    plugins: Vec<Plugin>,
    concurrent: bool,
}

/// Raw results of one plugin's page-level calls. `None` means the capability
/// is absent.
struct PageCalls {
    navigations: Option<anyhow::Result<Vec<NavigationSection>>>,
    documents: Option<anyhow::Result<Vec<DocumentSection>>>,
    headers: Option<anyhow::Result<Vec<String>>>,
}

impl Orchestrator {
    /// Wraps instances that are already in registration order.
    pub fn new(plugins: Vec<Plugin>) -> Self {
        Self {
            plugins,
            concurrent: true,
        }
    }

    /// Whether capability calls for one page are issued concurrently
    /// (default) or strictly one after another.
    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Participating plugins, in registration order.
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Calls `get_assets` once on every plugin and concatenates the results
    /// in registration order.
    pub async fn collect_assets(&self) -> (Vec<PathBuf>, Vec<BuildWarning>) {
        let span = span!(Level::DEBUG, "assets", plugins = self.plugins.len());
        async move {
            let calls = self.plugins.iter().map(|plugin| async move {
                match plugin.instance().assets() {
                    Some(cap) => Some(cap.get_assets().await),
                    None => None,
                }
            });
            let outcomes = if self.concurrent {
                future::join_all(calls).await
            } else {
                let mut outcomes = Vec::with_capacity(self.plugins.len());
                for call in calls {
                    outcomes.push(call.await);
                }
                outcomes
            };

            let mut warnings = Vec::new();
            let per_plugin: Vec<Vec<PathBuf>> = self
                .plugins
                .iter()
                .zip(outcomes)
                .map(|(plugin, outcome)| {
                    let paths = settle(plugin, Capability::Assets, None, outcome, &mut warnings);
                    for path in paths.iter().filter(|p| !p.is_absolute()) {
                        warn!(
                            plugin = %plugin.name(),
                            path = %path.display(),
                            "Asset path is not absolute"
                        );
                    }
                    paths
                })
                .collect();

            let assets = merge_assets(per_plugin);
            debug!(assets = assets.len(), "Assets collected");
            (assets, warnings)
        }
        .instrument(span)
        .await
    }

    /// Builds one page: every plugin's page-level capabilities are called with
    /// the page's `buildForType` and the results merged in registration order.
    ///
    /// The returned page is complete: every participating call has either
    /// resolved or failed.
    pub async fn build_page(&self, page: &Page) -> (MergedPage, Vec<BuildWarning>) {
        let span = span!(Level::DEBUG, "page", page = %page);
        async move {
            let build_for_type = page.build_for_type();
            let outcomes = if self.concurrent {
                future::join_all(
                    self.plugins
                        .iter()
                        .map(|plugin| call_page(plugin, build_for_type, true)),
                )
                .await
            } else {
                let mut outcomes = Vec::with_capacity(self.plugins.len());
                for plugin in &self.plugins {
                    outcomes.push(call_page(plugin, build_for_type, false).await);
                }
                outcomes
            };

            let mut warnings = Vec::new();
            let contributions: Vec<PluginContribution> = self
                .plugins
                .iter()
                .zip(outcomes)
                .map(|(plugin, calls)| PluginContribution {
                    plugin: plugin.name().to_string(),
                    navigations: settle(
                        plugin,
                        Capability::Navigations,
                        Some(page),
                        calls.navigations,
                        &mut warnings,
                    ),
                    documents: settle(
                        plugin,
                        Capability::Documents,
                        Some(page),
                        calls.documents,
                        &mut warnings,
                    ),
                    headers: settle(
                        plugin,
                        Capability::Headers,
                        Some(page),
                        calls.headers,
                        &mut warnings,
                    ),
                })
                .collect();

            let merged = merge_page(page.clone(), contributions);
            debug!(
                navigations = merged.navigations.len(),
                documents = merged.documents.len(),
                headers = merged.headers.len(),
                warnings = warnings.len(),
                "Page merged"
            );
            (merged, warnings)
        }
        .instrument(span)
        .await
    }
}

/// Issues one plugin's page-level calls, skipping absent capabilities.
async fn call_page(plugin: &Plugin, build_for_type: Option<&str>, concurrent: bool) -> PageCalls {
    let instance = plugin.instance();
    let navigations = async {
        match instance.navigations() {
            Some(cap) => Some(cap.get_navigations(build_for_type).await),
            None => None,
        }
    };
    let documents = async {
        match instance.documents() {
            Some(cap) => Some(cap.get_documents(build_for_type).await),
            None => None,
        }
    };
    let headers = async {
        match instance.headers() {
            Some(cap) => Some(cap.get_headers(build_for_type).await),
            None => None,
        }
    };

    if concurrent {
        let (navigations, documents, headers) = futures::join!(navigations, documents, headers);
        PageCalls {
            navigations,
            documents,
            headers,
        }
    } else {
        PageCalls {
            navigations: navigations.await,
            documents: documents.await,
            headers: headers.await,
        }
    }
}

/// Turns one capability outcome into its contribution, recording a warning
/// on failure.
fn settle<T>(
    plugin: &Plugin,
    capability: Capability,
    page: Option<&Page>,
    outcome: Option<anyhow::Result<Vec<T>>>,
    warnings: &mut Vec<BuildWarning>,
) -> Vec<T> {
    match outcome {
        None => Vec::new(),
        Some(Ok(items)) => items,
        Some(Err(error)) => {
            match page {
                Some(page) => warn!(
                    plugin = %plugin.name(),
                    page = %page,
                    capability = %capability,
                    error = %format!("{error:#}"),
                    "Plugin call failed, contribution excluded"
                ),
                None => warn!(
                    plugin = %plugin.name(),
                    capability = %capability,
                    error = %format!("{error:#}"),
                    "Plugin call failed, contribution excluded"
                ),
            }
            warnings.push(
                PluginExecutionError {
                    plugin: plugin.name().to_string(),
                    capability,
                    page: page.cloned(),
                    error,
                }
                .into(),
            );
            Vec::new()
        }
    }
}
