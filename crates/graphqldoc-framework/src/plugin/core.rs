use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use graphqldoc_core::{DocumentSection, NavigationSection};

// ─── Capability ───────────────────────────────────────────────────────────────

/// The four optional plugin capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `get_navigations`, once per page.
    Navigations,
    /// `get_documents`, once per page.
    Documents,
    /// `get_headers`, once per page.
    Headers,
    /// `get_assets`, once per build.
    Assets,
}

impl Capability {
    /// All capabilities, in the order the orchestrator invokes them per page
    /// followed by the once-per-build asset capability.
    pub const ALL: [Capability; 4] = [
        Capability::Navigations,
        Capability::Documents,
        Capability::Headers,
        Capability::Assets,
    ];

    /// Name of the capability function.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigations => "get_navigations",
            Self::Documents => "get_documents",
            Self::Headers => "get_headers",
            Self::Assets => "get_assets",
        }
    }

    /// `true` for capabilities invoked once per generated page.
    pub fn is_per_page(&self) -> bool {
        !matches!(self, Self::Assets)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Capability traits ────────────────────────────────────────────────────────

/// Contributes navigation sections to each page.
///
/// `build_for_type` is `None` for the index page and the type's name for that
/// type's page.
#[async_trait]
pub trait NavigationCapability: Send + Sync {
    async fn get_navigations(
        &self,
        build_for_type: Option<&str>,
    ) -> anyhow::Result<Vec<NavigationSection>>;
}

/// Contributes document sections to each page.
#[async_trait]
pub trait DocumentCapability: Send + Sync {
    async fn get_documents(
        &self,
        build_for_type: Option<&str>,
    ) -> anyhow::Result<Vec<DocumentSection>>;
}

/// Contributes header markup strings to each page.
#[async_trait]
pub trait HeaderCapability: Send + Sync {
    async fn get_headers(&self, build_for_type: Option<&str>) -> anyhow::Result<Vec<String>>;
}

/// Contributes asset files, once per build.
///
/// Paths should be absolute; the file writer copies them next to the
/// generated pages.
#[async_trait]
pub trait AssetCapability: Send + Sync {
    async fn get_assets(&self) -> anyhow::Result<Vec<PathBuf>>;
}

// ─── DocPlugin ────────────────────────────────────────────────────────────────

/// A live plugin instance.
///
/// Each capability is exposed through its own accessor. The default for every
/// accessor is `None`, meaning "contributes nothing", so a plugin implements
/// exactly the subset it supports:
///
/// ```rust,ignore
/// struct Banner { text: String }
///
/// #[async_trait]
/// impl HeaderCapability for Banner {
///     async fn get_headers(&self, _: Option<&str>) -> anyhow::Result<Vec<String>> {
///         Ok(vec![format!("<meta name=\"banner\" content=\"{}\">", self.text)])
///     }
/// }
///
/// impl DocPlugin for Banner {
///     fn headers(&self) -> Option<&dyn HeaderCapability> {
///         Some(self)
///     }
/// }
/// ```
pub trait DocPlugin: Send + Sync {
    fn navigations(&self) -> Option<&dyn NavigationCapability> {
        None
    }

    fn documents(&self) -> Option<&dyn DocumentCapability> {
        None
    }

    fn headers(&self) -> Option<&dyn HeaderCapability> {
        None
    }

    fn assets(&self) -> Option<&dyn AssetCapability> {
        None
    }

    /// Whether this instance implements `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Navigations => self.navigations().is_some(),
            Capability::Documents => self.documents().is_some(),
            Capability::Headers => self.headers().is_some(),
            Capability::Assets => self.assets().is_some(),
        }
    }
}

/// Owned, type-erased plugin instance.
pub type BoxedPlugin = Box<dyn DocPlugin>;

// ─── PluginMetadata ───────────────────────────────────────────────────────────

/// Descriptive metadata attached to every plugin.
///
/// Populated by [`define_plugin!`](crate::define_plugin); `version` and `desc`
/// default to the defining crate's `CARGO_PKG_VERSION` and
/// `CARGO_PKG_DESCRIPTION`.
#[derive(Debug, Clone, Copy)]
pub struct PluginMetadata {
    /// Semver version string of the plugin.
    pub version: &'static str,
    /// One-line description shown in logs.
    pub desc: &'static str,
    /// Optional long-form description.
    pub full_desc: Option<&'static str>,
}

// ─── Plugin ───────────────────────────────────────────────────────────────────

/// A named plugin instance taking part in one build pass.
pub struct Plugin {
    name: &'static str,
    metadata: PluginMetadata,
    instance: BoxedPlugin,
}

impl Plugin {
    /// Wraps an instance produced by a plugin constructor.
    pub fn new(name: &'static str, metadata: PluginMetadata, instance: BoxedPlugin) -> Self {
        Self {
            name,
            metadata,
            instance,
        }
    }

    /// Returns the plugin's display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the plugin's metadata.
    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    /// The capability implementation.
    pub fn instance(&self) -> &dyn DocPlugin {
        self.instance.as_ref()
    }

    /// Capabilities this instance supports, in [`Capability::ALL`] order.
    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.instance.supports(*cap))
            .collect()
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("version", &self.metadata.version)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
