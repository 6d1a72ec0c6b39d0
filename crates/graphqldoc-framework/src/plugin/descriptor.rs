//! Plugin descriptor: the static, `Copy` handle to a plugin implementation.

use std::fmt;

use super::core::{BoxedPlugin, Plugin, PluginMetadata};
use crate::context::PluginContext;

// ─── API versioning ─────────────────────────────────────────────────────────────

/// Current graphqldoc plugin API version (1.0).
pub const GRAPHQLDOC_PLUGIN_API_VERSION: u32 = 0x0001_0000;

/// Constructor of a plugin instance.
///
/// Called once per build pass, after the schema has been normalized.
pub type PluginFactory = fn(&PluginContext) -> anyhow::Result<BoxedPlugin>;

// ─── PluginDescriptor ─────────────────────────────────────────────────────────

/// A static, `Copy` descriptor that identifies and instantiates a plugin.
///
/// Use the [`define_plugin!`](crate::define_plugin) macro to create one; it can
/// be stored in a `static` item or passed inline.
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    /// Plugin API version this descriptor was compiled against.
    pub api_version: u32,

    /// Plugin name, used in logs, warnings, and as the config lookup key.
    pub name: &'static str,

    /// Creates the live instance.
    pub create: PluginFactory,

    /// Static metadata snapshot for this plugin.
    pub metadata: PluginMetadata,
}

impl PluginDescriptor {
    /// Returns `true` if this descriptor's API version is compatible with the
    /// running framework.
    ///
    /// The major part must match exactly; the descriptor's minor part must be
    /// ≤ the host's minor part.
    pub fn is_compatible(&self) -> bool {
        let host_major = GRAPHQLDOC_PLUGIN_API_VERSION >> 16;
        let desc_major = self.api_version >> 16;
        let desc_minor = self.api_version & 0xFFFF;
        let host_minor = GRAPHQLDOC_PLUGIN_API_VERSION & 0xFFFF;
        desc_major == host_major && desc_minor <= host_minor
    }

    /// Runs the constructor and names the resulting instance.
    pub fn instantiate(&self, ctx: &PluginContext) -> anyhow::Result<Plugin> {
        let instance = (self.create)(ctx)?;
        Ok(Plugin::new(self.name, self.metadata, instance))
    }

    /// Returns this plugin's static [`PluginMetadata`].
    #[inline]
    pub fn metadata(&self) -> PluginMetadata {
        self.metadata
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("api_version", &format_args!("{:#010x}", self.api_version))
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Formats an API version as `major.minor`.
pub(crate) fn format_api_version(version: u32) -> String {
    format!("{}.{}", version >> 16, version & 0xFFFF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::DocPlugin;

    struct Empty;

    impl DocPlugin for Empty {}

    fn create(_: &PluginContext) -> anyhow::Result<BoxedPlugin> {
        Ok(Box::new(Empty))
    }

    fn descriptor(api_version: u32) -> PluginDescriptor {
        PluginDescriptor {
            api_version,
            name: "empty",
            create,
            metadata: PluginMetadata {
                version: "1.0.0",
                desc: "",
                full_desc: None,
            },
        }
    }

    #[test]
    fn test_version_compatibility() {
        assert!(descriptor(GRAPHQLDOC_PLUGIN_API_VERSION).is_compatible());
        assert!(descriptor(0x0001_0000).is_compatible());
        assert!(!descriptor(0x0001_0001).is_compatible());
        assert!(!descriptor(0x0002_0000).is_compatible());
        assert_eq!(format_api_version(0x0002_0003), "2.3");
    }
}
