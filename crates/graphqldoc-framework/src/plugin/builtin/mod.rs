//! Built-in plugins shipped with the graphqldoc framework.
//!
//! These plugins are enabled by the `builtin` feature flag (on by default) and
//! provide the navigation most documentation sites need.
//!
//! | Plugin | Name | Contributes |
//! |--------|------|-------------|
//! | [`SCHEMA_NAVIGATION`] | `"navigation.schema"` | Root operation types |
//! | [`SCALAR_NAVIGATION`] | `"navigation.scalars"` | Scalars |
//! | [`ENUM_NAVIGATION`] | `"navigation.enums"` | Enums |
//! | [`OBJECT_NAVIGATION`] | `"navigation.objects"` | Objects |
//! | [`INTERFACE_NAVIGATION`] | `"navigation.interfaces"` | Interfaces |
//! | [`UNION_NAVIGATION`] | `"navigation.unions"` | Unions |
//! | [`INPUT_OBJECT_NAVIGATION`] | `"navigation.input_objects"` | Input objects |
//! | [`DIRECTIVE_NAVIGATION`] | `"navigation.directives"` | Directives |
//!
//! # Loading built-in plugins
//!
//! ```rust,ignore
//! use graphqldoc_framework::plugin::builtin::builtin_plugins;
//!
//! for plugin in builtin_plugins() {
//!     manager.register_plugin(plugin);
//! }
//! ```

pub mod navigation;

pub use navigation::{
    DIRECTIVE_NAVIGATION, ENUM_NAVIGATION, INPUT_OBJECT_NAVIGATION, INTERFACE_NAVIGATION,
    OBJECT_NAVIGATION, SCALAR_NAVIGATION, SCHEMA_NAVIGATION, UNION_NAVIGATION,
};

use crate::plugin::PluginDescriptor;

/// Every built-in plugin, in the order the navigation sidebar lists them.
pub fn builtin_plugins() -> [PluginDescriptor; 8] {
    [
        SCHEMA_NAVIGATION,
        SCALAR_NAVIGATION,
        ENUM_NAVIGATION,
        OBJECT_NAVIGATION,
        INTERFACE_NAVIGATION,
        UNION_NAVIGATION,
        INPUT_OBJECT_NAVIGATION,
        DIRECTIVE_NAVIGATION,
    ]
}
