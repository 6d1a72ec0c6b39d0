// ─── Internal helper: PluginMetadata builder ──────────────────────────────────
//
// Used exclusively by `define_plugin!`.  Not part of the public API.

/// Internal helper macro: builds a [`PluginMetadata`] from optional overrides.
///
/// # Internal calling convention
///
/// ```text
/// __plugin_metadata!(
///     @parse [$doc?]     ← captured doc literal
///            key: val, … ← raw metadata tokens
/// )
/// ```
///
/// The munched state is `@pm [doc] [version] [desc] [full_desc] [rest…]`,
/// finished once `rest` is empty:
///
/// ```text
/// __plugin_metadata!(@pm [$doc?] [$ver?] [$dsc?] [$fd?] [$($rest)*])
/// ```
///
/// [`PluginMetadata`]: crate::plugin::PluginMetadata
#[macro_export]
#[doc(hidden)]
macro_rules! __plugin_metadata {
    // Entry: receives doc comment and raw metadata tokens
    (@parse [$($doc:expr)?] $($meta:tt)*) => {
        $crate::__plugin_metadata!(@pm [$($doc)?] [] [] [] [$($meta)*])
    };

    // TT-muncher: skip leading comma
    (@pm $doc:tt $ver:tt $dsc:tt $fd:tt [, $($rest:tt)*]) => {
        $crate::__plugin_metadata!(@pm $doc $ver $dsc $fd [$($rest)*])
    };

    // version: "..."
    (@pm $doc:tt [$($old:expr)?] $dsc:tt $fd:tt [version : $v:literal $($rest:tt)*]) => {
        $crate::__plugin_metadata!(@pm $doc [$v] $dsc $fd [$($rest)*])
    };

    // desc: "..."
    (@pm $doc:tt $ver:tt [$($old:expr)?] $fd:tt [desc : $v:literal $($rest:tt)*]) => {
        $crate::__plugin_metadata!(@pm $doc $ver [$v] $fd [$($rest)*])
    };

    // full_desc: "..."
    (@pm $doc:tt $ver:tt $dsc:tt [$($old:expr)?] [full_desc : $v:literal $($rest:tt)*]) => {
        $crate::__plugin_metadata!(@pm $doc $ver $dsc [$v] [$($rest)*])
    };

    // Skip unknown ident:value pairs
    (@pm $doc:tt $ver:tt $dsc:tt $fd:tt [$ident:ident : $value:tt $($rest:tt)*]) => {
        $crate::__plugin_metadata!(@pm $doc $ver $dsc $fd [$($rest)*])
    };

    // End of tokens → emit
    (@pm $doc:tt $ver:tt $dsc:tt $fd:tt []) => {
        $crate::__plugin_metadata!(@emit $doc $ver $dsc $fd)
    };

    (@get_ver []) => { ::std::env!("CARGO_PKG_VERSION") };
    (@get_ver [$ver:expr]) => { $ver };

    (@get_dsc []) => { ::std::env!("CARGO_PKG_DESCRIPTION") };
    (@get_dsc [$dsc:expr]) => { $dsc };

    // explicit > doc > None
    (@get_fd [$fd:expr] [$($_doc:tt)*]) => { ::std::option::Option::Some($fd) };
    (@get_fd [] [$doc:expr]) => { ::std::option::Option::Some($doc) };
    (@get_fd [] []) => { ::std::option::Option::None };

    (@emit $doc:tt $ver:tt $dsc:tt $fd:tt) => {
        $crate::plugin::PluginMetadata {
            version:   $crate::__plugin_metadata!(@get_ver $ver),
            desc:      $crate::__plugin_metadata!(@get_dsc $dsc),
            full_desc: $crate::__plugin_metadata!(@get_fd $fd $doc),
        }
    };
}

// ─── define_plugin! ──────────────────────────────────────────────────────────

/// Creates a [`PluginDescriptor`], the static `Copy` handle to a plugin.
///
/// # Syntax
///
/// ```rust,ignore
/// use graphqldoc::prelude::*;
///
/// /// Adds a banner to every page header.
/// pub static BANNER: PluginDescriptor = define_plugin! {
///     name: "banner",
///     create: Banner::create,   // fn(&PluginContext) -> anyhow::Result<BoxedPlugin>
///     metadata: {
///         version: "2.0.0",
///         desc:    "Page banner.",
///     },
/// };
/// ```
///
/// ## Field reference
///
/// | Field | Required | Description |
/// |-------|----------|-------------|
/// | `name` | ✓ | Must be **first**. Plugin name and config-section key. |
/// | `create` | ✓ | Path to the constructor. |
/// | `metadata` | none | `{ version, desc, full_desc }` |
///
/// The `///` doc comment above `name:` is captured as `full_desc` when
/// `full_desc` is not set explicitly.
///
/// [`PluginDescriptor`]: crate::plugin::PluginDescriptor
#[macro_export]
macro_rules! define_plugin {
    // ── Entry: with doc comment ───────────────────────────────────────────────
    (
        $(#[doc = $doc:literal])+
        name: $name:literal,
        create: $create:path
        $(, metadata: { $($meta:tt)* })?
        $(,)?
    ) => {
        $crate::define_plugin!(
            @terminal [$name] [$create] [::std::concat!($($doc, " "),*)]
            $($($meta)*)?
        )
    };

    // ── Entry: no doc ─────────────────────────────────────────────────────────
    (
        name: $name:literal,
        create: $create:path
        $(, metadata: { $($meta:tt)* })?
        $(,)?
    ) => {
        $crate::define_plugin!(
            @terminal [$name] [$create] []
            $($($meta)*)?
        )
    };

    // ── @terminal: emit the PluginDescriptor ─────────────────────────────────
    (@terminal [$name:literal] [$create:path] [$($doc:expr)?] $($meta:tt)*) => {{
        const __GRAPHQLDOC_META: $crate::plugin::PluginMetadata =
            $crate::__plugin_metadata!(@parse [$($doc)?] $($meta)*);

        $crate::plugin::PluginDescriptor {
            api_version: $crate::plugin::GRAPHQLDOC_PLUGIN_API_VERSION,
            name:        $name,
            create:      $create,
            metadata:    __GRAPHQLDOC_META,
        }
    }};
}
