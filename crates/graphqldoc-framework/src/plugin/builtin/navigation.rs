//! Built-in navigation plugins.
//!
//! Each plugin contributes at most one [`NavigationSection`] per page,
//! computed once from the schema when the plugin is instantiated. The item
//! linking to the type page being built is marked active.
//!
//! Directives have no pages of their own: their entries point at
//! `#directive-<name>` anchors on the index page and are never active.
//!
//! # Configuration
//!
//! Every navigation plugin accepts the same optional section:
//!
//! ```toml
//! [plugins."navigation.objects"]
//! title = "Types"                # default: "Objects"
//! include_introspection = true   # list __Schema, __Type, … as well
//! ```

use async_trait::async_trait;
use graphqldoc_core::{Described, NavigationItem, NavigationSection, SchemaType, TypeKind};
use serde::Deserialize;

use crate::context::{BuildContext, PluginContext};
use crate::define_plugin;
use crate::plugin::{BoxedPlugin, DocPlugin, NavigationCapability, PluginDescriptor};

/// Configuration shared by the navigation plugins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Replaces the default section title.
    pub title: Option<String>,
    /// Also list `__`-prefixed introspection types.
    pub include_introspection: bool,
}

struct Entry {
    text: String,
    href: String,
    /// Type whose page this entry links to.
    page: Option<String>,
}

/// One navigation section whose entries are fixed for the whole build.
pub struct NavigationPlugin {
    title: String,
    entries: Vec<Entry>,
}

impl NavigationPlugin {
    fn new(title: String, entries: Vec<Entry>) -> Self {
        Self { title, entries }
    }

    /// The section for the page built for `build_for_type`, or `None` when
    /// there is nothing to list.
    pub fn section(&self, build_for_type: Option<&str>) -> Option<NavigationSection> {
        if self.entries.is_empty() {
            return None;
        }
        let items = self
            .entries
            .iter()
            .map(|entry| {
                let active = build_for_type.is_some_and(|name| entry.page.as_deref() == Some(name));
                NavigationItem::new(entry.text.as_str(), entry.href.as_str(), active)
            })
            .collect();
        Some(NavigationSection::new(self.title.as_str(), items))
    }
}

#[async_trait]
impl NavigationCapability for NavigationPlugin {
    async fn get_navigations(
        &self,
        build_for_type: Option<&str>,
    ) -> anyhow::Result<Vec<NavigationSection>> {
        Ok(self.section(build_for_type).into_iter().collect())
    }
}

impl DocPlugin for NavigationPlugin {
    fn navigations(&self) -> Option<&dyn NavigationCapability> {
        Some(self)
    }
}

// ─── Constructors ─────────────────────────────────────────────────────────────

fn type_entry(build: &BuildContext, ty: &SchemaType) -> Entry {
    Entry {
        text: ty.name().to_string(),
        href: build.type_url(ty),
        page: Some(ty.name().to_string()),
    }
}

fn by_kind(ctx: &PluginContext, kind: TypeKind, title: &str) -> anyhow::Result<BoxedPlugin> {
    let config: NavigationConfig = ctx.get_config()?;
    let build = ctx.build();
    let entries = build
        .document()
        .types_of_kind(kind)
        .filter(|ty| config.include_introspection || !ty.is_introspection())
        .map(|ty| type_entry(build, ty))
        .collect();
    let title = config.title.unwrap_or_else(|| title.to_string());
    Ok(Box::new(NavigationPlugin::new(title, entries)))
}

fn create_schema(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    let config: NavigationConfig = ctx.get_config()?;
    let build = ctx.build();
    let entries = [
        build.query_type(),
        build.mutation_type(),
        build.subscription_type(),
    ]
    .into_iter()
    .flatten()
    .map(|ty| type_entry(build, ty))
    .collect();
    let title = config.title.unwrap_or_else(|| "Schema".to_string());
    Ok(Box::new(NavigationPlugin::new(title, entries)))
}

fn create_scalars(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    by_kind(ctx, TypeKind::Scalar, "Scalars")
}

fn create_enums(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    by_kind(ctx, TypeKind::Enum, "Enums")
}

fn create_objects(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    by_kind(ctx, TypeKind::Object, "Objects")
}

fn create_interfaces(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    by_kind(ctx, TypeKind::Interface, "Interfaces")
}

fn create_unions(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    by_kind(ctx, TypeKind::Union, "Unions")
}

fn create_input_objects(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    by_kind(ctx, TypeKind::InputObject, "Input Objects")
}

fn create_directives(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    let config: NavigationConfig = ctx.get_config()?;
    let build = ctx.build();
    let entries = build
        .document()
        .directives
        .iter()
        .map(|directive| Entry {
            text: directive.name().to_string(),
            href: format!("{}#directive-{}", build.index_url(), directive.name()),
            page: None,
        })
        .collect();
    let title = config.title.unwrap_or_else(|| "Directives".to_string());
    Ok(Box::new(NavigationPlugin::new(title, entries)))
}

// ─── Descriptors ──────────────────────────────────────────────────────────────

/// Lists the root operation types (query, mutation, subscription).
pub static SCHEMA_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.schema",
    create: create_schema,
    metadata: { desc: "Root operation type navigation" },
};

pub static SCALAR_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.scalars",
    create: create_scalars,
    metadata: { desc: "Scalar type navigation" },
};

pub static ENUM_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.enums",
    create: create_enums,
    metadata: { desc: "Enum type navigation" },
};

pub static OBJECT_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.objects",
    create: create_objects,
    metadata: { desc: "Object type navigation" },
};

pub static INTERFACE_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.interfaces",
    create: create_interfaces,
    metadata: { desc: "Interface type navigation" },
};

pub static UNION_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.unions",
    create: create_unions,
    metadata: { desc: "Union type navigation" },
};

pub static INPUT_OBJECT_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.input_objects",
    create: create_input_objects,
    metadata: { desc: "Input object type navigation" },
};

/// Lists directive definitions, linked to anchors on the index page.
pub static DIRECTIVE_NAVIGATION: PluginDescriptor = define_plugin! {
    name: "navigation.directives",
    create: create_directives,
    metadata: { desc: "Directive navigation" },
};
