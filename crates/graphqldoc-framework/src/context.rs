//! Contexts shared with plugins.
//!
//! - [`BuildContext`] is the read-only view of one build pass: the normalized
//!   schema, the page URLs and the root operation types. Every plugin of
//!   the pass holds the same `Arc<BuildContext>`.
//! - [`PluginContext`] is what a plugin constructor receives: the build
//!   context plus the opaque package metadata and the plugin's own
//!   configuration section.

use std::sync::Arc;

use graphqldoc_core::{
    CoreResult, Description, Page, ResolvedType, Schema, SchemaType, TypeRef, TypeRefResolver,
};
use serde_json::Value;

/// Index page URL used when none is configured.
pub const DEFAULT_INDEX_URL: &str = "index.html";

// ─── BuildContext ─────────────────────────────────────────────────────────────

/// Read-only state of one build pass.
///
/// Nothing reachable from a `BuildContext` is mutated after construction, so
/// it can be shared across concurrently built pages.
#[derive(Debug, Clone)]
pub struct BuildContext {
    document: Arc<Schema>,
    resolver: TypeRefResolver,
    index_url: String,
}

impl BuildContext {
    /// Creates a build context over a normalized schema.
    pub fn new(document: Arc<Schema>, resolver: TypeRefResolver) -> Self {
        Self {
            document,
            resolver,
            index_url: DEFAULT_INDEX_URL.to_string(),
        }
    }

    /// Sets the URL of the index page.
    pub fn with_index_url(mut self, index_url: impl Into<String>) -> Self {
        self.index_url = index_url.into();
        self
    }

    /// The normalized schema.
    pub fn document(&self) -> &Schema {
        &self.document
    }

    /// A shared handle to the normalized schema.
    pub fn document_arc(&self) -> Arc<Schema> {
        Arc::clone(&self.document)
    }

    /// The type-reference resolver of this build.
    pub fn resolver(&self) -> &TypeRefResolver {
        &self.resolver
    }

    /// Documentation URL of a type reference.
    pub fn url(&self, type_ref: &TypeRef) -> String {
        self.resolver.url(type_ref)
    }

    /// Documentation URL of a named schema type.
    pub fn type_url(&self, ty: &SchemaType) -> String {
        let type_ref = TypeRef {
            base: ty.base.clone(),
            of_type: None,
        };
        self.resolver.url(&type_ref)
    }

    /// URL of the index page.
    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// URL under which `page` is published.
    pub fn page_url(&self, page: &Page) -> String {
        match page {
            Page::Index => self.index_url.clone(),
            Page::Type(name) => match self.document.find_type(name) {
                Some(ty) => self.type_url(ty),
                None => self.url(&TypeRef {
                    base: Description::named(name.as_str()),
                    of_type: None,
                }),
            },
        }
    }

    /// Resolves a type reference to its canonical name and URL.
    pub fn resolve(&self, type_ref: &TypeRef) -> CoreResult<ResolvedType> {
        self.resolver.resolve(type_ref)
    }

    /// The query root type, if the schema defines it.
    pub fn query_type(&self) -> Option<&SchemaType> {
        self.document.query_type()
    }

    /// The mutation root type, if any.
    pub fn mutation_type(&self) -> Option<&SchemaType> {
        self.document.mutation_type()
    }

    /// The subscription root type, if any.
    pub fn subscription_type(&self) -> Option<&SchemaType> {
        self.document.subscription_type()
    }
}

// ─── Packages ─────────────────────────────────────────────────────────────────

/// Opaque package metadata handed to every plugin constructor.
///
/// The core never interprets either value.
#[derive(Debug, Clone, Default)]
pub struct Packages {
    /// Metadata of the generator itself.
    pub graphqldoc: Arc<Value>,
    /// Metadata of the project being documented.
    pub project: Arc<Value>,
}

impl Packages {
    pub fn new(graphqldoc: Value, project: Value) -> Self {
        Self {
            graphqldoc: Arc::new(graphqldoc),
            project: Arc::new(project),
        }
    }
}

// ─── PluginContext ────────────────────────────────────────────────────────────

/// Context passed to a plugin constructor.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(serde::Deserialize, Default)]
/// #[serde(default)]
/// struct BannerConfig { text: String }
///
/// fn create(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
///     let cfg: BannerConfig = ctx.get_config()?;
///     Ok(Box::new(Banner { text: cfg.text }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PluginContext {
    build: Arc<BuildContext>,
    packages: Packages,
    plugin_config: Arc<Value>,
}

impl PluginContext {
    pub(crate) fn new(build: Arc<BuildContext>, packages: Packages, plugin_config: Arc<Value>) -> Self {
        Self {
            build,
            packages,
            plugin_config,
        }
    }

    /// The build context of the current pass.
    pub fn build(&self) -> &BuildContext {
        &self.build
    }

    /// A shared handle to the build context, for plugins that keep it.
    pub fn build_arc(&self) -> Arc<BuildContext> {
        Arc::clone(&self.build)
    }

    /// The normalized schema.
    pub fn document(&self) -> &Schema {
        self.build.document()
    }

    /// Opaque generator package metadata.
    pub fn graphqldoc_package(&self) -> &Value {
        &self.packages.graphqldoc
    }

    /// Opaque project package metadata.
    pub fn project_package(&self) -> &Value {
        &self.packages.project
    }

    /// Raw JSON of this plugin's configuration section (an empty object when
    /// absent).
    pub fn config_json(&self) -> &Value {
        &self.plugin_config
    }

    /// Deserialises the plugin configuration section into `T`.
    ///
    /// Use `#[serde(default)]` on `T` to make every field optional.
    pub fn get_config<T>(&self) -> serde_json::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        T::deserialize(self.plugin_config.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_context;
    use graphqldoc_core::TypeKind;
    use serde_json::json;

    #[test]
    fn test_root_types() {
        let ctx = build_context();
        assert_eq!(ctx.query_type().map(|t| t.base.name.as_str()), Some("Query"));
        assert_eq!(
            ctx.mutation_type().map(|t| t.base.name.as_str()),
            Some("Mutation")
        );
        assert!(ctx.subscription_type().is_none());
    }

    #[test]
    fn test_type_url() {
        let ctx = build_context();
        let query = ctx.query_type().unwrap();
        assert_eq!(ctx.type_url(query), "/docs/query.doc.html");
        let list = TypeRef::list(TypeRef::named(TypeKind::Scalar, "String"));
        assert_eq!(ctx.url(&list), "/docs/string.doc.html");
    }

    #[test]
    fn test_page_urls() {
        let ctx = BuildContext::clone(&build_context()).with_index_url("/docs/index.html");
        assert_eq!(ctx.page_url(&Page::Index), "/docs/index.html");
        assert_eq!(ctx.page_url(&Page::Type("User".into())), "/docs/user.doc.html");
        assert_eq!(DEFAULT_INDEX_URL, build_context().index_url());
    }

    #[derive(serde::Deserialize, Default, Debug, PartialEq)]
    #[serde(default)]
    struct SampleConfig {
        title: String,
        depth: u32,
    }

    #[test]
    fn test_plugin_config() {
        let ctx = PluginContext::new(
            build_context(),
            Packages::new(json!({ "name": "graphqldoc" }), json!({ "name": "shop" })),
            Arc::new(json!({ "title": "Shop API" })),
        );
        let cfg: SampleConfig = ctx.get_config().unwrap();
        assert_eq!(cfg.title, "Shop API");
        assert_eq!(cfg.depth, 0);
        assert_eq!(ctx.project_package()["name"], "shop");
        assert_eq!(ctx.graphqldoc_package()["name"], "graphqldoc");
    }
}
