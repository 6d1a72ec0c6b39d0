use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use graphqldoc_core::{DocumentSection, NavigationSection, Page};
use graphqldoc_framework::{
    AssetCapability, BoxedPlugin, DocPlugin, DocumentCapability, HeaderCapability, MergedPage,
    NavigationCapability, PluginContext, PluginDescriptor, define_plugin,
};
use graphqldoc_runtime::{BuildError, CancellationToken, DocRuntime, MemorySink, PageSink};
use serde_json::{Value, json};

// ─── Fixtures ────────────────────────────────────────────────────────────────

fn named(kind: &str, name: &str) -> Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

fn wrap(kind: &str, inner: Value) -> Value {
    json!({ "kind": kind, "name": null, "ofType": inner })
}

fn field(name: &str, ty: Value) -> Value {
    json!({
        "name": name,
        "description": null,
        "args": [],
        "type": ty,
        "isDeprecated": false,
        "deprecationReason": null
    })
}

fn schema_body() -> Value {
    json!({
        "queryType": { "name": "Query" },
        "mutationType": null,
        "subscriptionType": null,
        "types": [
            {
                "kind": "OBJECT",
                "name": "Query",
                "fields": [
                    field("pet", named("OBJECT", "Pet")),
                    field("pets", wrap("NON_NULL", wrap("LIST", named("OBJECT", "Pet"))))
                ],
                "interfaces": []
            },
            {
                "kind": "OBJECT",
                "name": "Pet",
                "description": "A pet in the store",
                "fields": [
                    field("id", wrap("NON_NULL", named("SCALAR", "ID"))),
                    field("status", named("ENUM", "Status"))
                ],
                "interfaces": []
            },
            {
                "kind": "ENUM",
                "name": "Status",
                "enumValues": [
                    { "name": "AVAILABLE", "isDeprecated": false },
                    { "name": "SOLD", "isDeprecated": false }
                ]
            },
            { "kind": "SCALAR", "name": "ID" },
            { "kind": "OBJECT", "name": "__Type", "fields": [] }
        ],
        "directives": []
    })
}

fn wrapped() -> Value {
    json!({ "data": { "__schema": schema_body() } })
}

fn raw() -> Value {
    json!({ "__schema": schema_body() })
}

fn runtime() -> DocRuntime {
    DocRuntime::builder()
        .without_env()
        .set("build.base_url", "/docs/")
        .build()
        .unwrap()
}

/// URL each page is published under with `base_url = "/docs/"`.
fn published_url(runtime: &DocRuntime, page: &Page) -> String {
    match page {
        Page::Index => runtime.index_url(),
        Page::Type(name) => format!("/docs/{}.doc.html", name.to_lowercase()),
    }
}

fn page_names(pages: &[MergedPage]) -> Vec<String> {
    pages.iter().map(|p| p.page.to_string()).collect()
}

// ─── Test plugins ────────────────────────────────────────────────────────────

/// Documents every page and adds a configurable header.
struct Banner {
    text: String,
}

#[async_trait]
impl HeaderCapability for Banner {
    async fn get_headers(&self, _: Option<&str>) -> anyhow::Result<Vec<String>> {
        Ok(vec![format!("<meta name=\"banner\" content=\"{}\">", self.text)])
    }
}

#[async_trait]
impl DocumentCapability for Banner {
    async fn get_documents(
        &self,
        build_for_type: Option<&str>,
    ) -> anyhow::Result<Vec<DocumentSection>> {
        Ok(vec![DocumentSection::new(
            build_for_type.unwrap_or("Index"),
            "",
        )])
    }
}

impl DocPlugin for Banner {
    fn headers(&self) -> Option<&dyn HeaderCapability> {
        Some(self)
    }
    fn documents(&self) -> Option<&dyn DocumentCapability> {
        Some(self)
    }
}

fn create_banner(ctx: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    let text = ctx.config_json()["text"]
        .as_str()
        .unwrap_or("graphqldoc")
        .to_string();
    Ok(Box::new(Banner { text }))
}

static BANNER: PluginDescriptor = define_plugin! {
    /// Adds a banner header to every page.
    name: "banner",
    create: create_banner,
};

/// Fails navigation on the `Pet` page only.
struct PetHater;

#[async_trait]
impl NavigationCapability for PetHater {
    async fn get_navigations(
        &self,
        build_for_type: Option<&str>,
    ) -> anyhow::Result<Vec<NavigationSection>> {
        if build_for_type == Some("Pet") {
            anyhow::bail!("no pets allowed");
        }
        Ok(vec![NavigationSection::new("Extra", vec![])])
    }
}

impl DocPlugin for PetHater {
    fn navigations(&self) -> Option<&dyn NavigationCapability> {
        Some(self)
    }
}

fn create_pet_hater(_: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    Ok(Box::new(PetHater))
}

static PET_HATER: PluginDescriptor = define_plugin! {
    name: "pet-hater",
    create: create_pet_hater,
};

fn create_unconstructible(_: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    anyhow::bail!("missing API key")
}

static UNCONSTRUCTIBLE: PluginDescriptor = define_plugin! {
    name: "unconstructible",
    create: create_unconstructible,
};

static ASSET_CALLS: AtomicUsize = AtomicUsize::new(0);

/// Counts asset requests.
struct Stylesheet;

#[async_trait]
impl AssetCapability for Stylesheet {
    async fn get_assets(&self) -> anyhow::Result<Vec<PathBuf>> {
        ASSET_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(vec![PathBuf::from("/usr/share/graphqldoc/style.css")])
    }
}

impl DocPlugin for Stylesheet {
    fn assets(&self) -> Option<&dyn AssetCapability> {
        Some(self)
    }
}

fn create_stylesheet(_: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    Ok(Box::new(Stylesheet))
}

static STYLESHEET: PluginDescriptor = define_plugin! {
    name: "stylesheet",
    create: create_stylesheet,
};

static FINISHED: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Takes longer on earlier pages, so later pages finish first.
struct Slow;

#[async_trait]
impl DocumentCapability for Slow {
    async fn get_documents(
        &self,
        build_for_type: Option<&str>,
    ) -> anyhow::Result<Vec<DocumentSection>> {
        let delay = match build_for_type {
            None => 80,
            Some("Query") => 60,
            Some("Pet") => 40,
            Some("Status") => 20,
            _ => 0,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;

        let page = build_for_type.unwrap_or("index").to_string();
        FINISHED.lock().unwrap().push(page.clone());
        Ok(vec![DocumentSection::new(page, "")])
    }
}

impl DocPlugin for Slow {
    fn documents(&self) -> Option<&dyn DocumentCapability> {
        Some(self)
    }
}

fn create_slow(_: &PluginContext) -> anyhow::Result<BoxedPlugin> {
    Ok(Box::new(Slow))
}

static SLOW: PluginDescriptor = define_plugin! {
    name: "slow",
    create: create_slow,
};

// ─── Test sinks ──────────────────────────────────────────────────────────────

/// Records how many asset calls had happened when each page arrived.
#[derive(Default)]
struct AssetWitness {
    inner: MemorySink,
    seen: std::sync::Mutex<Vec<usize>>,
}

#[async_trait]
impl PageSink for AssetWitness {
    async fn publish(&self, page: MergedPage) -> anyhow::Result<()> {
        self.seen
            .lock()
            .unwrap()
            .push(ASSET_CALLS.load(Ordering::SeqCst));
        self.inner.publish(page).await
    }
}

/// Cancels the build after its first page.
struct CancelAfterFirst {
    inner: MemorySink,
    cancel: CancellationToken,
}

#[async_trait]
impl PageSink for CancelAfterFirst {
    async fn publish(&self, page: MergedPage) -> anyhow::Result<()> {
        self.inner.publish(page).await?;
        self.cancel.cancel();
        Ok(())
    }
}

struct ReadOnlyDisk;

#[async_trait]
impl PageSink for ReadOnlyDisk {
    async fn publish(&self, _: MergedPage) -> anyhow::Result<()> {
        anyhow::bail!("read-only file system")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_raw_and_wrapped_payloads_build_identical_pages() {
    let runtime = runtime();
    runtime.load_builtin_plugins();
    runtime.register_plugin(BANNER);

    let (_, from_wrapped) = runtime.build(wrapped()).await.unwrap();
    let (_, from_raw) = runtime.build(raw()).await.unwrap();

    assert_eq!(from_wrapped, from_raw);
}

#[tokio::test]
async fn test_pages_follow_schema_order_with_builtin_navigation() {
    let runtime = runtime();
    runtime.load_builtin_plugins();

    let (output, pages) = runtime.build(wrapped()).await.unwrap();

    assert!(output.is_clean());
    assert_eq!(page_names(&pages), ["index", "Query", "Pet", "Status", "ID"]);
    assert_eq!(output.pages.len(), 5);

    let pet = &pages[2];
    let titles: Vec<_> = pet.navigations.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Schema", "Scalars", "Enums", "Objects"]);

    let objects = &pet.navigations[3];
    let active = objects.active_item().unwrap();
    assert_eq!(active.text, "Pet");
    assert_eq!(active.href, "/docs/pet.doc.html");

    assert!(pages[0]
        .navigations
        .iter()
        .all(|section| section.active_item().is_none()));
}

#[tokio::test]
async fn test_builtin_links_point_to_published_pages() {
    let mut payload = raw();
    payload["__schema"]["directives"] = json!([{
        "name": "deprecated",
        "description": "Marks an element as no longer supported.",
        "locations": ["FIELD_DEFINITION", "ENUM_VALUE"],
        "args": []
    }]);

    let runtime = runtime();
    runtime.load_builtin_plugins();
    let (output, pages) = runtime.build(payload).await.unwrap();
    assert!(output.is_clean());

    let published: HashSet<String> = pages
        .iter()
        .map(|p| published_url(&runtime, &p.page))
        .collect();
    assert!(published.contains("/docs/index.html"));

    for page in &pages {
        for item in page.navigations.iter().flat_map(|s| &s.items) {
            let target = item.href.split('#').next().unwrap_or_default();
            assert!(
                published.contains(target),
                "{} links to unpublished {}",
                page.page,
                item.href
            );
        }
    }

    let directives = pages[1]
        .navigations
        .iter()
        .find(|s| s.title == "Directives")
        .unwrap();
    assert_eq!(
        directives.items[0].href,
        "/docs/index.html#directive-deprecated"
    );
    assert!(directives.active_item().is_none());
}

#[tokio::test]
async fn test_concurrent_pages_are_published_in_page_order() {
    let runtime = DocRuntime::builder()
        .without_env()
        .set("build.page_concurrency", 5)
        .build()
        .unwrap();
    runtime.register_plugin(SLOW);

    let (output, pages) = runtime.build(raw()).await.unwrap();

    assert!(output.is_clean());
    assert_eq!(page_names(&pages), ["index", "Query", "Pet", "Status", "ID"]);
    assert_eq!(
        *FINISHED.lock().unwrap(),
        ["ID", "Status", "Pet", "Query", "index"]
    );
}

#[tokio::test]
async fn test_introspection_types_can_be_documented() {
    let runtime = DocRuntime::builder()
        .without_env()
        .set("build.include_introspection_types", true)
        .build()
        .unwrap();

    let (output, _) = runtime.build(raw()).await.unwrap();
    assert_eq!(output.pages.last(), Some(&Page::Type("__Type".into())));
}

#[tokio::test]
async fn test_plugin_config_reaches_constructor() {
    let runtime = DocRuntime::builder()
        .without_env()
        .set("plugins.banner.text", "Petstore")
        .build()
        .unwrap();
    runtime.register_plugin(BANNER);

    let (_, pages) = runtime.build(raw()).await.unwrap();
    assert_eq!(
        pages[1].headers,
        ["<meta name=\"banner\" content=\"Petstore\">"]
    );
    assert_eq!(pages[1].documents[0].title, "Query");
}

#[tokio::test]
async fn test_over_deep_type_fails_only_its_page() {
    let mut deep = named("OBJECT", "Pet");
    for _ in 0..40 {
        deep = wrap("LIST", deep);
    }
    let mut payload = wrapped();
    payload["data"]["__schema"]["types"][0]["fields"]
        .as_array_mut()
        .unwrap()
        .push(field("nested", deep));

    let runtime = runtime();
    runtime.register_plugin(BANNER);
    let (output, pages) = runtime.build(payload).await.unwrap();

    assert_eq!(page_names(&pages), ["index", "Pet", "Status", "ID"]);
    assert_eq!(output.failed_pages.len(), 1);
    assert_eq!(output.failed_pages[0].page, Page::Type("Query".into()));
    assert!(!output.is_clean());
}

#[tokio::test]
async fn test_configured_type_depth_bounds_resolution() {
    let runtime = DocRuntime::builder()
        .without_env()
        .set("build.max_type_depth", 2)
        .build()
        .unwrap();

    // `[Pet]!` has two wrapper links
    let (output, _) = runtime.build(raw()).await.unwrap();
    let failed: Vec<_> = output.failed_pages.iter().map(|f| f.page.to_string()).collect();
    assert_eq!(failed, ["Query"]);
}

#[tokio::test]
async fn test_plugin_failures_become_warnings() {
    let runtime = runtime();
    runtime.register_plugins([UNCONSTRUCTIBLE, BANNER, PET_HATER]);

    let (output, pages) = runtime.build(raw()).await.unwrap();

    assert_eq!(pages.len(), 5);
    assert_eq!(output.warning_count(), 2);
    assert_eq!(output.warnings[0].plugin(), "unconstructible");
    assert_eq!(output.warnings[1].plugin(), "pet-hater");
    assert_eq!(output.warnings[1].page(), Some(&Page::Type("Pet".into())));

    let pet = &pages[2];
    assert!(pet.navigations.is_empty());
    assert_eq!(pet.headers.len(), 1);
    assert_eq!(pages[1].navigations[0].title, "Extra");
}

#[tokio::test]
async fn test_assets_are_collected_once_before_pages() {
    let runtime = runtime();
    runtime.register_plugins([STYLESHEET, BANNER]);

    let sink = AssetWitness::default();
    let output = runtime
        .build_into(raw(), &sink, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(output.assets, [PathBuf::from("/usr/share/graphqldoc/style.css")]);
    assert_eq!(ASSET_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(*sink.seen.lock().unwrap(), [1, 1, 1, 1, 1]);
}

#[tokio::test]
async fn test_cancellation_stops_before_next_page() {
    let runtime = runtime();
    runtime.register_plugin(BANNER);

    let cancel = CancellationToken::new();
    let sink = CancelAfterFirst {
        inner: MemorySink::new(),
        cancel: cancel.clone(),
    };
    let result = runtime.build_into(raw(), &sink, &cancel).await;

    assert!(matches!(result, Err(BuildError::Cancelled { published: 1 })));
    let pages = sink.inner.into_pages();
    assert_eq!(page_names(&pages), ["index"]);
}

#[tokio::test]
async fn test_cancelled_before_start_publishes_nothing() {
    let runtime = runtime();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let sink = MemorySink::new();
    let result = runtime.build_into(raw(), &sink, &cancel).await;

    assert!(result.unwrap_err().is_cancelled());
    assert!(sink.is_empty().await);
}

#[tokio::test]
async fn test_sink_failure_aborts_build() {
    let runtime = runtime();
    let result = runtime
        .build_into(raw(), &ReadOnlyDisk, &CancellationToken::new())
        .await;

    match result {
        Err(BuildError::Publish { page, .. }) => assert_eq!(page, Page::Index),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_fatal() {
    let runtime = runtime();
    runtime.register_plugin(BANNER);

    let result = runtime.build(json!({ "data": { "schema": {} } })).await;
    assert!(matches!(result, Err(BuildError::Schema(_))));

    let result = runtime.build(json!({ "__schema": [] })).await;
    assert!(matches!(result, Err(BuildError::Schema(_))));
}
