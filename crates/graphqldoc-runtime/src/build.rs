//! One build pass: assets, then every documented page, published in order.
//!
//! ```text
//! normalize ─▶ instantiate ─▶ get_assets (once) ─▶ page 1 ─▶ page 2 ─▶ … ─▶ BuildOutput
//!                                                     │         │
//!                                                     ▼         ▼
//!                                                  PageSink  PageSink
//! ```
//!
//! Up to `build.page_concurrency` pages are in flight at a time, but the sink
//! always receives them in page order, and only once every plugin call of the
//! page has resolved or failed.

use std::path::PathBuf;
use std::pin::pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, stream};
use graphqldoc_core::{CoreError, CoreResult, Page, Schema, SchemaType, TypeRefResolver};
use graphqldoc_framework::{BuildContext, BuildWarning, MergedPage, Orchestrator};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{BuildError, BuildResult};

// ─── Page sinks ───────────────────────────────────────────────────────────────

/// Receives fully merged pages, one at a time and in page order.
///
/// A sink that returns `Err` aborts the build with
/// [`BuildError::Publish`].
#[async_trait]
pub trait PageSink: Send + Sync {
    async fn publish(&self, page: MergedPage) -> anyhow::Result<()>;
}

/// Keeps published pages in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: Mutex<Vec<MergedPage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages published so far.
    pub async fn len(&self) -> usize {
        self.pages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.lock().await.is_empty()
    }

    /// The published pages, in publication order.
    pub fn into_pages(self) -> Vec<MergedPage> {
        self.pages.into_inner()
    }
}

#[async_trait]
impl PageSink for MemorySink {
    async fn publish(&self, page: MergedPage) -> anyhow::Result<()> {
        self.pages.lock().await.push(page);
        Ok(())
    }
}

// ─── Build report ─────────────────────────────────────────────────────────────

/// A page that could not be built because one of its type references did
/// not resolve.
#[derive(Debug, Error)]
#[error("page '{page}' failed: {error}")]
pub struct PageFailure {
    pub page: Page,
    #[source]
    pub error: CoreError,
}

/// What a finished build produced.
#[derive(Debug, Default)]
pub struct BuildOutput {
    /// Asset paths from every plugin, in registration order.
    pub assets: Vec<PathBuf>,
    /// Published pages, in publication order.
    pub pages: Vec<Page>,
    /// Pages skipped because of an unresolvable type reference.
    pub failed_pages: Vec<PageFailure>,
    /// Recoverable plugin failures.
    pub warnings: Vec<BuildWarning>,
}

impl BuildOutput {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// `true` when every page was built and no plugin failed.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.failed_pages.is_empty()
    }
}

// ─── Page planning ────────────────────────────────────────────────────────────

/// The pages of a schema in build order: the index, then one page per type
/// in schema order.
pub fn documented_pages(schema: &Schema, include_introspection: bool) -> Vec<Page> {
    std::iter::once(Page::Index)
        .chain(
            schema
                .types
                .iter()
                .filter(|ty| include_introspection || !ty.is_introspection())
                .map(|ty| Page::Type(ty.base.name.clone())),
        )
        .collect()
}

/// Resolves every type reference reachable from `ty`.
pub fn check_type_refs(resolver: &TypeRefResolver, ty: &SchemaType) -> CoreResult<()> {
    for type_ref in ty.type_refs() {
        resolver.resolve(type_ref)?;
    }
    Ok(())
}

enum PageOutcome {
    Built(MergedPage, Vec<BuildWarning>),
    Failed(PageFailure),
}

async fn build_one(orchestrator: &Orchestrator, build: &BuildContext, page: Page) -> PageOutcome {
    if let Page::Type(name) = &page
        && let Some(ty) = build.document().find_type(name)
        && let Err(error) = check_type_refs(build.resolver(), ty)
    {
        return PageOutcome::Failed(PageFailure { page, error });
    }
    let (merged, warnings) = orchestrator.build_page(&page).await;
    PageOutcome::Built(merged, warnings)
}

// ─── BuildPass ────────────────────────────────────────────────────────────────

/// Everything one build needs once plugins are instantiated.
pub(crate) struct BuildPass {
    pub(crate) build: Arc<BuildContext>,
    pub(crate) orchestrator: Orchestrator,
    /// Warnings raised before the pass started (failed constructors).
    pub(crate) warnings: Vec<BuildWarning>,
    pub(crate) page_concurrency: usize,
    pub(crate) include_introspection_types: bool,
}

impl BuildPass {
    pub(crate) async fn run(
        self,
        sink: &dyn PageSink,
        cancel: &CancellationToken,
    ) -> BuildResult<BuildOutput> {
        let mut output = BuildOutput {
            warnings: self.warnings,
            ..Default::default()
        };

        let (assets, warnings) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(BuildError::Cancelled { published: 0 }),
            collected = self.orchestrator.collect_assets() => collected,
        };
        output.assets = assets;
        output.warnings.extend(warnings);

        let pages = documented_pages(self.build.document(), self.include_introspection_types);
        info!(
            pages = pages.len(),
            plugins = self.orchestrator.len(),
            assets = output.assets.len(),
            "Building pages"
        );

        let orchestrator = &self.orchestrator;
        let build = self.build.as_ref();
        let mut outcomes = pin!(
            stream::iter(pages)
                .map(|page| build_one(orchestrator, build, page))
                .buffered(self.page_concurrency.max(1))
        );

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!(published = output.pages.len(), "Build cancelled");
                    return Err(BuildError::Cancelled { published: output.pages.len() });
                }
                next = outcomes.next() => next,
            };
            let Some(outcome) = next else {
                break;
            };

            match outcome {
                PageOutcome::Built(merged, warnings) => {
                    output.warnings.extend(warnings);
                    let page = merged.page.clone();
                    sink.publish(merged)
                        .await
                        .map_err(|error| BuildError::Publish {
                            page: page.clone(),
                            error,
                        })?;
                    debug!(page = %page, "Page published");
                    output.pages.push(page);
                }
                PageOutcome::Failed(failure) => {
                    warn!(
                        page = %failure.page,
                        error = %failure.error,
                        "Page skipped, continuing with the remaining pages"
                    );
                    output.failed_pages.push(failure);
                }
            }
        }

        info!(
            published = output.pages.len(),
            failed = output.failed_pages.len(),
            warnings = output.warning_count(),
            "Build finished"
        );
        Ok(output)
    }
}
