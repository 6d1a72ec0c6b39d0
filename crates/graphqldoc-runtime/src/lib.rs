//! graphqldoc Runtime - build driver for the graphqldoc documentation
//! generator.
//!
//! This crate provides:
//! - The build pass: assets once, then every page merged and published in
//!   order (`DocRuntime`, `PageSink`)
//! - Cooperative cancellation through `CancellationToken`
//! - Configuration loading (`graphqldoc.toml`, profiles, `GRAPHQLDOC_*`
//!   environment variables)
//! - Logging configuration
//!
//! ```ignore
//! use graphqldoc_runtime::DocRuntime;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = DocRuntime::new();
//!     runtime.load_builtin_plugins();
//!
//!     let introspection = serde_json::from_str(&std::fs::read_to_string("schema.json")?)?;
//!     let (output, pages) = runtime.build(introspection).await?;
//!
//!     for warning in &output.warnings {
//!         eprintln!("warning: {warning}");
//!     }
//!     println!("{} pages", pages.len());
//!     Ok(())
//! }
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use build::{BuildOutput, MemorySink, PageFailure, PageSink, check_type_refs, documented_pages};
pub use config::{BuildConfig, ConfigError, ConfigLoader, ConfigResult, GraphqldocConfig};
pub use error::{BuildError, BuildResult};
pub use logging::{LoggingBuilder, SpanEvents};
pub use runtime::{DocRuntime, RuntimeBuilder};

pub use tokio_util::sync::CancellationToken;

// Re-export tracing for use by plugin crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// This provides all the commonly used logging macros:
/// - `trace!`, `debug!`, `info!`, `warn!`, `error!`
/// - `span`, `event`
/// - `instrument` attribute
/// - `Level` for span creation
pub mod prelude {
    pub use tracing::{Level, debug, error, event, info, instrument, span, trace, warn};
}
