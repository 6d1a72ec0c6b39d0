//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use graphqldoc_core::MAX_TYPE_REF_DEPTH;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root configuration structure.
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [build]
/// base_url = "/api-docs/"
///
/// [plugins."navigation.objects"]
/// title = "Types"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphqldocConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Build pass settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Per-plugin configuration sections, keyed by plugin name.
    #[serde(default)]
    pub plugins: HashMap<String, Value>,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    #[cfg(feature = "json-log")]
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    /// Requires `logging.file_path`.
    File,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanEventConfig {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level; `RUST_LOG` takes precedence when set.
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Log file, for `output = "file"`.
    pub file_path: Option<PathBuf>,
    pub span_events: SpanEventConfig,
    /// Per-module levels, e.g. `graphqldoc_framework = "debug"`.
    pub filters: HashMap<String, LogLevel>,
    pub thread_ids: bool,
    /// Include file name and line number.
    pub file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            span_events: SpanEventConfig::default(),
            filters: HashMap::new(),
            thread_ids: false,
            file_location: false,
        }
    }
}

// =============================================================================
// Build
// =============================================================================

/// Build pass settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Prefix of every page URL produced by the default URL resolver.
    pub base_url: String,

    /// Maximum `ofType` links followed before a reference is reported as
    /// cyclic. Valid range `1..=32`.
    pub max_type_depth: usize,

    /// Issue the capability calls of one page concurrently.
    pub concurrent_plugins: bool,

    /// Pages built at the same time. Pages are still published in order.
    pub page_concurrency: usize,

    /// Generate pages for `__`-prefixed introspection types.
    pub include_introspection_types: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_type_depth: MAX_TYPE_REF_DEPTH,
            concurrent_plugins: true,
            page_concurrency: default_page_concurrency(),
            include_introspection_types: false,
        }
    }
}

fn default_page_concurrency() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = GraphqldocConfig::default();
        assert_eq!(config.build.max_type_depth, 32);
        assert!(config.build.concurrent_plugins);
        assert_eq!(config.build.base_url, "");
        assert!(!config.build.include_introspection_types);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let config: GraphqldocConfig = serde_json::from_value(json!({
            "logging": { "level": "debug", "filters": { "graphqldoc_framework": "trace" } },
            "build": { "base_url": "/docs/" },
            "plugins": { "navigation.objects": { "title": "Types" } }
        }))
        .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.filters["graphqldoc_framework"], LogLevel::Trace);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.build.base_url, "/docs/");
        assert_eq!(config.build.max_type_depth, 32);
        assert_eq!(config.plugins["navigation.objects"]["title"], "Types");
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let parsed: Result<GraphqldocConfig, _> =
            serde_json::from_value(json!({ "logging": { "level": "verbose" } }));
        assert!(parsed.is_err());
    }
}
