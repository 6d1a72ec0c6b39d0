//! Logging setup for graphqldoc.
//!
//! A thin layer over `tracing-subscriber`: an [`EnvFilter`] built from the
//! configured level, per-module directives and `RUST_LOG`, plus one boxed fmt
//! layer writing to stdout, stderr or a file through `tracing-appender`.
//!
//! The build pass opens a `page` span per generated page and an `assets`
//! span for the asset call; enable span events to see them open and close.
//!
//! ```rust,ignore
//! use graphqldoc_runtime::logging::{LoggingBuilder, SpanEvents};
//!
//! LoggingBuilder::new()
//!     .directive("graphqldoc_framework=debug")
//!     .span_events(SpanEvents::LIFECYCLE)
//!     .init();
//! ```

use std::path::{Path, PathBuf};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig, SpanEventConfig};

const DEFAULT_LOG_FILE: &str = "graphqldoc.log";

/// Which span lifecycle events are written as log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanEvents {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    /// Includes the span's busy/idle time.
    pub close: bool,
}

impl SpanEvents {
    pub const NONE: Self = Self {
        new: false,
        enter: false,
        exit: false,
        close: false,
    };

    /// One line when a page starts and one with its timing when it is merged.
    pub const LIFECYCLE: Self = Self {
        new: true,
        enter: false,
        exit: false,
        close: true,
    };

    pub const FULL: Self = Self {
        new: true,
        enter: true,
        exit: true,
        close: true,
    };
}

impl From<SpanEvents> for FmtSpan {
    fn from(events: SpanEvents) -> Self {
        [
            (events.new, FmtSpan::NEW),
            (events.enter, FmtSpan::ENTER),
            (events.exit, FmtSpan::EXIT),
            (events.close, FmtSpan::CLOSE),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(FmtSpan::NONE, |acc, (_, flag)| acc | flag)
    }
}

impl From<&SpanEventConfig> for SpanEvents {
    fn from(config: &SpanEventConfig) -> Self {
        Self {
            new: config.new,
            enter: config.enter,
            exit: config.exit,
            close: config.close,
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Does nothing if a global subscriber is already installed, so tests and
/// embedding hosts may call it repeatedly.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// Builder for the global log subscriber.
#[derive(Debug)]
pub struct LoggingBuilder {
    level: tracing::Level,
    directives: Vec<String>,
    span_events: SpanEvents,
    format: LogFormat,
    output: LogOutput,
    file_path: Option<PathBuf>,
    target: bool,
    thread_ids: bool,
    file_location: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// `info` level, compact lines on stdout.
    pub fn new() -> Self {
        Self {
            level: tracing::Level::INFO,
            directives: Vec::new(),
            span_events: SpanEvents::NONE,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            target: true,
            thread_ids: false,
            file_location: false,
        }
    }

    /// Mirrors a [`LoggingConfig`]. Module filters become directives, sorted
    /// by module name.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut filters: Vec<_> = config.filters.iter().collect();
        filters.sort_by_key(|(module, _)| module.as_str());

        Self {
            level: config.level.to_tracing_level(),
            directives: filters
                .into_iter()
                .map(|(module, level)| format!("{module}={}", level.as_str()))
                .collect(),
            span_events: SpanEvents::from(&config.span_events),
            format: config.format,
            output: config.output,
            file_path: config.file_path.clone(),
            target: true,
            thread_ids: config.thread_ids,
            file_location: config.file_location,
        }
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Adds a filter directive, e.g. `"graphqldoc_runtime=debug"`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn span_events(mut self, events: SpanEvents) -> Self {
        self.span_events = events;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Log file for [`LogOutput::File`].
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Prints the module path of each event.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.target = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.thread_ids = enabled;
        self
    }

    /// Prints the source file and line of each event.
    pub fn with_file_location(mut self, enabled: bool) -> Self {
        self.file_location = enabled;
        self
    }

    /// The filter directives in the order they are applied.
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// `RUST_LOG` if set, otherwise the configured level, then every
    /// directive on top.
    fn filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()));

        self.directives
            .iter()
            .fold(base, |filter, directive| match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(e) => {
                    eprintln!("Ignoring invalid log directive '{directive}': {e}");
                    filter
                }
            })
    }

    fn writer(&self) -> BoxMakeWriter {
        match (self.output, &self.file_path) {
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
            (LogOutput::File, Some(path)) => {
                let dir = path
                    .parent()
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                let file = path
                    .file_name()
                    .map_or_else(|| DEFAULT_LOG_FILE.into(), |name| name.to_owned());
                BoxMakeWriter::new(tracing_appender::rolling::never(dir, file))
            }
            (LogOutput::File, None) => {
                eprintln!("Log output is \"file\" but no file path is set, logging to stdout");
                BoxMakeWriter::new(std::io::stdout)
            }
        }
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = FmtSpan::from(self.span_events);
        let base = fmt::layer()
            .with_writer(self.writer())
            .with_span_events(span_events)
            .with_target(self.target)
            .with_thread_ids(self.thread_ids)
            .with_file(self.file_location)
            .with_line_number(self.file_location);

        match self.format {
            LogFormat::Compact => base.compact().boxed(),
            LogFormat::Full => base.boxed(),
            LogFormat::Pretty => base.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => base.json().boxed(),
        }
    }

    /// Installs the subscriber, ignoring an already installed one.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Installs the subscriber, failing if one is already installed.
    pub fn try_init(self) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(self.layer())
            .with(self.filter())
            .try_init()
    }
}
