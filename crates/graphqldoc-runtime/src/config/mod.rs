//! Configuration module for the graphqldoc runtime.
//!
//! This module provides figment-based configuration loading and validation
//! for logging, the build pass, and per-plugin sections.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    BuildConfig, GraphqldocConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, SpanEventConfig,
};
pub use validation::validate_config;
