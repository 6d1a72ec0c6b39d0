//! Configuration validation utilities.

use graphqldoc_core::MAX_TYPE_REF_DEPTH;
use serde_json::Value;

use super::error::{ConfigError, ConfigResult};
use super::schema::{BuildConfig, GraphqldocConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &GraphqldocConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_build_config(&config.build)?;
    for (name, section) in &config.plugins {
        validate_plugin_section(name, section)?;
    }
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.output is \"file\" but logging.file_path is not set",
        ));
    }

    if logging.filters.keys().any(|module| module.trim().is_empty()) {
        return Err(ConfigError::validation(
            "logging.filters contains an empty module name",
        ));
    }

    Ok(())
}

fn validate_build_config(build: &BuildConfig) -> ConfigResult<()> {
    if !(1..=MAX_TYPE_REF_DEPTH).contains(&build.max_type_depth) {
        return Err(ConfigError::validation(format!(
            "build.max_type_depth must be between 1 and {MAX_TYPE_REF_DEPTH}, got {}",
            build.max_type_depth
        )));
    }

    if build.page_concurrency == 0 {
        return Err(ConfigError::validation(
            "build.page_concurrency must be greater than 0",
        ));
    }

    Ok(())
}

fn validate_plugin_section(name: &str, section: &Value) -> ConfigResult<()> {
    let found = match section {
        Value::Object(_) | Value::Null => return Ok(()),
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
    };
    Err(ConfigError::InvalidPluginSection {
        plugin: name.to_string(),
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&GraphqldocConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_type_depth_bounds() {
        let mut config = GraphqldocConfig::default();
        config.build.max_type_depth = 0;
        assert!(validate_config(&config).is_err());

        config.build.max_type_depth = 33;
        assert!(validate_config(&config).is_err());

        config.build.max_type_depth = 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_file_output_needs_path() {
        let mut config = GraphqldocConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));

        config.logging.file_path = Some("graphqldoc.log".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_plugin_sections() {
        let mut config = GraphqldocConfig::default();
        config.plugins.insert("banner".into(), json!({ "text": "hi" }));
        config.plugins.insert("empty".into(), Value::Null);
        assert!(validate_config(&config).is_ok());

        config.plugins.insert("broken".into(), json!(["a"]));
        match validate_config(&config) {
            Err(ConfigError::InvalidPluginSection { plugin, found }) => {
                assert_eq!(plugin, "broken");
                assert_eq!(found, "an array");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
