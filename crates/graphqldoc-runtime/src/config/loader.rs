//! Layered configuration loading on top of figment.
//!
//! Layers, lowest to highest precedence:
//!
//! | Layer | Source |
//! |-------|--------|
//! | defaults | [`GraphqldocConfig::default`] |
//! | base | [`ConfigLoader::merge`] |
//! | profile file | `graphqldoc.<profile>.toml` (or `.yaml` / `.yml`) |
//! | main file | `graphqldoc.toml` (or `.yaml` / `.yml`) |
//! | environment | `GRAPHQLDOC_*`, `__` separates nested keys |
//! | overrides | [`ConfigLoader::set`] |
//!
//! TOML files need the `toml-config` feature (default), YAML files the
//! `yaml-config` feature.
//!
//! Files are taken from the first search directory that contains any of
//! them. Without explicit search paths the current directory is searched,
//! then `<user config dir>/graphqldoc`.
//!
//! ```text
//! GRAPHQLDOC_LOGGING__LEVEL=debug        → logging.level = "debug"
//! GRAPHQLDOC_BUILD__BASE_URL=/docs/      → build.base_url = "/docs/"
//! GRAPHQLDOC_PLUGINS__BANNER__TEXT=hi    → plugins.banner.text = "hi"
//! ```

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info};

use super::error::{ConfigError, ConfigResult};
use super::schema::GraphqldocConfig;

/// Prefix of every configuration environment variable.
pub const ENV_PREFIX: &str = "GRAPHQLDOC_";

/// Environment variable selecting the configuration profile.
pub const PROFILE_ENV: &str = "GRAPHQLDOC_PROFILE";

/// Main configuration file names, in merge order.
const CONFIG_FILE_NAMES: &[&str] = &[
    #[cfg(feature = "toml-config")]
    "graphqldoc.toml",
    #[cfg(feature = "yaml-config")]
    "graphqldoc.yaml",
    #[cfg(feature = "yaml-config")]
    "graphqldoc.yml",
];

// ─── Profile ──────────────────────────────────────────────────────────────────

/// Name of the profile whose `graphqldoc.<profile>.*` file is layered under
/// the main file.
///
/// Names are lowercased; `dev` and `prod` expand to `development` and
/// `production`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile(String);

impl Profile {
    pub const DEVELOPMENT: &'static str = "development";
    pub const PRODUCTION: &'static str = "production";

    pub fn new(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        Self(match name.as_str() {
            "dev" => Self::DEVELOPMENT.to_string(),
            "prod" => Self::PRODUCTION.to_string(),
            _ => name,
        })
    }

    /// The profile named by [`PROFILE_ENV`], or `development`.
    pub fn from_env() -> Self {
        std::env::var(PROFILE_ENV)
            .map(|name| Self::new(&name))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn file_name(&self, main_file: &str) -> Option<String> {
        let (stem, ext) = main_file.rsplit_once('.')?;
        Some(format!("{stem}.{}.{ext}", self.0))
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self(Self::DEVELOPMENT.to_string())
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── ConfigLoader ─────────────────────────────────────────────────────────────

/// Builder collecting configuration sources.
///
/// ```rust,ignore
/// let config = ConfigLoader::new()
///     .profile("production")
///     .set("build.base_url", "/api/")
///     .load()?;
/// ```
pub struct ConfigLoader {
    profile: Profile,
    search_paths: Vec<PathBuf>,
    /// Explicit file; disables the search.
    file: Option<PathBuf>,
    env: bool,
    base: Figment,
    overrides: Figment,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader for the profile named by [`PROFILE_ENV`], reading the
    /// environment.
    pub fn new() -> Self {
        Self {
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            file: None,
            env: true,
            base: Figment::new(),
            overrides: Figment::new(),
        }
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Profile::new(&profile.into());
        self
    }

    /// Adds a directory to search for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn with_current_dir(self) -> Self {
        match std::env::current_dir() {
            Ok(cwd) => self.search_path(cwd),
            Err(_) => self,
        }
    }

    /// Adds `<user config dir>/graphqldoc`.
    pub fn with_user_config_dir(self) -> Self {
        match user_config_dir() {
            Some(dir) => self.search_path(dir),
            None => self,
        }
    }

    /// Loads exactly `path`, which must exist, instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env(mut self) -> Self {
        self.env = true;
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Layers a whole configuration directly over the defaults. Files and
    /// the environment still override it.
    pub fn merge(mut self, config: GraphqldocConfig) -> Self {
        self.base = self.base.merge(Serialized::defaults(config));
        self
    }

    /// Overrides one dotted key, e.g. `set("build.base_url", "/docs/")`,
    /// above every other source.
    pub fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        self.overrides = self.overrides.merge(Serialized::default(key, value));
        self
    }

    /// Merges every source and extracts the configuration.
    ///
    /// Values are not validated here; see
    /// [`validate_config`](super::validate_config).
    pub fn load(self) -> ConfigResult<GraphqldocConfig> {
        let profile = self.profile.clone();
        let config: GraphqldocConfig = self.into_figment()?.extract()?;

        debug!(
            profile = %profile,
            logging_level = %config.logging.level,
            plugins = config.plugins.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    fn into_figment(self) -> ConfigResult<Figment> {
        let files = match &self.file {
            Some(path) if !path.is_file() => return Err(ConfigError::FileNotFound(path.clone())),
            Some(path) => vec![path.clone()],
            None => self.discover(),
        };

        let mut figment =
            Figment::from(Serialized::defaults(GraphqldocConfig::default())).merge(self.base);
        for path in &files {
            info!(path = %path.display(), "Loading configuration file");
            figment = merge_file(figment, path)?;
        }
        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["PROFILE"]).split("__"));
        }
        Ok(figment.merge(self.overrides))
    }

    /// File names to look for, in merge order: every profile file, then
    /// every main file.
    fn candidate_names(&self) -> Vec<String> {
        let profile_files = CONFIG_FILE_NAMES
            .iter()
            .filter_map(|main| self.profile.file_name(main));
        let main_files = CONFIG_FILE_NAMES.iter().map(|main| main.to_string());
        profile_files.chain(main_files).collect()
    }

    /// Configuration files of the first search directory that has any, in
    /// merge order.
    fn discover(&self) -> Vec<PathBuf> {
        let dirs = if self.search_paths.is_empty() {
            default_search_paths()
        } else {
            self.search_paths.clone()
        };

        let names = self.candidate_names();
        for dir in &dirs {
            let found: Vec<PathBuf> = names
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }
        }

        debug!(searched = ?dirs, "No configuration file found");
        Vec::new()
    }
}

fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("graphqldoc"))
}

fn default_search_paths() -> Vec<PathBuf> {
    std::env::current_dir()
        .ok()
        .into_iter()
        .chain(user_config_dir())
        .collect()
}

/// Merges one file, picking the format from its extension.
#[cfg_attr(
    not(any(feature = "toml-config", feature = "yaml-config")),
    allow(unused_variables)
)]
fn merge_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    match path.extension().and_then(OsStr::to_str) {
        #[cfg(feature = "toml-config")]
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        Some("yaml" | "yml") => Ok(figment.merge(Yaml::file(path))),
        _ => Err(ConfigError::ParseError(format!(
            "unsupported or disabled configuration format: {}",
            path.display()
        ))),
    }
}

/// Loads configuration from the default search paths and the environment.
pub fn load_config() -> ConfigResult<GraphqldocConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from `path` plus the environment.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<GraphqldocConfig> {
    ConfigLoader::new().file(path).load()
}
