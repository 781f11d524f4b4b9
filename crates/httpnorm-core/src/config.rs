//! Configuration types for httpnorm.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults,
//! a TOML file, and `HTTPNORM_`-prefixed environment variables
//! (`HTTPNORM_FILTER__DROP_ALLOWED=false`,
//! `HTTPNORM_FILTER__ALLOW_LIST=example.com,internal`).
//! [`Config::defaults`] returns the embedded defaults only (useful in tests).

use crate::allow_list::AllowList;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[filter]
allow_list   = []
drop_allowed = true

[feed]
channel_capacity = 1024
"#;

const ENV_PREFIX: &str = "HTTPNORM";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// `[filter]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Host substrings whose entries are allow-listed.
    #[serde(default)]
    pub allow_list: AllowList,
    /// Drop allow-listed entries instead of passing them to the writer.
    #[serde(default = "default_drop_allowed")]
    pub drop_allowed: bool,
}

fn default_drop_allowed() -> bool { true }

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allow_list: AllowList::default(),
            drop_allowed: default_drop_allowed(),
        }
    }
}

/// `[feed]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Bound of the channel between a log reader and the pipeline.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize { 1024 }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `config.toml` under the
    /// user config directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("filter.allow_list")
            .try_parsing(true);

        match path {
            Some(path) if !path.exists() => Err(ConfigError::Missing(path.to_path_buf())),
            Some(path) => Self::build(Some(path), env),
            None => {
                let default_path = config_path();
                let file = default_path.exists().then_some(default_path.as_path());
                Self::build(file, env)
            }
        }
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn build(file: Option<&Path>, env: config::Environment) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file).format(config::FileFormat::Toml));
        }
        Ok(builder.add_source(env).build()?.try_deserialize()?)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("httpnorm")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
