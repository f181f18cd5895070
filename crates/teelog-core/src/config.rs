//! Configuration types for teelog.
//!
//! [`Config::load`] layers, lowest first: the embedded defaults, an optional
//! TOML file (`--config`, else `$XDG_CONFIG_HOME/teelog/config.toml`), and
//! `TEELOG_`-prefixed environment variables such as
//! `TEELOG_FEEDBACK__CLUSTER_NAME`. [`Config::defaults`] returns the embedded
//! defaults without touching the filesystem (useful in tests).

use crate::error::ConfigError;
use crate::path::{FeedbackContext, SEPARATOR};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[feedback]
host         = "localhost"
cluster_name = "default"
instance_uid = "keeper"
store_dir    = "feedback"

[logging]
filter = "info"
ansi   = true
"#;

const ENV_PREFIX: &str = "TEELOG";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub feedback: FeedbackConfig,
    pub logging: LoggingConfig,
}

/// `[feedback]` section: identity of this instance and where the directory
/// feedback store lives.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    pub host: String,
    pub cluster_name: String,
    pub instance_uid: String,
    pub store_dir: PathBuf,
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub ansi: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration from `path` (or the default location) and the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(path, None)
    }

    /// Like [`Config::load`], reading environment variables from `env`
    /// instead of the process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Map<String, String>,
    ) -> Result<Self, ConfigError> {
        Self::build(path, Some(env))
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

    /// Validated feedback identity for this instance.
    pub fn feedback_context(&self) -> Result<FeedbackContext, ConfigError> {
        let fb = &self.feedback;
        validate_segment("host", &fb.host)?;
        validate_segment("cluster_name", &fb.cluster_name)?;
        validate_segment("instance_uid", &fb.instance_uid)?;
        Ok(FeedbackContext::new(
            fb.host.clone(),
            fb.cluster_name.clone(),
            fb.instance_uid.clone(),
        ))
    }

    fn build(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        // An explicit path must exist; the default location is optional.
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

fn validate_segment(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.contains(SEPARATOR) || value == "." || value == ".." {
        return Err(ConfigError::InvalidSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
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
        .join("teelog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
