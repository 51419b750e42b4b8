//! Config resolution: CLI flag → `COMMUTE_CONFIG` → XDG config dir → defaults.
//!
//! An explicitly named file (flag or env var) must exist. The XDG file is
//! optional; when it is absent the built-in defaults are used.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::validate::{validate_config, ValidationError};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "COMMUTE_CONFIG";

/// Directory under the XDG config dir.
pub const CONFIG_DIR_NAME: &str = "commute_estimator";

/// File name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors from loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ConfigError> for ce_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Parse { path, source } => ce_common::Error::InvalidConfig {
                path: path.display().to_string(),
                reason: source.to_string(),
            },
            ConfigError::Io { source, .. } => ce_common::Error::Io(source),
            other => ce_common::Error::Config(other.to_string()),
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum ConfigOrigin {
    Cli(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Defaults,
}

impl ConfigOrigin {
    pub fn using_defaults(&self) -> bool {
        matches!(self, ConfigOrigin::Defaults)
    }
}

/// Candidate config locations, in priority order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub cli: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub xdg: Option<PathBuf>,
}

impl ConfigPaths {
    /// Collect candidates from the flag, the environment and the XDG dir.
    pub fn discover(cli: Option<PathBuf>) -> Self {
        let env = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let xdg = dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
        Self { cli, env, xdg }
    }
}

/// A validated configuration plus its origin.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    pub origin: ConfigOrigin,
}

/// Resolve, load, and validate the effective configuration.
pub fn resolve_config(paths: &ConfigPaths) -> Result<ResolvedConfig, ConfigError> {
    let (config, origin) = if let Some(path) = &paths.cli {
        (load_required(path)?, ConfigOrigin::Cli(path.clone()))
    } else if let Some(path) = &paths.env {
        (load_required(path)?, ConfigOrigin::Env(path.clone()))
    } else if let Some(path) = paths.xdg.as_ref().filter(|p| p.is_file()) {
        (load_file(path)?, ConfigOrigin::Xdg(path.clone()))
    } else {
        (Config::default(), ConfigOrigin::Defaults)
    };

    validate_config(&config).map_err(ConfigError::Invalid)?;
    Ok(ResolvedConfig { config, origin })
}

fn load_required(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    load_file(path)
}

/// Read and parse one config file without validating it.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
