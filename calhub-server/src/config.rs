//! Server configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:4096";
const DEFAULT_LOG_LEVEL: &str = "info";
const ENV_PREFIX: &str = "CALHUB";

fn default_snapshot_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("calhub")
        .join("snapshot.json")
}

/// Server configuration, layered as: defaults, then the config file
/// (~/.config/calhub/config.toml unless given explicitly), then `CALHUB_*`
/// environment variables, then command-line overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g. "127.0.0.1:4096")
    pub bind_address: String,

    /// Snapshot file holding every user, calendar and event. `~` is expanded.
    pub snapshot_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to answer cross-origin requests
    pub enable_cors: bool,
}

/// Values from the command line that win over every other source.
#[derive(Debug, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub snapshot_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ServerConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("calhub");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the layered configuration.
    ///
    /// An explicitly given `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        let config: ServerConfig = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default(
                "snapshot_path",
                default_snapshot_path().to_string_lossy().into_owned(),
            )?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("enable_cors", true)?
            .add_source(File::from(config_path.clone()).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("bind_address", overrides.bind_address)?
            .set_override_option(
                "snapshot_path",
                overrides
                    .snapshot_path
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("log_level", overrides.log_level)?
            .build()
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// The snapshot path with `~` expanded.
    pub fn snapshot_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.snapshot_path.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}
