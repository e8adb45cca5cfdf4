//! Configuration management for Botstrap

pub mod schema;

pub use schema::{Config, EnvMode};

use crate::error::{BotstrapError, BotstrapResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("botstrap")
            .join("config.toml")
    }

    /// Get the default cache directory path
    pub fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("botstrap")
    }

    /// Load configuration, using defaults if no file exists
    pub async fn load(&self) -> BotstrapResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> BotstrapResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| BotstrapError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| BotstrapError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> BotstrapResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BotstrapError::io("creating config directory", e))?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            BotstrapError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the launch pipeline needs, resolved once at startup
/// and passed by reference to every component.
#[derive(Debug, Clone)]
pub struct LauncherContext {
    /// Base URL of the update server
    pub server_url: String,

    /// Cache directory holding the artifact and its metadata record
    pub cache_dir: PathBuf,

    /// Full launcher configuration
    pub config: Config,
}

impl LauncherContext {
    /// Resolve the launcher context from configuration and an optional
    /// server URL override (CLI flag or BOTSTRAP_SERVER_URL).
    pub fn resolve(config: Config, server_override: Option<String>) -> BotstrapResult<Self> {
        let server_url = server_override
            .unwrap_or_else(|| config.server.url.clone())
            .trim_end_matches('/')
            .to_string();

        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(BotstrapError::ServerUrlInvalid(server_url));
        }

        let cache_dir = config
            .cache
            .dir
            .clone()
            .unwrap_or_else(ConfigManager::default_cache_dir);

        Ok(Self {
            server_url,
            cache_dir,
            config,
        })
    }
}
