//! Configuration schema for Botstrap
//!
//! Configuration is stored at `~/.config/botstrap/config.toml`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Update server settings
    pub server: ServerConfig,

    /// Cache directory and file names
    pub cache: CacheConfig,

    /// Artifact runtime settings
    pub runtime: RuntimeConfig,
}

/// Update server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the update server
    pub url: String,

    /// Update-check request timeout in seconds
    pub check_timeout_secs: u64,

    /// Artifact download timeout in seconds
    pub download_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3000".to_string(),
            check_timeout_secs: 5,
            download_timeout_secs: 30,
        }
    }
}

/// Cache layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory override (defaults to the platform cache dir)
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { dir: None }
    }
}

/// Environment passed to the artifact process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvMode {
    /// Scrubbed environment: PATH, HOME, LANG, TZ, plus explicit
    /// [runtime.env] pairs
    Isolated,
    /// Child sees the launcher's full environment
    Inherit,
}

/// Artifact runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Interpreter binary used to run the artifact
    pub interpreter: String,

    /// Arguments passed to the interpreter; the artifact source is fed
    /// over stdin, so the default tells the interpreter to read from it
    pub interpreter_args: Vec<String>,

    /// Environment mode for the artifact process
    pub env_mode: EnvMode,

    /// Extra environment variables passed to the artifact
    pub env: HashMap<String, String>,

    /// Heap ceiling the runtime is configured with, in MB.
    /// Used for the startup heap diagnostic only.
    pub heap_limit_mb: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            interpreter: "node".to_string(),
            interpreter_args: vec!["-".to_string()],
            env_mode: EnvMode::Isolated,
            env: HashMap::new(),
            heap_limit_mb: 2048,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://127.0.0.1:3000");
        assert_eq!(config.server.check_timeout_secs, 5);
        assert_eq!(config.server.download_timeout_secs, 30);
        assert_eq!(config.runtime.interpreter, "node");
        assert_eq!(config.runtime.env_mode, EnvMode::Isolated);
        assert!(config.cache.dir.is_none());
    }

    #[test]
    fn unknown_sections_are_ignored() {
        // Older config files may carry sections this version no longer
        // reads; they must not break loading
        let config: Config = toml::from_str(
            r#"
            [general]
            verbose = true
            log_format = "json"

            [server]
            url = "https://updates.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.url, "https://updates.example.com");
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            url = "https://updates.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.url, "https://updates.example.com");
        assert_eq!(config.server.check_timeout_secs, 5);
        assert_eq!(config.runtime.interpreter, "node");
    }

    #[test]
    fn env_mode_roundtrip() {
        let config: Config = toml::from_str(
            r#"
            [runtime]
            env_mode = "inherit"
            "#,
        )
        .unwrap();
        assert_eq!(config.runtime.env_mode, EnvMode::Inherit);

        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("env_mode = \"inherit\""));
    }
}
