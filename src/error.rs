//! Error types for Botstrap
//!
//! All modules use `BotstrapResult<T>` as their return type.
//!
//! Only a few variants are allowed to reach the top level and terminate
//! the process: `IntegrityMismatch`, `Execution`, and `NoUsableArtifact`.
//! Update-check and cache metadata failures are absorbed where they occur
//! with a documented fallback (use stale/absent cache, proceed).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Botstrap operations
pub type BotstrapResult<T> = Result<T, BotstrapError>;

/// All errors that can occur in Botstrap
#[derive(Error, Debug)]
pub enum BotstrapError {
    // Update/download errors
    #[error("Artifact download failed: {0}")]
    Download(String),

    #[error("Integrity check failed: expected hash {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("No usable artifact: nothing cached and nothing downloaded")]
    NoUsableArtifact,

    // Execution errors
    #[error("Artifact execution failed: {0}")]
    Execution(String),

    #[error("Interpreter not found: {0}")]
    InterpreterNotFound(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Invalid server URL: {0}")]
    ServerUrlInvalid(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotstrapError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NoUsableArtifact => {
                Some("Check server_url in config.toml or set BOTSTRAP_SERVER_URL")
            }
            Self::IntegrityMismatch { .. } => {
                Some("The server sent a corrupted or tampered artifact; retry the launch")
            }
            Self::InterpreterNotFound(_) => {
                Some("Set runtime.interpreter in config.toml to an installed runtime")
            }
            _ => None,
        }
    }
}
