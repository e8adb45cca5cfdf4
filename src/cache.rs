//! Cache metadata persistence
//!
//! A single JSON record describes the last known-good artifact. Reads and
//! writes are deliberately fail-open: a launch must never abort because
//! the metadata file is missing, unreadable, or garbled. A read failure is
//! indistinguishable from "no cache present"; a write failure is logged as
//! a warning and otherwise ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// File name of the cached artifact inside the cache directory
pub const ARTIFACT_FILE: &str = "bot.js";

/// File name of the metadata record inside the cache directory
pub const RECORD_FILE: &str = "cache.json";

/// Metadata describing the last verified artifact download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Opaque server-assigned version string
    pub version: String,

    /// Lowercase hex SHA-256 of the artifact bytes
    pub hash: String,

    /// When the artifact was downloaded
    pub downloaded_at: DateTime<Utc>,

    /// Artifact size in bytes
    pub file_size: u64,
}

/// Reads and replaces the metadata record for one cache directory
pub struct CacheStore {
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at the given cache directory
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Path of the metadata record file
    pub fn record_path(&self) -> PathBuf {
        self.cache_dir.join(RECORD_FILE)
    }

    /// Path of the artifact file
    pub fn artifact_path(&self) -> PathBuf {
        self.cache_dir.join(ARTIFACT_FILE)
    }

    /// The cache directory this store is rooted at
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Read the metadata record.
    ///
    /// Any I/O or parse failure is treated as "no cache": the caller sees
    /// `None` and proceeds as if nothing had been downloaded yet.
    pub async fn read(&self) -> Option<CacheRecord> {
        let path = self.record_path();

        let content = match fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) => {
                debug!("No readable cache record at {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Ignoring unparseable cache record: {}", e);
                None
            }
        }
    }

    /// Persist a new metadata record, replacing any previous one.
    ///
    /// Failures are logged and swallowed; stale or missing metadata only
    /// costs an unnecessary re-download on the next launch.
    pub async fn write(&self, record: &CacheRecord) {
        if let Err(e) = self.try_write(record).await {
            warn!("Failed to persist cache record: {}", e);
        }
    }

    async fn try_write(&self, record: &CacheRecord) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.record_path(), content).await?;
        debug!(
            "Cache record written: version {} ({} bytes)",
            record.version, record.file_size
        );
        Ok(())
    }

    /// Remove the metadata record if present (operator reset)
    pub async fn remove_record(&self) {
        let path = self.record_path();
        if path.exists() {
            if let Err(e) = fs::remove_file(&path).await {
                warn!("Failed to remove cache record: {}", e);
            }
        }
    }
}
