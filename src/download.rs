//! Artifact download and verification
//!
//! Fetches the full artifact from the server, checks its content hash
//! against the hash the server declared, and only then installs it as the
//! current artifact and records fresh cache metadata. A hash mismatch is
//! fatal to the download step and leaves the previous artifact and its
//! record untouched.

use crate::cache::{CacheRecord, CacheStore};
use crate::config::LauncherContext;
use crate::error::{BotstrapError, BotstrapResult};
use crate::integrity;
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

/// Version header sent alongside the artifact body
const VERSION_HEADER: &str = "x-bot-version";

/// Declared content hash header; absent means "trust the body as-is"
const HASH_HEADER: &str = "x-file-hash";

/// Fetches and installs artifacts
pub struct Downloader<'a> {
    client: reqwest::Client,
    server_url: String,
    timeout: Duration,
    store: &'a CacheStore,
}

impl<'a> Downloader<'a> {
    /// Create a downloader bound to the launcher context and cache store
    pub fn new(ctx: &LauncherContext, store: &'a CacheStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            server_url: ctx.server_url.clone(),
            timeout: Duration::from_secs(ctx.config.server.download_timeout_secs),
            store,
        }
    }

    /// Download the current artifact, verify it, and make it the cached copy.
    ///
    /// Returns the installed artifact path. On any failure the previously
    /// cached artifact and metadata record are left exactly as they were.
    pub async fn download(&self) -> BotstrapResult<PathBuf> {
        let url = format!("{}/api/bot/download", self.server_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BotstrapError::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotstrapError::Download(format!(
                "server returned HTTP {}",
                response.status()
            )));
        }

        let version = header_string(&response, VERSION_HEADER).unwrap_or_else(|| {
            debug!("No {} header, recording version as unknown", VERSION_HEADER);
            "unknown".to_string()
        });
        let declared_hash = header_string(&response, HASH_HEADER);

        let body = response
            .bytes()
            .await
            .map_err(|e| BotstrapError::Download(e.to_string()))?;

        fs::create_dir_all(self.store.cache_dir())
            .await
            .map_err(|e| BotstrapError::io("creating cache directory", e))?;

        // Stage next to the artifact so the current copy survives a bad
        // download; promoted only after the hash checks out.
        let staging = self.store.artifact_path().with_extension("js.part");
        fs::write(&staging, &body)
            .await
            .map_err(|e| BotstrapError::io(format!("writing {}", staging.display()), e))?;

        let actual_hash = integrity::compute_hash(&staging)
            .await?
            .ok_or_else(|| BotstrapError::Internal("staged artifact vanished".to_string()))?;

        if let Some(expected) = declared_hash {
            if actual_hash != expected {
                let _ = fs::remove_file(&staging).await;
                return Err(BotstrapError::IntegrityMismatch {
                    expected,
                    actual: actual_hash,
                });
            }
            debug!("Artifact hash verified: {}", actual_hash);
        } else {
            debug!("No {} header, skipping integrity check", HASH_HEADER);
        }

        let artifact_path = self.store.artifact_path();
        fs::rename(&staging, &artifact_path)
            .await
            .map_err(|e| BotstrapError::io("installing downloaded artifact", e))?;

        self.store
            .write(&CacheRecord {
                version: version.clone(),
                hash: actual_hash,
                downloaded_at: Utc::now(),
                file_size: body.len() as u64,
            })
            .await;

        info!("Downloaded artifact version {} ({} bytes)", version, body.len());
        Ok(artifact_path)
    }
}

fn header_string(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
