//! Update check against the remote server
//!
//! Asks the server whether a newer artifact exists, sending the cached
//! version and local artifact hash when available. Every transport
//! failure degrades to "no update available" so the launcher keeps
//! working from cache while the server is unreachable.

use crate::config::LauncherContext;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Server response to an update check
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDecision {
    /// Whether a newer artifact should be downloaded
    pub update_available: bool,

    /// The version the server believes we are running
    #[serde(default)]
    pub current_version: String,

    /// The newest version available on the server
    #[serde(default)]
    pub latest_version: String,
}

impl UpdateDecision {
    /// The decision used whenever the server cannot be consulted:
    /// run whatever is cached.
    fn use_cached() -> Self {
        Self {
            update_available: false,
            current_version: String::new(),
            latest_version: String::new(),
        }
    }
}

/// Queries the check-update endpoint
pub struct UpdateChecker {
    client: reqwest::Client,
    server_url: String,
    timeout: Duration,
}

impl UpdateChecker {
    /// Create a checker bound to the launcher context
    pub fn new(ctx: &LauncherContext) -> Self {
        Self {
            client: reqwest::Client::new(),
            server_url: ctx.server_url.clone(),
            timeout: Duration::from_secs(ctx.config.server.check_timeout_secs),
        }
    }

    /// Ask the server whether an update is available.
    ///
    /// `cached_version` and `local_hash` are omitted from the query when
    /// no cache exists. This call cannot fail: connection refused,
    /// timeouts, and bad responses all collapse into "use the cache".
    pub async fn check(
        &self,
        cached_version: Option<&str>,
        local_hash: Option<&str>,
    ) -> UpdateDecision {
        let url = format!("{}/api/bot/check-update", self.server_url);

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(version) = cached_version {
            query.push(("version", version));
        }
        if let Some(hash) = local_hash {
            query.push(("hash", hash));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .timeout(self.timeout)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_connect() => {
                warn!("Update server offline, using cached artifact");
                return UpdateDecision::use_cached();
            }
            Err(e) => {
                warn!("Update check failed ({}), using cached artifact", e);
                return UpdateDecision::use_cached();
            }
        };

        if !response.status().is_success() {
            warn!(
                "Update check returned HTTP {}, using cached artifact",
                response.status()
            );
            return UpdateDecision::use_cached();
        }

        match response.json::<UpdateDecision>().await {
            Ok(decision) => {
                debug!(
                    "Update check: available={} current={} latest={}",
                    decision.update_available, decision.current_version, decision.latest_version
                );
                decision
            }
            Err(e) => {
                warn!("Unparseable update response ({}), using cached artifact", e);
                UpdateDecision::use_cached()
            }
        }
    }
}
