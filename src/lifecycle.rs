//! Termination handling and cache cleanup
//!
//! Arms signal handlers before the artifact takes over, and guarantees the
//! artifact file is removed from the cache directory on every exit path.
//! Cleanup may be invoked more than once for a single termination event
//! (signal path plus the normal exit path), so it is guarded by a
//! file-existence check rather than a one-shot flag. The metadata record
//! is kept: it describes the last verified download for the next launch.

use crate::error::{BotstrapError, BotstrapResult};
use crate::executor::RunningArtifact;
use std::path::PathBuf;
use std::process::ExitStatus;
use tokio::fs;
use tracing::{debug, info, warn};

/// Where the launcher is in its termination lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Armed,
    Cleaning,
    Done,
}

/// How a supervised artifact ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The artifact's process exited on its own
    Completed(ExitStatus),
    /// SIGINT / Ctrl-C; treated as a graceful stop
    Interrupted,
    /// SIGTERM; treated as a graceful stop
    Terminated,
}

/// Owns cleanup of launcher state in the cache directory
pub struct LifecycleManager {
    artifact_path: PathBuf,
    state: State,
}

impl LifecycleManager {
    /// Arm the lifecycle for the given artifact path
    pub fn arm(artifact_path: PathBuf) -> Self {
        debug!("Lifecycle armed for {}", artifact_path.display());
        Self {
            artifact_path,
            state: State::Armed,
        }
    }

    /// Run the artifact until it exits or the process is told to stop.
    ///
    /// On a signal the artifact process is terminated before returning so
    /// cleanup never races with a child still writing.
    pub async fn supervise(&mut self, mut running: RunningArtifact) -> BotstrapResult<RunOutcome> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate())
                .map_err(|e| BotstrapError::io("registering SIGTERM handler", e))?;

            tokio::select! {
                status = running.wait() => Ok(RunOutcome::Completed(status?)),
                _ = tokio::signal::ctrl_c() => {
                    info!("Received interrupt, stopping artifact");
                    running.kill().await;
                    Ok(RunOutcome::Interrupted)
                }
                _ = sigterm.recv() => {
                    info!("Received termination signal, stopping artifact");
                    running.kill().await;
                    Ok(RunOutcome::Terminated)
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                status = running.wait() => Ok(RunOutcome::Completed(status?)),
                _ = tokio::signal::ctrl_c() => {
                    info!("Received interrupt, stopping artifact");
                    running.kill().await;
                    Ok(RunOutcome::Interrupted)
                }
            }
        }
    }

    /// Remove the artifact file from the cache directory.
    ///
    /// Safe to call any number of times; a missing file is a no-op.
    pub async fn cleanup(&mut self) {
        if self.state == State::Armed {
            self.state = State::Cleaning;
        }

        if self.artifact_path.exists() {
            match fs::remove_file(&self.artifact_path).await {
                Ok(()) => debug!("Removed artifact {}", self.artifact_path.display()),
                Err(e) => warn!(
                    "Failed to remove artifact {}: {}",
                    self.artifact_path.display(),
                    e
                ),
            }
        } else {
            debug!("Artifact already absent, nothing to clean");
        }

        self.state = State::Done;
    }
}
