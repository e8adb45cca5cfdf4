//! Artifact execution
//!
//! Runs the cached artifact through a configured interpreter as a child
//! process. The source is fed over stdin after stripping a leading
//! interpreter directive, so a `#!` first line and its absence behave
//! identically.
//!
//! Two environment modes exist: `Isolated` (default) hands the child a
//! scrubbed environment (the `ISOLATED_KEEP` allowlist plus explicitly
//! configured pairs), `Inherit` gives it the launcher's full environment. Beyond the integrity check done at
//! download time the artifact is not validated, time-limited, or
//! resource-capped.

use crate::config::{EnvMode, LauncherContext};
use crate::error::{BotstrapError, BotstrapResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Environment variables preserved in isolated mode
const ISOLATED_KEEP: &[&str] = &["PATH", "HOME", "LANG", "TZ"];

/// Strip a single leading interpreter directive line, if present.
///
/// Only a `#!` at offset 0 counts; anything later in the source is left
/// alone.
pub fn prepare_source(source: &str) -> &str {
    if !source.starts_with("#!") {
        return source;
    }
    match source.find('\n') {
        Some(idx) => &source[idx + 1..],
        None => "",
    }
}

/// A started artifact process
pub struct RunningArtifact {
    child: Child,
}

impl RunningArtifact {
    /// Wait for the artifact process to finish
    pub async fn wait(&mut self) -> BotstrapResult<ExitStatus> {
        self.child
            .wait()
            .await
            .map_err(|e| BotstrapError::io("waiting for artifact process", e))
    }

    /// Terminate the artifact process
    pub async fn kill(&mut self) {
        let _ = self.child.kill().await;
    }
}

/// Something that can start the current artifact
#[async_trait]
pub trait ArtifactRunner: Send + Sync {
    /// Load the artifact at `path` and start it running
    async fn spawn(&self, path: &Path) -> BotstrapResult<RunningArtifact>;
}

/// Runs the artifact as a child of the launcher via an interpreter
pub struct SubprocessRunner {
    interpreter: String,
    interpreter_args: Vec<String>,
    env_mode: EnvMode,
    env: HashMap<String, String>,
}

impl SubprocessRunner {
    /// Create a runner from the launcher context
    pub fn new(ctx: &LauncherContext) -> Self {
        let rt = &ctx.config.runtime;
        Self {
            interpreter: rt.interpreter.clone(),
            interpreter_args: rt.interpreter_args.clone(),
            env_mode: rt.env_mode,
            env: rt.env.clone(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.args(&self.interpreter_args)
            .stdin(Stdio::piped())
            .kill_on_drop(true);

        if self.env_mode == EnvMode::Isolated {
            cmd.env_clear();
            for key in ISOLATED_KEEP {
                if let Ok(value) = std::env::var(key) {
                    cmd.env(key, value);
                }
            }
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd
    }
}

#[async_trait]
impl ArtifactRunner for SubprocessRunner {
    async fn spawn(&self, path: &Path) -> BotstrapResult<RunningArtifact> {
        let source = fs::read_to_string(path)
            .await
            .map_err(|e| BotstrapError::io(format!("reading artifact {}", path.display()), e))?;
        let prepared = prepare_source(&source).to_string();

        debug!(
            "Starting artifact via {} ({} bytes of source)",
            self.interpreter,
            prepared.len()
        );

        let mut child = self.command().spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BotstrapError::InterpreterNotFound(self.interpreter.clone())
            } else {
                BotstrapError::io(format!("spawning {}", self.interpreter), e)
            }
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BotstrapError::Internal("artifact stdin not piped".to_string()))?;
        stdin
            .write_all(prepared.as_bytes())
            .await
            .map_err(|e| BotstrapError::io("feeding artifact source", e))?;
        drop(stdin);

        info!("Artifact running (pid {:?})", child.id());
        Ok(RunningArtifact { child })
    }
}
