//! Launch command - update, verify, run, clean up

use crate::cache::CacheStore;
use crate::cli::args::LaunchArgs;
use crate::config::LauncherContext;
use crate::download::Downloader;
use crate::error::{BotstrapError, BotstrapResult};
use crate::executor::{ArtifactRunner, SubprocessRunner};
use crate::heap::{self, HeapProfile};
use crate::integrity;
use crate::lifecycle::{LifecycleManager, RunOutcome};
use crate::update::UpdateChecker;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Execute the launch command
pub async fn execute(args: LaunchArgs, ctx: &LauncherContext) -> BotstrapResult<()> {
    show_heap_profile(ctx);

    let store = CacheStore::new(&ctx.cache_dir);
    let artifact_path = resolve_artifact(&args, ctx, &store).await?;

    // Armed before the artifact takes over; fires on every exit path below
    let mut lifecycle = LifecycleManager::arm(artifact_path.clone());

    let result = run_artifact(ctx, &artifact_path, &mut lifecycle).await;
    lifecycle.cleanup().await;

    match result? {
        RunOutcome::Completed(status) if status.success() => {
            println!("{} Bot exited normally", style("✓").green());
            Ok(())
        }
        RunOutcome::Completed(status) => Err(BotstrapError::Execution(format!(
            "bot exited with {}",
            status
        ))),
        RunOutcome::Interrupted | RunOutcome::Terminated => {
            println!("{} Bot stopped", style("✓").green());
            Ok(())
        }
    }
}

/// Decide between downloading a fresh artifact and reusing the cache,
/// returning the path of the artifact to run.
async fn resolve_artifact(
    args: &LaunchArgs,
    ctx: &LauncherContext,
    store: &CacheStore,
) -> BotstrapResult<PathBuf> {
    let record = store.read().await;
    let local_hash = integrity::compute_hash(&store.artifact_path()).await?;
    let have_artifact = local_hash.is_some();

    let needs_download = if args.offline {
        debug!("Offline launch, skipping update check");
        false
    } else if args.force {
        info!("Forced download requested");
        true
    } else {
        let pb = spinner("Checking for updates...");
        let decision = UpdateChecker::new(ctx)
            .check(
                record.as_ref().map(|r| r.version.as_str()),
                local_hash.as_deref(),
            )
            .await;
        pb.finish_and_clear();

        if decision.update_available {
            println!(
                "{} Update available: {} -> {}",
                style("↑").cyan(),
                if decision.current_version.is_empty() {
                    "none"
                } else {
                    decision.current_version.as_str()
                },
                decision.latest_version
            );
        }
        decision.update_available || !have_artifact
    };

    if !needs_download {
        if let Some(record) = &record {
            println!(
                "{} Using cached bot version {}",
                style("✓").green(),
                style(&record.version).cyan()
            );
        }
        if have_artifact {
            return Ok(store.artifact_path());
        }
        return Err(BotstrapError::NoUsableArtifact);
    }

    let pb = spinner("Downloading bot...");
    let downloaded = Downloader::new(ctx, store).download().await;
    pb.finish_and_clear();

    match downloaded {
        Ok(path) => Ok(path),
        // A tampered artifact must never run, cached copy or not
        Err(e @ BotstrapError::IntegrityMismatch { .. }) => Err(e),
        Err(e) if have_artifact => {
            warn!("Download failed ({}), falling back to cached artifact", e);
            println!(
                "{} Download failed, running cached bot",
                style("!").yellow()
            );
            Ok(store.artifact_path())
        }
        Err(e) => {
            warn!("Download failed with no cached artifact: {}", e);
            Err(BotstrapError::NoUsableArtifact)
        }
    }
}

async fn run_artifact(
    ctx: &LauncherContext,
    artifact_path: &std::path::Path,
    lifecycle: &mut LifecycleManager,
) -> BotstrapResult<RunOutcome> {
    let runner = SubprocessRunner::new(ctx);
    let running = runner.spawn(artifact_path).await?;
    lifecycle.supervise(running).await
}

fn show_heap_profile(ctx: &LauncherContext) {
    let Some(total_ram_mb) = heap::total_ram_mb() else {
        debug!("Host memory stats unavailable, skipping heap diagnostic");
        return;
    };

    let profile = HeapProfile::compute(total_ram_mb, ctx.config.runtime.heap_limit_mb);
    println!(
        "{} {:.1} GB RAM, heap limit {} MB, optimal {} MB",
        style("Memory:").bold(),
        profile.total_ram_gb,
        profile.current_heap_limit_mb,
        profile.optimal_heap_mb
    );
    if profile.needs_optimization {
        println!(
            "{} Heap limit is well below optimal; consider raising it",
            style("!").yellow()
        );
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
