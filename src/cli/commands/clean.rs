//! Clean command - operator reset of the cache directory

use crate::cache::CacheStore;
use crate::config::LauncherContext;
use crate::error::BotstrapResult;
use console::style;
use tokio::fs;
use tracing::debug;

/// Execute the clean command.
///
/// Unlike lifecycle cleanup this also drops the metadata record, so the
/// next launch starts from a blank slate.
pub async fn execute(ctx: &LauncherContext) -> BotstrapResult<()> {
    let store = CacheStore::new(&ctx.cache_dir);
    let mut removed = 0usize;

    let artifact = store.artifact_path();
    if artifact.exists() {
        fs::remove_file(&artifact)
            .await
            .map_err(|e| crate::error::BotstrapError::io("removing artifact", e))?;
        debug!("Removed {}", artifact.display());
        removed += 1;
    }

    if store.record_path().exists() {
        store.remove_record().await;
        removed += 1;
    }

    if removed == 0 {
        println!("{} Cache already empty", style("✓").green());
    } else {
        println!(
            "{} Cache cleared ({} file{})",
            style("✓").green(),
            removed,
            if removed == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
