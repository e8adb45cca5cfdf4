//! Status command - show cache state and launch diagnostics

use crate::cache::CacheStore;
use crate::config::LauncherContext;
use crate::error::BotstrapResult;
use crate::heap::{self, HeapProfile};
use crate::integrity;
use console::style;

/// Execute the status command
pub async fn execute(ctx: &LauncherContext) -> BotstrapResult<()> {
    println!("{}", style("Botstrap Status").bold().cyan());
    println!();

    println!("{} {}", style("Server:").bold(), ctx.server_url);
    println!("{} {}", style("Cache dir:").bold(), ctx.cache_dir.display());
    println!();

    let store = CacheStore::new(&ctx.cache_dir);
    match store.read().await {
        Some(record) => {
            println!(
                "  {} Cached version {} ({} bytes, downloaded {})",
                style("✓").green(),
                style(&record.version).cyan(),
                record.file_size,
                record.downloaded_at.format("%Y-%m-%d %H:%M UTC")
            );

            match integrity::compute_hash(&store.artifact_path()).await? {
                Some(hash) if hash == record.hash => {
                    println!("  {} Artifact matches recorded hash", style("✓").green());
                }
                Some(hash) => {
                    println!(
                        "  {} Artifact hash {} differs from record {}",
                        style("!").yellow(),
                        &hash[..12],
                        &record.hash[..record.hash.len().min(12)]
                    );
                }
                None => {
                    println!(
                        "  {} Metadata present but artifact file missing",
                        style("!").yellow()
                    );
                }
            }
        }
        None => match integrity::compute_hash(&store.artifact_path()).await? {
            Some(hash) => {
                println!(
                    "  {} Artifact present without metadata (hash {})",
                    style("!").yellow(),
                    &hash[..12]
                );
            }
            None => {
                println!("  {} No cached artifact", style("-").dim());
            }
        },
    }

    println!();
    match heap::total_ram_mb() {
        Some(total_ram_mb) => {
            let profile = HeapProfile::compute(total_ram_mb, ctx.config.runtime.heap_limit_mb);
            println!(
                "{} {:.1} GB RAM, heap limit {} MB, optimal {} MB{}",
                style("Memory:").bold(),
                profile.total_ram_gb,
                profile.current_heap_limit_mb,
                profile.optimal_heap_mb,
                if profile.needs_optimization {
                    " (below optimal)"
                } else {
                    ""
                }
            );
        }
        None => {
            println!("{} host memory stats unavailable", style("Memory:").bold());
        }
    }

    Ok(())
}
