//! Botstrap - Self-updating bot launcher
//!
//! CLI entry point that dispatches to subcommands.

use botstrap::cli::{Cli, Commands};
use botstrap::config::{ConfigManager, LauncherContext};
use botstrap::error::BotstrapResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BotstrapResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("botstrap=warn"),
        1 => EnvFilter::new("botstrap=info"),
        _ => EnvFilter::new("botstrap=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    let ctx = LauncherContext::resolve(config, cli.server.clone())?;

    match cli.command {
        Commands::Launch(args) => botstrap::cli::commands::launch(args, &ctx).await,
        Commands::Status => botstrap::cli::commands::status(&ctx).await,
        Commands::Clean => botstrap::cli::commands::clean(&ctx).await,
    }
}
