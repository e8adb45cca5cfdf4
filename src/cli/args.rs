//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Botstrap - Self-updating bot launcher
///
/// Fetches the bot artifact from the update server, verifies and caches
/// it, runs it, and cleans up local state on exit.
#[derive(Parser, Debug)]
#[command(name = "botstrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BOTSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Update server base URL (overrides config)
    #[arg(short, long, global = true, env = "BOTSTRAP_SERVER_URL")]
    pub server: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check for updates, download if needed, and run the artifact
    Launch(LaunchArgs),

    /// Show cache state, server settings, and the heap diagnostic
    Status,

    /// Remove the cached artifact and its metadata record
    Clean,
}

/// Arguments for the launch command
#[derive(Parser, Debug)]
pub struct LaunchArgs {
    /// Download a fresh artifact even if the server reports no update
    #[arg(short, long)]
    pub force: bool,

    /// Skip the update check and run the cached artifact directly
    #[arg(long, conflicts_with = "force")]
    pub offline: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_launch() {
        let cli = Cli::parse_from(["botstrap", "launch"]);
        match cli.command {
            Commands::Launch(args) => {
                assert!(!args.force);
                assert!(!args.offline);
            }
            _ => panic!("expected Launch command"),
        }
    }

    #[test]
    fn cli_parses_launch_force() {
        let cli = Cli::parse_from(["botstrap", "launch", "--force"]);
        match cli.command {
            Commands::Launch(args) => assert!(args.force),
            _ => panic!("expected Launch command"),
        }
    }

    #[test]
    fn cli_force_conflicts_with_offline() {
        let result = Cli::try_parse_from(["botstrap", "launch", "--force", "--offline"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_status() {
        let cli = Cli::parse_from(["botstrap", "status"]);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn cli_parses_clean() {
        let cli = Cli::parse_from(["botstrap", "clean"]);
        assert!(matches!(cli.command, Commands::Clean));
    }

    #[test]
    fn cli_server_flag() {
        let cli = Cli::parse_from(["botstrap", "--server", "http://10.0.0.2:3000", "status"]);
        assert_eq!(cli.server.as_deref(), Some("http://10.0.0.2:3000"));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["botstrap", "status"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["botstrap", "-vv", "status"]);
        assert_eq!(cli.verbose, 2);
    }
}
