//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default location of the sentinel's data directory.
pub const DEFAULT_DATA_DIR: &str = "plugins/ServerSentinel";

/// Default program that receives alert commands.
pub const DEFAULT_ALERT_COMMAND: &str = "dsend";

/// Server Sentinel - startup dependency gate and TPS watchdog.
#[derive(Debug, Parser)]
#[command(name = "server-sentinel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding config.yml (created on first run)
    #[arg(short, long, global = true, env = "SENTINEL_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Host data directory; its name identifies this server in alerts
    #[arg(short, long, global = true, default_value = ".")]
    pub world_container: PathBuf,

    /// Directory whose entries are the loaded modules
    #[arg(short, long, global = true, default_value = "plugins")]
    pub modules_dir: PathBuf,

    /// Additional loaded module names (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub loaded: Vec<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check dependencies, then watch TPS until stopped (default)
    Run(RunArgs),

    /// Check required modules once and report
    Check(CheckArgs),

    /// Write the default config.yml
    Init(InitArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Program that receives alert commands
    #[arg(long, env = "SENTINEL_ALERT_COMMAND", default_value = DEFAULT_ALERT_COMMAND)]
    pub alert_command: String,

    /// Shell command printing the current TPS; `{window}` is replaced by the window in seconds
    #[arg(long, env = "SENTINEL_TPS_COMMAND")]
    pub tps_command: Option<String>,

    /// Shell command that stops the host server
    #[arg(long, env = "SENTINEL_SHUTDOWN_COMMAND")]
    pub shutdown_command: Option<String>,
}

impl RunArgs {
    /// Run arguments taken from the environment, used when no subcommand is given.
    pub fn from_env() -> Self {
        Self {
            alert_command: std::env::var("SENTINEL_ALERT_COMMAND")
                .unwrap_or_else(|_| DEFAULT_ALERT_COMMAND.to_string()),
            tps_command: std::env::var("SENTINEL_TPS_COMMAND").ok(),
            shutdown_command: std::env::var("SENTINEL_SHUTDOWN_COMMAND").ok(),
        }
    }
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            alert_command: DEFAULT_ALERT_COMMAND.to_string(),
            tps_command: None,
            shutdown_command: None,
        }
    }
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Only set the exit code
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Overwrite an existing config.yml
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::parse_from(["server-sentinel"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.world_container, PathBuf::from("."));
        assert_eq!(cli.modules_dir, PathBuf::from("plugins"));
    }

    #[test]
    fn run_args_parse() {
        let cli = Cli::parse_from([
            "server-sentinel",
            "run",
            "--tps-command",
            "rcon tps {window}",
            "--shutdown-command",
            "systemctl stop mc",
        ]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.alert_command, "dsend");
                assert_eq!(args.tps_command.as_deref(), Some("rcon tps {window}"));
                assert_eq!(args.shutdown_command.as_deref(), Some("systemctl stop mc"));
            }
            other => panic!("Expected Run command, got {:?}", other),
        }
    }

    #[test]
    fn loaded_is_comma_delimited() {
        let cli = Cli::parse_from(["server-sentinel", "check", "--loaded", "A,B", "--loaded", "C"]);
        assert_eq!(cli.loaded, vec!["A", "B", "C"]);
    }

    #[test]
    fn init_force_flag() {
        let cli = Cli::parse_from(["server-sentinel", "init", "--force"]);
        assert!(matches!(cli.command, Some(Commands::Init(InitArgs { force: true }))));
    }
}
