//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::host::LoadedModules;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Host locations shared by every command.
#[derive(Debug, Clone)]
pub struct HostPaths {
    pub data_dir: PathBuf,
    pub world_container: PathBuf,
    pub modules_dir: PathBuf,
    pub extra_loaded: Vec<String>,
}

impl HostPaths {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            world_container: cli.world_container.clone(),
            modules_dir: cli.modules_dir.clone(),
            extra_loaded: cli.loaded.clone(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(crate::config::CONFIG_FILE_NAME)
    }

    /// Snapshot of the modules directory plus any names given with `--loaded`.
    pub fn loaded_modules(&self) -> Result<LoadedModules> {
        let mut modules = LoadedModules::from_dir(&self.modules_dir)?;
        modules.extend(self.extra_loaded.iter().cloned());
        Ok(modules)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: HostPaths,
}

impl CommandDispatcher {
    pub fn new(paths: HostPaths) -> Self {
        Self { paths }
    }

    /// Dispatch and execute a command. `run` is the default.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(self.paths.clone(), args.clone()).execute()
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(self.paths.clone(), args.clone()).execute()
            }
            Some(Commands::Init(args)) => {
                super::init::InitCommand::new(self.paths.clone(), args.clone()).execute()
            }
            None => super::run::RunCommand::new(self.paths.clone(), RunArgs::from_env()).execute(),
        }
    }
}
