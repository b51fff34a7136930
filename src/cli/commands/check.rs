//! Check command implementation.
//!
//! `server-sentinel check` runs the startup dependency check once and
//! reports it through the exit code. Nothing is dispatched and the host is
//! never shut down.

use crate::cli::args::CheckArgs;
use crate::config;
use crate::error::{Result, SentinelError};
use crate::modules::DependencyChecker;

use super::dispatcher::{Command, CommandResult, HostPaths};

/// The check command implementation.
pub struct CheckCommand {
    paths: HostPaths,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(paths: HostPaths, args: CheckArgs) -> Self {
        Self { paths, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self) -> Result<CommandResult> {
        let config = config::load(&self.paths.config_path())?;
        let loaded = self.paths.loaded_modules()?;

        let enforced = config.enforced_modules().count();

        match DependencyChecker::new(&loaded)
            .check(&config.required_modules)
            .into_result()
        {
            Ok(()) => {
                if !self.args.quiet {
                    println!("All {} required modules are loaded", enforced);
                }
                Ok(CommandResult::success())
            }
            Err(e @ SentinelError::MissingRequiredModules { .. }) => {
                if !self.args.quiet {
                    println!("{}", e);
                }
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}
