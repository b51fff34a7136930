//! Init command implementation.
//!
//! The `server-sentinel init` command writes the bundled `config.yml`.

use crate::cli::args::InitArgs;
use crate::config::materialize_default;
use crate::error::Result;

use super::dispatcher::{Command, CommandResult, HostPaths};

/// The init command implementation.
pub struct InitCommand {
    paths: HostPaths,
    args: InitArgs,
}

impl InitCommand {
    pub fn new(paths: HostPaths, args: InitArgs) -> Self {
        Self { paths, args }
    }
}

impl Command for InitCommand {
    fn execute(&self) -> Result<CommandResult> {
        let path = self.paths.config_path();

        if path.exists() && !self.args.force {
            println!(
                "Config already exists at {}. Use --force to overwrite.",
                path.display()
            );
            return Ok(CommandResult::failure(1));
        }

        materialize_default(&path)?;
        println!("Created {}", path.display());
        Ok(CommandResult::success())
    }
}
