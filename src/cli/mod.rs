//! Command-line interface for the sentinel.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, InitArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, HostPaths};
