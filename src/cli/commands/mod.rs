//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - `run` (default) - dependency gate followed by the TPS watchdog
//! - `check` - one-shot dependency check
//! - `init` - write the default config

pub mod check;
pub mod dispatcher;
pub mod init;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, HostPaths};
