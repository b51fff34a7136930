//! External command execution.

pub mod command;

pub use command::{execute, execute_program, execute_quiet, CommandOptions, CommandResult};
