//! Server Sentinel - startup dependency gate and TPS watchdog.
//!
//! The sentinel runs alongside a hosted application server. At startup it
//! verifies that every required companion module is loaded, and shuts the
//! server down with a `server_start_failed` alert when any is missing.
//! Afterwards it samples the server's ticks-per-second every five minutes
//! and sends a `tps_alert` whenever the sample is at or below the configured
//! threshold.
//!
//! # Modules
//!
//! - [`alert`] - Alert formatting and dispatch
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and the bundled default
//! - [`error`] - Error types and result aliases
//! - [`host`] - Traits for host collaborators and their implementations
//! - [`identity`] - Server identity resolution
//! - [`metrics`] - TPS sampling
//! - [`modules`] - Required-module checks
//! - [`scheduler`] - Recurring task scheduling
//! - [`shell`] - External command execution
//! - [`supervisor`] - Lifecycle orchestration
//!
//! # Example
//!
//! ```
//! use server_sentinel::config::RequiredModule;
//! use server_sentinel::host::LoadedModules;
//! use server_sentinel::modules::DependencyChecker;
//!
//! let loaded = LoadedModules::from_names(["A", "B"]);
//! let declared = vec![
//!     RequiredModule::new("A", true),
//!     RequiredModule::new("C", true),
//!     RequiredModule::new("D", false),
//! ];
//!
//! let result = DependencyChecker::new(&loaded).check(&declared);
//! assert!(!result.ok);
//! assert_eq!(result.payload(), "C");
//! ```

pub mod alert;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod identity;
pub mod metrics;
pub mod modules;
pub mod scheduler;
pub mod shell;
pub mod supervisor;

pub use error::{Result, SentinelError};
