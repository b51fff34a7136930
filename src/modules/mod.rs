//! Companion module checks.
//!
//! - [`checker`] - all-or-nothing startup check of required modules

pub mod checker;

pub use checker::{CheckResult, DependencyChecker};
