//! Error types for sentinel operations.
//!
//! This module defines [`SentinelError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Startup failures that cannot be recovered (`ConfigCreation`) are returned
//!   to the caller and abort the process
//! - Degraded conditions (`ConfigParse`) are logged and absorbed by the loader
//! - Per-firing failures (`MetricProvider`, `AlertDelivery`) are logged and
//!   never stop the monitoring timer

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sentinel operations.
#[derive(Debug, Error)]
pub enum SentinelError {
    /// The bundled config template could not be written to disk.
    #[error("Unable to generate config file at {path}: {source}")]
    ConfigCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but could not be read or parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// One or more required modules are not loaded on the host.
    #[error("Required modules not loaded: {}", missing.join(","))]
    MissingRequiredModules { missing: Vec<String> },

    /// The statistics provider failed to produce a sample.
    #[error("Metric provider failed: {message}")]
    MetricProvider { message: String },

    /// An alert could not be handed to the command channel.
    #[error("Failed to deliver alert '{command}': {message}")]
    AlertDelivery { command: String, message: String },

    /// An external command could not be started.
    #[error("Failed to start '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for sentinel operations.
pub type Result<T> = std::result::Result<T, SentinelError>;
