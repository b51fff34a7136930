//! Host bindings backed by the filesystem and external commands.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Result, SentinelError};
use crate::metrics::StatisticWindow;
use crate::shell::{execute_program, execute_quiet, CommandOptions};

use super::{CommandChannel, HostControl, ModuleRegistry, StatsProvider};

/// Placeholder in the TPS command replaced by the window length in seconds.
pub const WINDOW_PLACEHOLDER: &str = "{window}";

/// File extension of an installed module archive.
pub const MODULE_EXTENSION: &str = "jar";

/// Snapshot of the modules loaded on the host.
#[derive(Debug, Clone, Default)]
pub struct LoadedModules {
    names: HashSet<String>,
}

impl LoadedModules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Snapshot a modules directory.
    ///
    /// Every regular file with the [`MODULE_EXTENSION`] counts as a loaded
    /// module named by its file stem, so `plugins/Essentials.jar` registers
    /// `Essentials`. Directories are module data folders and outlive their
    /// archive, so they never count. Hidden entries are skipped. A missing
    /// directory yields an empty snapshot.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            tracing::warn!("Modules directory {} does not exist", dir.display());
            return Ok(Self::default());
        }

        let mut names = HashSet::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || !is_module_archive(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            names.insert(stem.to_string());
        }

        tracing::debug!("Found {} modules in {}", names.len(), dir.display());
        Ok(Self { names })
    }

    /// Add names to the snapshot.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn is_module_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(MODULE_EXTENSION))
}

impl ModuleRegistry for LoadedModules {
    fn is_loaded(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Forwards commands to an external program, one word per argument.
///
/// With the default program `dsend`, the message `send tps_alert hub 12.5`
/// runs `dsend send tps_alert hub 12.5`.
#[derive(Debug, Clone)]
pub struct ProgramChannel {
    program: String,
}

impl ProgramChannel {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CommandChannel for ProgramChannel {
    fn dispatch(&self, command: &str) -> Result<()> {
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        let result = execute_program(&self.program, command.split_whitespace(), &options)
            .map_err(|e| SentinelError::AlertDelivery {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        if result.success {
            Ok(())
        } else {
            Err(SentinelError::AlertDelivery {
                command: command.to_string(),
                message: format!(
                    "{} exited with code {:?}: {}",
                    self.program,
                    result.exit_code,
                    result.stderr.trim()
                ),
            })
        }
    }
}

/// Polls TPS by running a shell command that prints a single number.
#[derive(Debug, Clone)]
pub struct CommandStatsProvider {
    command: String,
}

impl CommandStatsProvider {
    /// `command` may contain [`WINDOW_PLACEHOLDER`].
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn render(&self, window: StatisticWindow) -> String {
        self.command
            .replace(WINDOW_PLACEHOLDER, &window.seconds().to_string())
    }
}

impl StatsProvider for CommandStatsProvider {
    fn poll_tps(&self, window: StatisticWindow) -> Result<f64> {
        let command = self.render(window);
        let result = execute_quiet(&command).map_err(|e| SentinelError::MetricProvider {
            message: e.to_string(),
        })?;

        if !result.success {
            return Err(SentinelError::MetricProvider {
                message: format!(
                    "'{}' exited with code {:?}: {}",
                    command,
                    result.exit_code,
                    result.stderr.trim()
                ),
            });
        }

        let output = result.stdout.trim();
        output
            .parse::<f64>()
            .map_err(|_| SentinelError::MetricProvider {
                message: format!("'{}' printed '{}', expected a number", command, output),
            })
    }
}

/// Shuts the host down by running an optional command.
#[derive(Debug, Default)]
pub struct ProcessControl {
    shutdown_command: Option<String>,
    requested: AtomicBool,
}

impl ProcessControl {
    pub fn new(shutdown_command: Option<String>) -> Self {
        Self {
            shutdown_command,
            requested: AtomicBool::new(false),
        }
    }

    /// Whether shutdown has been requested.
    pub fn shutdown_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl HostControl for ProcessControl {
    fn shutdown(&self) {
        if self.requested.swap(true, Ordering::SeqCst) {
            tracing::warn!("Shutdown already requested, ignoring");
            return;
        }

        let Some(command) = &self.shutdown_command else {
            return;
        };

        match execute_quiet(command) {
            Ok(result) if result.success => {
                tracing::info!("Shutdown command '{}' completed", command);
            }
            Ok(result) => {
                tracing::error!(
                    "Shutdown command '{}' exited with code {:?}",
                    command,
                    result.exit_code
                );
            }
            Err(e) => tracing::error!("Shutdown command failed: {}", e),
        }
    }
}
