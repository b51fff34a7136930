//! Host collaborators.
//!
//! The sentinel never talks to the application server directly. Everything
//! it needs from the host is expressed as a trait:
//!
//! - [`ModuleRegistry`] - which companion modules are loaded
//! - [`HostControl`] - asking the host to shut down
//! - [`CommandChannel`] - fanning out alert commands
//! - [`StatsProvider`] - polling the TPS statistic
//!
//! [`process`] backs these with external commands and the filesystem for the
//! standalone binary; [`mock`] provides in-memory doubles for tests.

pub mod mock;
pub mod process;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::metrics::StatisticWindow;
use crate::scheduler::Scheduler;

pub use mock::{MockControl, MockStats, RecordingChannel};
pub use process::{CommandStatsProvider, LoadedModules, ProcessControl, ProgramChannel};

/// Answers "is module X currently loaded?".
pub trait ModuleRegistry: Send + Sync {
    fn is_loaded(&self, name: &str) -> bool;
}

/// Host lifecycle control.
pub trait HostControl: Send + Sync {
    /// Ask the host to terminate. Called at most once per process.
    fn shutdown(&self);
}

/// Channel used to dispatch commands such as alerts.
pub trait CommandChannel: Send + Sync {
    /// Forward a single command. Delivery is not acknowledged.
    fn dispatch(&self, command: &str) -> Result<()>;
}

/// Source of the ticks-per-second statistic.
pub trait StatsProvider: Send + Sync {
    /// Average TPS over the given rolling window.
    fn poll_tps(&self, window: StatisticWindow) -> Result<f64>;
}

/// Everything the supervisor needs from the host.
#[derive(Clone)]
pub struct Host {
    /// Directory holding the sentinel's own `config.yml`.
    pub data_dir: PathBuf,

    /// The host's primary data directory, used to derive the server identity.
    pub world_container: PathBuf,

    pub modules: Arc<dyn ModuleRegistry>,
    pub control: Arc<dyn HostControl>,
    pub channel: Arc<dyn CommandChannel>,
    pub stats: Arc<dyn StatsProvider>,
    pub scheduler: Arc<dyn Scheduler>,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("data_dir", &self.data_dir)
            .field("world_container", &self.world_container)
            .finish_non_exhaustive()
    }
}
