//! Startup gate and TPS watchdog.
//!
//! [`start`] drives the whole lifecycle against a [`Host`]:
//!
//! 1. **Initializing** - load `config.yml` from the data directory and
//!    resolve the server identity.
//! 2. **CheckingDependencies** - run the [`DependencyChecker`] once. On
//!    failure, send `server_start_failed`, ask the host to shut down and stop.
//! 3. **Monitoring** - schedule the [`TpsMonitor`] after a 1 second delay,
//!    then every 5 minutes, for the rest of the process lifetime.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use server_sentinel::host::{Host, LoadedModules, MockControl, MockStats, RecordingChannel};
//! use server_sentinel::scheduler::ManualScheduler;
//! use server_sentinel::supervisor::{start, SupervisorState};
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! std::fs::write(temp.path().join("config.yml"), "required-plugins:\n  Essentials: true\n").unwrap();
//!
//! let channel = Arc::new(RecordingChannel::new());
//! let scheduler = Arc::new(ManualScheduler::new());
//! let host = Host {
//!     data_dir: temp.path().to_path_buf(),
//!     world_container: "/srv/hub".into(),
//!     modules: Arc::new(LoadedModules::from_names(["Essentials"])),
//!     control: Arc::new(MockControl::new()),
//!     channel: channel.clone(),
//!     stats: Arc::new(MockStats::constant(9.5)),
//!     scheduler: scheduler.clone(),
//! };
//!
//! let handle = start(host).unwrap();
//! assert_eq!(handle.state(), SupervisorState::Monitoring);
//!
//! scheduler.fire();
//! assert_eq!(channel.commands(), vec!["send tps_alert hub 9.5".to_string()]);
//! ```

pub mod monitor;
pub mod state;

use std::sync::Arc;

use crate::alert::{AlertDispatcher, AlertKind};
use crate::config::{self, Configuration, CONFIG_FILE_NAME};
use crate::error::Result;
use crate::host::Host;
use crate::identity::ServerIdentity;
use crate::metrics::MetricSampler;
use crate::modules::{CheckResult, DependencyChecker};
use crate::scheduler::{TaskHandle, Ticks};

pub use monitor::{TickOutcome, TpsMonitor};
pub use state::SupervisorState;

/// Delay before the first TPS sample.
pub const INITIAL_DELAY: Ticks = Ticks::from_secs(1);

/// Interval between TPS samples (5 minutes).
pub const SAMPLE_PERIOD: Ticks = Ticks::from_secs(300);

/// Load configuration from the host and run the full lifecycle.
///
/// # Errors
///
/// Returns `ConfigCreation` when the default config cannot be written.
/// A failed dependency check is not an error: the returned handle reports
/// [`SupervisorState::ShuttingDown`].
pub fn start(host: Host) -> Result<SupervisorHandle> {
    Supervisor::initialize(host).map(Supervisor::run)
}

/// Owns the immutable configuration and identity for one process lifetime.
pub struct Supervisor {
    host: Host,
    config: Arc<Configuration>,
    identity: ServerIdentity,
    state: SupervisorState,
}

impl Supervisor {
    /// Load `config.yml` from the host's data directory and resolve identity.
    pub fn initialize(host: Host) -> Result<Self> {
        let config = config::load(&host.data_dir.join(CONFIG_FILE_NAME))?;
        let identity = ServerIdentity::resolve(&host.world_container);
        tracing::info!("Server identity resolved to '{}'", identity);
        Ok(Self::new(host, config, identity))
    }

    /// Build a supervisor from an already-loaded configuration.
    pub fn new(host: Host, config: Configuration, identity: ServerIdentity) -> Self {
        Self {
            host,
            config: Arc::new(config),
            identity,
            state: SupervisorState::Initializing,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    /// Check dependencies, then either shut the host down or start monitoring.
    pub fn run(mut self) -> SupervisorHandle {
        self.transition(SupervisorState::CheckingDependencies);

        let check = DependencyChecker::new(self.host.modules.as_ref())
            .check(&self.config.required_modules);
        let dispatcher = AlertDispatcher::new(Arc::clone(&self.host.channel));

        if !check.ok {
            dispatcher.dispatch(AlertKind::ServerStartFailed, &self.identity, &check.payload());
            tracing::error!(
                "One or more required modules have failed to load! Shutting down server now!"
            );
            self.transition(SupervisorState::ShuttingDown);
            self.host.control.shutdown();
            return self.into_handle(check, None);
        }

        self.transition(SupervisorState::Monitoring);
        let monitor = TpsMonitor::new(
            MetricSampler::new(Arc::clone(&self.host.stats)),
            dispatcher,
            self.identity.clone(),
            self.config.tps_alert_threshold,
        );
        let task = self.host.scheduler.schedule_repeating(
            INITIAL_DELAY,
            SAMPLE_PERIOD,
            monitor.into_task(),
        );
        tracing::info!(
            "Monitoring TPS every {}s, alerting at or below {}",
            SAMPLE_PERIOD.duration().as_secs(),
            self.config.tps_alert_threshold
        );

        self.into_handle(check, Some(task))
    }

    fn transition(&mut self, next: SupervisorState) {
        debug_assert!(self.state.can_transition_to(next));
        tracing::debug!("Supervisor {} -> {}", self.state, next);
        self.state = next;
    }

    fn into_handle(self, check: CheckResult, task: Option<Box<dyn TaskHandle>>) -> SupervisorHandle {
        SupervisorHandle {
            state: self.state,
            config: self.config,
            identity: self.identity,
            check,
            task,
        }
    }
}

/// Result of [`start`]: the terminal state and the running timer, if any.
pub struct SupervisorHandle {
    state: SupervisorState,
    config: Arc<Configuration>,
    identity: ServerIdentity,
    check: CheckResult,
    task: Option<Box<dyn TaskHandle>>,
}

impl SupervisorHandle {
    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn is_monitoring(&self) -> bool {
        self.state == SupervisorState::Monitoring
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn identity(&self) -> &ServerIdentity {
        &self.identity
    }

    /// The startup dependency check.
    pub fn check(&self) -> &CheckResult {
        &self.check
    }

    /// Stop the monitoring timer. No-op after a shutdown.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.cancel();
            tracing::debug!("Monitoring timer cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_cancelled())
    }
}

impl std::fmt::Debug for SupervisorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupervisorHandle")
            .field("state", &self.state)
            .field("identity", &self.identity)
            .field("check", &self.check)
            .finish_non_exhaustive()
    }
}
