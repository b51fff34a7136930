//! Run command implementation.
//!
//! `server-sentinel run` performs the startup dependency check and, when it
//! passes, samples TPS on a tokio timer until the process receives Ctrl+C or
//! SIGTERM.

use std::sync::Arc;

use anyhow::anyhow;

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::host::{CommandStatsProvider, Host, ProcessControl, ProgramChannel};
use crate::scheduler::TokioScheduler;
use crate::supervisor;

use super::dispatcher::{Command, CommandResult, HostPaths};

/// The run command implementation.
pub struct RunCommand {
    paths: HostPaths,
    args: RunArgs,
}

impl RunCommand {
    pub fn new(paths: HostPaths, args: RunArgs) -> Self {
        Self { paths, args }
    }

    fn build_host(&self, scheduler: TokioScheduler) -> Result<Host> {
        let tps_command = self.args.tps_command.clone().ok_or_else(|| {
            anyhow!("--tps-command (or SENTINEL_TPS_COMMAND) is required to monitor TPS")
        })?;

        Ok(Host {
            data_dir: self.paths.data_dir.clone(),
            world_container: self.paths.world_container.clone(),
            modules: Arc::new(self.paths.loaded_modules()?),
            control: Arc::new(ProcessControl::new(self.args.shutdown_command.clone())),
            channel: Arc::new(ProgramChannel::new(self.args.alert_command.clone())),
            stats: Arc::new(CommandStatsProvider::new(tps_command)),
            scheduler: Arc::new(scheduler),
        })
    }
}

impl Command for RunCommand {
    fn execute(&self) -> Result<CommandResult> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let host = self.build_host(TokioScheduler::new(runtime.handle().clone()))?;
        let handle = supervisor::start(host)?;

        if !handle.is_monitoring() {
            return Ok(CommandResult::failure(1));
        }

        runtime.block_on(shutdown_signal());
        handle.cancel();
        tracing::info!("Sentinel stopped");

        Ok(CommandResult::success())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, stopping"),
        _ = terminate => tracing::info!("Received SIGTERM, stopping"),
    }
}
