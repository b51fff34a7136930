//! The recurring TPS check.

use std::sync::Arc;

use crate::alert::{AlertDispatcher, AlertKind};
use crate::error::Result;
use crate::identity::ServerIdentity;
use crate::metrics::{format_sample, MetricSampler};
use crate::scheduler::Task;

/// What one firing of the monitor observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Sample above the threshold, nothing sent.
    Healthy(f64),
    /// Sample at or below the threshold, `tps_alert` dispatched.
    Alerted(f64),
}

/// Samples TPS and alerts when it is at or below the threshold.
///
/// Holds no state between firings: every firing alerts independently.
#[derive(Clone)]
pub struct TpsMonitor {
    sampler: MetricSampler,
    dispatcher: AlertDispatcher,
    identity: ServerIdentity,
    threshold: f64,
}

impl TpsMonitor {
    pub fn new(
        sampler: MetricSampler,
        dispatcher: AlertDispatcher,
        identity: ServerIdentity,
        threshold: f64,
    ) -> Self {
        Self {
            sampler,
            dispatcher,
            identity,
            threshold,
        }
    }

    /// One firing. Sampling errors are returned; delivery errors are logged.
    pub fn tick(&self) -> Result<TickOutcome> {
        let tps = self.sampler.sample()?;

        if tps <= self.threshold {
            self.dispatcher
                .dispatch(AlertKind::TpsAlert, &self.identity, &format_sample(tps));
            Ok(TickOutcome::Alerted(tps))
        } else {
            Ok(TickOutcome::Healthy(tps))
        }
    }

    pub fn into_task(self) -> Task {
        let monitor = Arc::new(self);
        Arc::new(move || monitor.tick().map(|_| ()))
    }
}
