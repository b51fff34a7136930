//! TPS sampling.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::host::StatsProvider;

/// Rolling windows offered by the statistics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticWindow {
    Seconds5,
    Seconds10,
    Minutes1,
    Minutes5,
    Minutes15,
}

impl StatisticWindow {
    pub fn seconds(self) -> u64 {
        match self {
            StatisticWindow::Seconds5 => 5,
            StatisticWindow::Seconds10 => 10,
            StatisticWindow::Minutes1 => 60,
            StatisticWindow::Minutes5 => 300,
            StatisticWindow::Minutes15 => 900,
        }
    }
}

impl fmt::Display for StatisticWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

/// Samples the TPS average over a fixed 10-second window.
///
/// No retries and no caching: every call queries the provider, and a
/// provider error is returned as-is.
#[derive(Clone)]
pub struct MetricSampler {
    provider: Arc<dyn StatsProvider>,
}

impl MetricSampler {
    pub const WINDOW: StatisticWindow = StatisticWindow::Seconds10;

    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self { provider }
    }

    pub fn sample(&self) -> Result<f64> {
        let tps = self.provider.poll_tps(Self::WINDOW)?;
        tracing::debug!("Sampled TPS over {}: {}", Self::WINDOW, tps);
        Ok(tps)
    }
}

/// Format a sample the way alerts carry it.
///
/// Whole numbers keep their decimal point (`15.0`, not `15`).
pub fn format_sample(tps: f64) -> String {
    format!("{:?}", tps)
}
