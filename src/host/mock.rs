//! In-memory host doubles for testing.
//!
//! Each double records how it was used so tests can assert on it afterwards.
//!
//! # Example
//!
//! ```
//! use server_sentinel::host::{CommandChannel, RecordingChannel};
//!
//! let channel = RecordingChannel::new();
//! channel.dispatch("send tps_alert hub 12.0").unwrap();
//! assert_eq!(channel.commands(), vec!["send tps_alert hub 12.0".to_string()]);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{Result, SentinelError};
use crate::metrics::StatisticWindow;

use super::{CommandChannel, HostControl, StatsProvider};

/// Records every dispatched command.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    commands: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that records commands but reports every delivery as failed.
    pub fn failing() -> Self {
        Self {
            commands: Mutex::default(),
            failing: AtomicBool::new(true),
        }
    }

    /// Commands dispatched so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Commands whose event kind (second word) matches `kind`.
    pub fn commands_of_kind(&self, kind: &str) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| c.split_whitespace().nth(1) == Some(kind))
            .collect()
    }
}

impl CommandChannel for RecordingChannel {
    fn dispatch(&self, command: &str) -> Result<()> {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command.to_string());
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(SentinelError::AlertDelivery {
                command: command.to_string(),
                message: "channel closed".to_string(),
            });
        }
        Ok(())
    }
}

/// Serves queued TPS samples.
///
/// Queued entries are consumed in order. Once the queue is empty the
/// fallback sample is returned, or an error when there is none.
#[derive(Debug, Default)]
pub struct MockStats {
    queue: Mutex<VecDeque<std::result::Result<f64, String>>>,
    fallback: Option<f64>,
    windows: Mutex<Vec<StatisticWindow>>,
}

impl MockStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that always reports `tps` once its queue is drained.
    pub fn constant(tps: f64) -> Self {
        Self {
            fallback: Some(tps),
            ..Default::default()
        }
    }

    pub fn push_sample(&self, tps: f64) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(Ok(tps));
        }
    }

    pub fn push_failure(&self, message: &str) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(Err(message.to_string()));
        }
    }

    /// Windows requested so far.
    pub fn windows(&self) -> Vec<StatisticWindow> {
        self.windows.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl StatsProvider for MockStats {
    fn poll_tps(&self, window: StatisticWindow) -> Result<f64> {
        if let Ok(mut windows) = self.windows.lock() {
            windows.push(window);
        }

        let next = self.queue.lock().ok().and_then(|mut q| q.pop_front());
        match next {
            Some(Ok(tps)) => Ok(tps),
            Some(Err(message)) => Err(SentinelError::MetricProvider { message }),
            None => self.fallback.ok_or_else(|| SentinelError::MetricProvider {
                message: "no samples queued".to_string(),
            }),
        }
    }
}

/// Counts shutdown requests.
#[derive(Debug, Default)]
pub struct MockControl {
    shutdowns: AtomicUsize,
}

impl MockControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

impl HostControl for MockControl {
    fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_channel_keeps_order() {
        let channel = RecordingChannel::new();
        channel.dispatch("send a x 1").unwrap();
        channel.dispatch("send b x 2").unwrap();
        assert_eq!(channel.commands(), vec!["send a x 1", "send b x 2"]);
        assert_eq!(channel.commands_of_kind("b"), vec!["send b x 2"]);
    }

    #[test]
    fn failing_channel_still_records() {
        let channel = RecordingChannel::failing();
        assert!(channel.dispatch("send a x 1").is_err());
        assert_eq!(channel.commands().len(), 1);
    }

    #[test]
    fn mock_stats_drains_queue_then_falls_back() {
        let stats = MockStats::constant(20.0);
        stats.push_sample(12.0);
        stats.push_failure("boom");

        assert_eq!(stats.poll_tps(StatisticWindow::Seconds10).unwrap(), 12.0);
        assert!(stats.poll_tps(StatisticWindow::Seconds10).is_err());
        assert_eq!(stats.poll_tps(StatisticWindow::Seconds10).unwrap(), 20.0);
        assert_eq!(stats.windows().len(), 3);
    }

    #[test]
    fn empty_mock_stats_errors() {
        let stats = MockStats::new();
        assert!(matches!(
            stats.poll_tps(StatisticWindow::Seconds10),
            Err(SentinelError::MetricProvider { .. })
        ));
    }

    #[test]
    fn mock_control_counts() {
        let control = MockControl::new();
        control.shutdown();
        assert_eq!(control.shutdown_count(), 1);
    }
}
