//! Recurring task scheduling.
//!
//! The supervisor owns exactly one recurring task. It is handed to a
//! [`Scheduler`] so that production code runs it on a tokio timer while
//! tests fire it by hand.
//!
//! - [`runtime`] - tokio-backed scheduler
//! - [`manual`] - synchronous scheduler for tests

pub mod manual;
pub mod runtime;

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

/// Host time unit. The host advances 20 ticks per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(pub u64);

impl Ticks {
    pub const PER_SECOND: u64 = 20;

    /// Length of one tick.
    pub const LENGTH: Duration = Duration::from_millis(1000 / Self::PER_SECOND);

    pub const fn from_secs(secs: u64) -> Self {
        Ticks(secs * Self::PER_SECOND)
    }

    pub fn duration(self) -> Duration {
        Duration::from_millis(self.0 * Self::LENGTH.as_millis() as u64)
    }
}

/// A unit of recurring work. An `Err` fails that firing only.
pub type Task = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// Handle to a scheduled task.
pub trait TaskHandle: Send + Sync {
    /// Stop future firings.
    fn cancel(&self);

    fn is_cancelled(&self) -> bool;
}

/// Runs tasks on a fixed schedule.
pub trait Scheduler: Send + Sync {
    /// Run `task` after `delay`, then every `period`, until cancelled.
    fn schedule_repeating(&self, delay: Ticks, period: Ticks, task: Task) -> Box<dyn TaskHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_fifty_millis() {
        assert_eq!(Ticks::LENGTH, Duration::from_millis(50));
    }

    #[test]
    fn ticks_convert_to_duration() {
        assert_eq!(Ticks(20).duration(), Duration::from_secs(1));
        assert_eq!(Ticks(6000).duration(), Duration::from_secs(300));
    }

    #[test]
    fn from_secs_counts_ticks() {
        assert_eq!(Ticks::from_secs(300), Ticks(6000));
    }
}
