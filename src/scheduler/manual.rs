//! Scheduler that only fires when told to.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use server_sentinel::scheduler::{ManualScheduler, Scheduler, Ticks};
//!
//! let scheduler = ManualScheduler::new();
//! let task: server_sentinel::scheduler::Task = Arc::new(|| Ok(()));
//! let _handle = scheduler.schedule_repeating(Ticks(20), Ticks(6000), task);
//!
//! assert_eq!(scheduler.schedules(), vec![(Ticks(20), Ticks(6000))]);
//! assert_eq!(scheduler.fire().len(), 1);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::Result;

use super::{Scheduler, Task, TaskHandle, Ticks};

struct Scheduled {
    delay: Ticks,
    period: Ticks,
    task: Task,
    cancelled: Arc<AtomicBool>,
}

/// Records scheduled tasks and runs them synchronously on [`fire`](Self::fire).
#[derive(Default)]
pub struct ManualScheduler {
    scheduled: Mutex<Vec<Scheduled>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every live task once, on the calling thread.
    ///
    /// Returns one result per task fired, in scheduling order.
    pub fn fire(&self) -> Vec<Result<()>> {
        let tasks: Vec<Task> = match self.scheduled.lock() {
            Ok(scheduled) => scheduled
                .iter()
                .filter(|s| !s.cancelled.load(Ordering::SeqCst))
                .map(|s| Arc::clone(&s.task))
                .collect(),
            Err(_) => Vec::new(),
        };

        tasks.iter().map(|task| task()).collect()
    }

    /// Fire `times` rounds, collecting every result.
    pub fn fire_times(&self, times: usize) -> Vec<Result<()>> {
        (0..times).flat_map(|_| self.fire()).collect()
    }

    /// `(delay, period)` of every task ever scheduled.
    pub fn schedules(&self) -> Vec<(Ticks, Ticks)> {
        self.scheduled
            .lock()
            .map(|s| s.iter().map(|t| (t.delay, t.period)).collect())
            .unwrap_or_default()
    }

    /// Number of tasks that have not been cancelled.
    pub fn live_tasks(&self) -> usize {
        self.scheduled
            .lock()
            .map(|s| {
                s.iter()
                    .filter(|t| !t.cancelled.load(Ordering::SeqCst))
                    .count()
            })
            .unwrap_or_default()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, delay: Ticks, period: Ticks, task: Task) -> Box<dyn TaskHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        if let Ok(mut scheduled) = self.scheduled.lock() {
            scheduled.push(Scheduled {
                delay,
                period,
                task,
                cancelled: Arc::clone(&cancelled),
            });
        }
        Box::new(ManualTaskHandle { cancelled })
    }
}

struct ManualTaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle for ManualTaskHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
