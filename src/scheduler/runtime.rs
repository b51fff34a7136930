//! Tokio-backed scheduler.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{Scheduler, Task, TaskHandle, Ticks};

/// Schedules tasks on a tokio runtime.
///
/// Each firing runs on the blocking pool and is awaited before the timer
/// ticks again, so firings never overlap. A firing that fails or panics is
/// logged and the next one still happens.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime this is called from.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, delay: Ticks, period: Ticks, task: Task) -> Box<dyn TaskHandle> {
        let delay = delay.duration();
        let period = period.max(Ticks(1)).duration();

        let join = self.handle.spawn(async move {
            let start = Instant::now() + delay;
            let mut interval = time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let task = Arc::clone(&task);
                match tokio::task::spawn_blocking(move || task()).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => tracing::error!("Scheduled task failed: {}", e),
                    Err(e) => tracing::error!("Scheduled task panicked: {}", e),
                }
            }
        });

        Box::new(TokioTaskHandle { join })
    }
}

struct TokioTaskHandle {
    join: JoinHandle<()>,
}

impl TaskHandle for TokioTaskHandle {
    fn cancel(&self) {
        self.join.abort();
    }

    fn is_cancelled(&self) -> bool {
        self.join.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SentinelError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_task(counter: Arc<AtomicUsize>, fail: bool) -> Task {
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            if fail {
                Err(SentinelError::MetricProvider {
                    message: "offline".to_string(),
                })
            } else {
                Ok(())
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_repeatedly() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current();

        let handle =
            scheduler.schedule_repeating(Ticks(0), Ticks(20), counting_task(counter.clone(), false));
        time::sleep(Duration::from_millis(3500)).await;
        handle.cancel();

        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_firing_does_not_stop_timer() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current();

        let handle =
            scheduler.schedule_repeating(Ticks(0), Ticks(20), counting_task(counter.clone(), true));
        time::sleep(Duration::from_millis(3500)).await;
        handle.cancel();

        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_firing_does_not_stop_timer() {
        let counter = Arc::new(AtomicUsize::new(0));
        let calls = Arc::clone(&counter);
        let task: Task = Arc::new(move || {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("first firing blew up");
            }
            Ok(())
        });
        let scheduler = TokioScheduler::current();

        let handle = scheduler.schedule_repeating(Ticks(0), Ticks(20), task);
        time::sleep(Duration::from_millis(3500)).await;

        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn initial_delay_is_respected() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current();

        let handle = scheduler.schedule_repeating(
            Ticks::from_secs(60),
            Ticks(20),
            counting_task(counter.clone(), false),
        );
        time::sleep(Duration::from_secs(59)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_firings() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current();

        let handle =
            scheduler.schedule_repeating(Ticks(0), Ticks(20), counting_task(counter.clone(), false));
        time::sleep(Duration::from_millis(2500)).await;
        handle.cancel();
        time::sleep(Duration::from_millis(50)).await;

        assert!(handle.is_cancelled());
        let after_cancel = counter.load(Ordering::SeqCst);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), after_cancel);
    }
}
