use log::{debug, error};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[cfg(test)]
pub mod mock;

/// Monotonic time source. `now` is measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimerId(pub u64);

/// Handle to a repeating timer. Cancelling is permanent and visible to every clone.
#[derive(Clone, Debug)]
pub struct TimerHandle {
    id: TimerId,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new(id: TimerId) -> Self {
        TimerHandle {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("Cancelled timer {:?}", self.id);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Starts repeating timers. Each period, the implementation delivers a tick carrying the
/// timer id back to whoever owns the engine, until the handle is cancelled.
pub trait Scheduler {
    fn schedule_repeating(&self, id: TimerId, period: Duration) -> TimerHandle;
}

/// Runs each timer on its own thread. `on_tick` returns false once nobody is listening
/// anymore, which also stops the timer.
pub struct ThreadScheduler {
    on_tick: Arc<dyn Fn(TimerId) -> bool + Send + Sync>,
}

impl ThreadScheduler {
    pub fn new<F>(on_tick: F) -> Self
    where
        F: Fn(TimerId) -> bool + Send + Sync + 'static,
    {
        ThreadScheduler {
            on_tick: Arc::new(on_tick),
        }
    }
}

impl Scheduler for ThreadScheduler {
    fn schedule_repeating(&self, id: TimerId, period: Duration) -> TimerHandle {
        let handle = TimerHandle::new(id);
        let thread_handle = handle.clone();
        let on_tick = Arc::clone(&self.on_tick);
        let spawned = thread::Builder::new()
            .name(format!("timer-{}", id.0))
            .spawn(move || loop {
                thread::sleep(period);
                if thread_handle.is_cancelled() || !on_tick(thread_handle.id()) {
                    break;
                }
            });
        if let Err(e) = spawned {
            error!("Could not spawn thread for timer {:?}: {}", id, e);
        }
        handle
    }
}
