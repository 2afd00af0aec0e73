use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use crate::timer::{Clock, Scheduler, TimerHandle, TimerId};

#[derive(Clone, Default)]
pub struct MockClock {
    now: Arc<RwLock<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: Duration) {
        *self.now.write() += dt;
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        *self.now.read()
    }
}

/// Records scheduled timers instead of running them. Tests deliver ticks by hand.
#[derive(Clone, Default)]
pub struct MockScheduler {
    scheduled: Arc<RwLock<Vec<(TimerHandle, Duration)>>>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handles(&self) -> Vec<TimerHandle> {
        self.scheduled.read().iter().map(|(h, _)| h.clone()).collect()
    }

    pub fn live_handles(&self) -> Vec<TimerHandle> {
        self.handles()
            .into_iter()
            .filter(|h| !h.is_cancelled())
            .collect()
    }

    pub fn latest(&self) -> Option<TimerHandle> {
        self.scheduled.read().last().map(|(h, _)| h.clone())
    }

    pub fn latest_period(&self) -> Option<Duration> {
        self.scheduled.read().last().map(|(_, p)| *p)
    }
}

impl Scheduler for MockScheduler {
    fn schedule_repeating(&self, id: TimerId, period: Duration) -> TimerHandle {
        let handle = TimerHandle::new(id);
        self.scheduled.write().push((handle.clone(), period));
        handle
    }
}
