//! Software timer: the period/armed bookkeeping behind the blink timer.
//!
//! A [`SoftTimer`] is created with an id, a period and an auto-reload
//! flag, like a FreeRTOS software timer.  It holds no thread and no
//! callback: the timer service polls it with the current time and
//! dispatches the expiry itself.
//!
//! `start`, `reset` and `change_period` all (re)arm the timer one period
//! from `now`, so a dormant timer is started by any of them.

use core::fmt;
use core::time::Duration;

/// Identity handed to the expiry callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Shortest period the timer accepts.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct SoftTimer {
    id: TimerId,
    period: Duration,
    auto_reload: bool,
    /// Absolute expiry time in ms; `None` while dormant.
    deadline_ms: Option<u64>,
}

impl SoftTimer {
    /// Create a dormant timer.
    pub fn new(id: TimerId, period: Duration, auto_reload: bool) -> Self {
        Self {
            id,
            period: period.max(MIN_PERIOD),
            auto_reload,
            deadline_ms: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Absolute time of the next expiry, if armed.
    pub fn next_expiry_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn start(&mut self, now_ms: u64) {
        self.arm(now_ms);
    }

    pub fn stop(&mut self) {
        self.deadline_ms = None;
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.arm(now_ms);
    }

    pub fn change_period(&mut self, period: Duration, now_ms: u64) {
        self.period = period.max(MIN_PERIOD);
        self.arm(now_ms);
    }

    /// Report an expiry due at `now_ms`.
    ///
    /// Auto-reload timers are rearmed one period from `now_ms`; one-shot
    /// timers go dormant.
    pub fn poll(&mut self, now_ms: u64) -> Option<TimerId> {
        let deadline = self.deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        self.deadline_ms = if self.auto_reload {
            Some(now_ms + period_ms(self.period))
        } else {
            None
        };
        Some(self.id)
    }

    fn arm(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms + period_ms(self.period));
    }
}

fn period_ms(period: Duration) -> u64 {
    period.as_millis() as u64
}
