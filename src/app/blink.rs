//! Blink timer controller: the one piece of shared mutable state.
//!
//! Owns the software timer, the stored LED pattern and the LED port.
//! Both monitor tasks command it and the timer service delivers expiry
//! to it; all three paths run inside the same critical-section mutex, so
//! a button command can never interleave with a half-finished blink.
//!
//! ```text
//!  ButtonMonitor ──┐
//!                  ├─ submit(BlinkCommand) ──▶ ┌────────────────────┐
//!  SwitchMonitor ──┘                           │  Mutex<BlinkCore>  │──▶ LEDs
//!  timer service ──── service() / on_expire ──▶│ timer·pattern·leds │
//!                                              └────────────────────┘
//! ```
//!
//! On every expiry the stored pattern is written out, complemented and
//! the timer is reset for another period.

use core::cell::RefCell;
use core::time::Duration;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{info, warn};

use crate::config::BlinkerConfig;
use crate::drivers::soft_timer::{SoftTimer, TimerId};
use crate::error::TimerError;

use super::commands::BlinkCommand;
use super::nibble::Nibble;
use super::ports::{BlinkPort, Clock, OutputPort};

/// Id the blink timer is created with; expiries from anything else are rejected.
pub const BLINK_TIMER_ID: TimerId = TimerId(1);

/// Externally visible timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Armed,
}

/// Point-in-time view of the controller, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkSnapshot {
    pub state: TimerState,
    pub period: Duration,
    pub pattern: Nibble,
    pub next_expiry_ms: Option<u64>,
    pub blinks: u64,
}

struct BlinkCore<O> {
    timer: SoftTimer,
    pattern: Nibble,
    leds: O,
    blinks: u64,
}

pub struct BlinkController<O, C> {
    id: TimerId,
    clock: C,
    core: Mutex<CriticalSectionRawMutex, RefCell<BlinkCore<O>>>,
}

impl<O: OutputPort, C: Clock> BlinkController<O, C> {
    /// Create the controller with a dormant auto-reload timer.
    pub fn new(id: TimerId, config: &BlinkerConfig, leds: O, clock: C) -> Self {
        let core = BlinkCore {
            timer: SoftTimer::new(id, config.initial_period(), true),
            pattern: config.initial_pattern(),
            leds,
            blinks: 0,
        };
        Self {
            id,
            clock,
            core: Mutex::new(RefCell::new(core)),
        }
    }

    /// Apply one command atomically with respect to expiry.
    pub fn apply(&self, cmd: BlinkCommand) {
        self.core.lock(|core| {
            let mut core = core.borrow_mut();
            let now = self.clock.now_ms();
            match cmd {
                BlinkCommand::Start => core.timer.start(now),
                BlinkCommand::Stop => core.timer.stop(),
                BlinkCommand::Reset => core.timer.reset(now),
                BlinkCommand::ChangePeriod(period) => core.timer.change_period(period, now),
                BlinkCommand::Clear => {
                    core.timer.stop();
                    core.leds.write(Nibble::OFF);
                }
                BlinkCommand::Reinit { period, pattern } => {
                    core.timer.change_period(period, now);
                    core.leds.write(pattern);
                    core.pattern = pattern;
                    core.timer.start(now);
                }
            }
        });
    }

    /// Expiry callback for `timer`.
    ///
    /// Writes the stored pattern, stores its complement and resets the
    /// timer.  Returns the pattern that was displayed.  A foreign id, or
    /// a late callback arriving after the timer was stopped, is rejected
    /// without touching the LEDs, the pattern or the timer.
    pub fn on_expire(&self, timer: TimerId) -> Result<Nibble, TimerError> {
        self.core.lock(|core| {
            let mut core = core.borrow_mut();
            self.check_identity(timer)?;
            if !core.timer.is_armed() {
                warn!("TIMER | expiry from {} while stopped, ignored", timer);
                return Err(TimerError::Dormant(timer));
            }
            let now = self.clock.now_ms();
            Ok(Self::blink(&mut core, now))
        })
    }

    /// Fire the expiry if the timer is due.  Called from the timer service.
    ///
    /// The deadline check and the expiry share one lock, so a `Stop`
    /// submitted concurrently either lands before (nothing fires) or
    /// after (the blink completes first).
    pub fn service(&self) -> Option<Result<Nibble, TimerError>> {
        self.core.lock(|core| {
            let mut core = core.borrow_mut();
            let now = self.clock.now_ms();
            let fired = core.timer.poll(now)?;
            Some(self.check_identity(fired).map(|()| Self::blink(&mut core, now)))
        })
    }

    pub fn state(&self) -> TimerState {
        self.core.lock(|core| {
            if core.borrow().timer.is_armed() {
                TimerState::Armed
            } else {
                TimerState::Stopped
            }
        })
    }

    /// Pattern the next expiry will display.
    pub fn pattern(&self) -> Nibble {
        self.core.lock(|core| core.borrow().pattern)
    }

    pub fn snapshot(&self) -> BlinkSnapshot {
        self.core.lock(|core| {
            let core = core.borrow();
            BlinkSnapshot {
                state: if core.timer.is_armed() {
                    TimerState::Armed
                } else {
                    TimerState::Stopped
                },
                period: core.timer.period(),
                pattern: core.pattern,
                next_expiry_ms: core.timer.next_expiry_ms(),
                blinks: core.blinks,
            }
        })
    }

    fn check_identity(&self, timer: TimerId) -> Result<(), TimerError> {
        if timer != self.id {
            warn!("TIMER | expiry from {} rejected", timer);
            return Err(TimerError::UnexpectedTimer {
                expected: self.id,
                got: timer,
            });
        }
        Ok(())
    }

    fn blink(core: &mut BlinkCore<O>, now: u64) -> Nibble {
        let shown = core.pattern;
        core.leds.write(shown);
        core.pattern = shown.complement();
        core.timer.reset(now);
        core.blinks += 1;
        info!("TIMER | blink := {}", shown);
        shown
    }
}

impl<O: OutputPort, C: Clock> BlinkPort for BlinkController<O, C> {
    fn submit(&self, cmd: BlinkCommand) {
        self.apply(cmd);
    }
}
