//! Settle-and-confirm debouncer shared by the monitor tasks.
//!
//! ```text
//!  read ──▶ same as confirmed? ──yes──▶ None (no delay)
//!             │ no
//!             ▼
//!        delay(settle) ──▶ read again ──▶ equal? ──yes──▶ Some(sample)
//!                                           │ no
//!                                           ▼
//!                                         None (noise, re-poll next turn)
//! ```
//!
//! The settle delay is the only blocking point and is only paid on the
//! iteration right after an edge.

use embedded_hal::delay::DelayNs;
use log::debug;

use super::nibble::Nibble;
use super::ports::InputPort;

/// Debounce window for one input port.
#[derive(Debug, Clone)]
pub struct Debouncer {
    confirmed: Nibble,
    settle_ms: u32,
}

impl Debouncer {
    pub fn new(initial: Nibble, settle_ms: u32) -> Self {
        Self {
            confirmed: initial,
            settle_ms,
        }
    }

    /// Last confirmed sample.
    pub fn confirmed(&self) -> Nibble {
        self.confirmed
    }

    /// Run one detection pass.
    ///
    /// Returns the new value only when it differs from the last confirmed
    /// sample and is still present after the settle delay.  A transient
    /// is dropped without retry and the confirmed sample is kept.
    pub fn poll(&mut self, input: &mut impl InputPort, delay: &mut impl DelayNs) -> Option<Nibble> {
        self.poll_with(input, delay, || {})
    }

    /// [`poll`](Self::poll) with `after_settle` run between the settle
    /// delay and the confirming read.  The button monitor parks at its
    /// task gate here, so a suspension that lands during the delay holds
    /// the confirmation until the task is resumed.
    pub fn poll_with(
        &mut self,
        input: &mut impl InputPort,
        delay: &mut impl DelayNs,
        after_settle: impl FnOnce(),
    ) -> Option<Nibble> {
        let candidate = input.read();
        if candidate == self.confirmed {
            return None;
        }

        delay.delay_ms(self.settle_ms);
        after_settle();

        let settled = input.read();
        if settled != candidate {
            debug!("debounce: {} bounced to {}, discarded", candidate, settled);
            return None;
        }

        self.confirmed = candidate;
        Some(candidate)
    }
}
