//! Inbound commands to the blink timer controller.
//!
//! Both monitor tasks talk to the [`BlinkController`](super::blink::BlinkController)
//! exclusively through these values, submitted via the
//! [`BlinkPort`](super::ports::BlinkPort).  Each command is applied
//! atomically with respect to timer expiry.

use core::time::Duration;

use super::nibble::Nibble;

/// Commands that the monitor tasks can send to the blink timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkCommand {
    /// Arm the timer; first expiry one period from now.
    Start,

    /// Disarm the timer and cancel any pending expiry.
    Stop,

    /// Restart the current period from now.
    Reset,

    /// Switch to a new period and restart the count from now.
    ChangePeriod(Duration),

    /// Stop the timer and drive every LED low, leaving the stored
    /// pattern untouched.
    Clear,

    /// Re-initialise: set `period`, drive `pattern` onto the LEDs, adopt
    /// it as the stored pattern, then start.
    Reinit { period: Duration, pattern: Nibble },
}
