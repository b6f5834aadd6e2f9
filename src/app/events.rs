//! Outbound application events.
//!
//! The monitor tasks emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; on the board they become the
//! line-oriented status messages on the serial console.

use crate::scheduler::TaskId;

use super::commands::BlinkCommand;
use super::nibble::Nibble;
use super::switch::Latch;

/// Structured events emitted by the monitor tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The button port settled on a new value.
    ButtonChanged(Nibble),

    /// The switch port changed (raw, not debounced).
    SwitchChanged(Nibble),

    /// The switch latch moved between states.
    LatchChanged { from: Latch, to: Latch },

    /// A command was issued to the blink timer.
    TimerCommand(BlinkCommand),

    /// Another task was suspended.
    TaskSuspended(TaskId),

    /// Another task was resumed.
    TaskResumed(TaskId),
}
