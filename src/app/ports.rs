//! Port traits: the boundary between the coordination logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ monitors / blink controller
//! ```
//!
//! Driven adapters (GPIO banks, clocks, the scheduler, log output)
//! implement these traits.  The monitor tasks and the
//! [`BlinkController`](super::blink::BlinkController) consume them via
//! generics, so the core never touches registers or threads directly.

use std::sync::Arc;

use crate::scheduler::TaskId;

use super::commands::BlinkCommand;
use super::events::AppEvent;
use super::nibble::Nibble;

// ───────────────────────────────────────────────────────────────
// Port identity
// ───────────────────────────────────────────────────────────────

/// The three 4-bit ports on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortId {
    /// LED bank (output).
    Leds,
    /// Push buttons (input).
    Buttons,
    /// Slide switches (input).
    Switches,
}

// ───────────────────────────────────────────────────────────────
// Digital I/O (hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Read side of one 4-bit port.
pub trait InputPort {
    /// Sample all four lines at once.
    fn read(&mut self) -> Nibble;
}

/// Write side of one 4-bit port.
pub trait OutputPort {
    /// Drive all four lines at once.
    fn write(&mut self, value: Nibble);
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock used to schedule timer expiry.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Blink timer (monitor tasks → controller)
// ───────────────────────────────────────────────────────────────

/// Command surface of the blink timer controller.
///
/// Takes `&self`: implementations are shared between tasks and must
/// serialize commands against timer expiry themselves.
pub trait BlinkPort {
    fn submit(&self, cmd: BlinkCommand);
}

impl<T: BlinkPort + ?Sized> BlinkPort for Arc<T> {
    fn submit(&self, cmd: BlinkCommand) {
        (**self).submit(cmd);
    }
}

// ───────────────────────────────────────────────────────────────
// Scheduler (task suspension)
// ───────────────────────────────────────────────────────────────

/// Suspend/resume control over the other tasks in the topology.
pub trait TaskControl {
    fn suspend(&self, task: TaskId);

    fn resume(&self, task: TaskId);

    /// Current suspension flag as the scheduler sees it.
    fn is_suspended(&self, task: TaskId) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The monitors emit structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
