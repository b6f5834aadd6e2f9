//! Switch monitor task.
//!
//! Two independent rules run off the switch port:
//!
//! - **Pair rule** (every poll): SW0 and SW1 both on suspends the button
//!   monitor, both off resumes it.  Mixed positions leave it alone.
//! - **Latch** (only when the raw port value changes): a three-state
//!   latch remembers the last SW3 transition and decides whether the
//!   next change on the port stops or starts the blink timer, based on
//!   SW2.
//!
//! ```text
//!   SW3 off→on            SW3 on→off
//!  ──────────▶ Stoppable ────────────▶ Startable
//!   any other change: ──▶ Standby
//!
//!  action on the following change (old latch):
//!   Stoppable ∧ SW2 off ──▶ stop
//!   Startable ∧ SW2 on  ──▶ start
//! ```
//!
//! The switch port is not debounced.

use embedded_hal::delay::DelayNs;

use crate::config::BlinkerConfig;
use crate::scheduler::{TaskGate, TaskId};

use super::commands::BlinkCommand;
use super::events::AppEvent;
use super::nibble::{LINE0, LINE1, LINE2, LINE3, Nibble};
use super::ports::{BlinkPort, EventSink, InputPort, TaskControl};

/// SW0+SW1: suspend/resume the button monitor.
pub const SW_PAIR: u8 = LINE0 | LINE1;
/// SW2: decides the latched action.
pub const SW_ACTION: u8 = LINE2;
/// SW3: its transitions set the latch.
pub const SW_LATCH: u8 = LINE3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latch {
    #[default]
    Standby,
    Stoppable,
    Startable,
}

/// Latched action for a changed port value, decided by the latch as it
/// was before this change.
pub fn latch_action(latch: Latch, current: Nibble) -> Option<BlinkCommand> {
    match latch {
        Latch::Stoppable if current.none_set(SW_ACTION) => Some(BlinkCommand::Stop),
        Latch::Startable if current.all_set(SW_ACTION) => Some(BlinkCommand::Start),
        _ => None,
    }
}

/// Next latch state from the SW3 transition between two samples.
pub fn next_latch(previous: Nibble, current: Nibble) -> Latch {
    let was_on = previous.all_set(SW_LATCH);
    let is_on = current.all_set(SW_LATCH);
    match (was_on, is_on) {
        (false, true) => Latch::Stoppable,
        (true, false) => Latch::Startable,
        _ => Latch::Standby,
    }
}

/// What the pair rule asks of the button monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairAction {
    Suspend,
    Resume,
}

pub fn pair_action(current: Nibble) -> Option<PairAction> {
    if current.all_set(SW_PAIR) {
        Some(PairAction::Suspend)
    } else if current.none_set(SW_PAIR) {
        Some(PairAction::Resume)
    } else {
        None
    }
}

pub struct SwitchMonitor<I, D, T, K, S> {
    input: I,
    delay: D,
    timer: T,
    tasks: K,
    sink: S,
    previous: Nibble,
    latch: Latch,
    poll_ms: u32,
}

impl<I, D, T, K, S> SwitchMonitor<I, D, T, K, S>
where
    I: InputPort,
    D: DelayNs,
    T: BlinkPort,
    K: TaskControl,
    S: EventSink,
{
    pub fn new(input: I, delay: D, timer: T, tasks: K, sink: S, config: &BlinkerConfig) -> Self {
        Self {
            input,
            delay,
            timer,
            tasks,
            sink,
            previous: Nibble::OFF,
            latch: Latch::Standby,
            poll_ms: config.switch_poll_ms,
        }
    }

    pub fn latch(&self) -> Latch {
        self.latch
    }

    /// One poll.  Returns the new switch value when the port changed.
    pub fn poll_once(&mut self) -> Option<Nibble> {
        let current = self.input.read();

        self.apply_pair_rule(current);

        if current == self.previous {
            return None;
        }
        self.sink.emit(&AppEvent::SwitchChanged(current));

        if let Some(cmd) = latch_action(self.latch, current) {
            self.timer.submit(cmd);
            self.sink.emit(&AppEvent::TimerCommand(cmd));
        }

        let next = next_latch(self.previous, current);
        if next != self.latch {
            self.sink.emit(&AppEvent::LatchChanged {
                from: self.latch,
                to: next,
            });
            self.latch = next;
        }

        self.previous = current;
        Some(current)
    }

    /// Task body: poll forever, parking at the gate while suspended.
    pub fn run(mut self, gate: &TaskGate) -> ! {
        loop {
            gate.checkpoint();
            self.poll_once();
            self.delay.delay_ms(self.poll_ms);
        }
    }

    fn apply_pair_rule(&mut self, current: Nibble) {
        let task = TaskId::ButtonMonitor;
        let suspended = self.tasks.is_suspended(task);
        match pair_action(current) {
            Some(PairAction::Suspend) => {
                self.tasks.suspend(task);
                if !suspended {
                    self.sink.emit(&AppEvent::TaskSuspended(task));
                }
            }
            Some(PairAction::Resume) => {
                self.tasks.resume(task);
                if suspended {
                    self.sink.emit(&AppEvent::TaskResumed(task));
                }
            }
            None => {}
        }
    }
}
