//! Button monitor task.
//!
//! Polls the button port, debounces it, and on every confirmed change
//! maps the pressed lines to blink timer commands:
//!
//! | Line | Command                                                    |
//! |------|------------------------------------------------------------|
//! | BTN0 | reset the period from now                                  |
//! | BTN1 | switch to the secondary (longer) period                    |
//! | BTN2 | stop and blank the LEDs                                    |
//! | BTN3 | back to the initial period and pattern, then start         |
//!
//! The checks are independent: a multi-line change fires every matching
//! command, in line order.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::config::BlinkerConfig;
use crate::scheduler::TaskGate;

use super::commands::BlinkCommand;
use super::debounce::Debouncer;
use super::events::AppEvent;
use super::nibble::{LINE0, LINE1, LINE2, LINE3, Nibble};
use super::ports::{BlinkPort, EventSink, InputPort};

pub const BTN_RESET: u8 = LINE0;
pub const BTN_SLOW: u8 = LINE1;
pub const BTN_CLEAR: u8 = LINE2;
pub const BTN_REINIT: u8 = LINE3;

/// One command per button line at most.
pub type ButtonCommands = Vec<BlinkCommand, 4>;

/// Periods and pattern the button commands refer to.
#[derive(Debug, Clone, Copy)]
pub struct ButtonProfile {
    pub initial_period: Duration,
    pub secondary_period: Duration,
    pub initial_pattern: Nibble,
}

impl From<&BlinkerConfig> for ButtonProfile {
    fn from(config: &BlinkerConfig) -> Self {
        Self {
            initial_period: config.initial_period(),
            secondary_period: config.secondary_period(),
            initial_pattern: config.initial_pattern(),
        }
    }
}

/// Commands for a confirmed button value.
pub fn commands_for(buttons: Nibble, profile: &ButtonProfile) -> ButtonCommands {
    let mut cmds = ButtonCommands::new();
    let mut issue = |cmd| {
        // Four lines, four slots: cannot overflow.
        let _ = cmds.push(cmd);
    };

    if buttons.all_set(BTN_RESET) {
        issue(BlinkCommand::Reset);
    }
    if buttons.all_set(BTN_SLOW) {
        issue(BlinkCommand::ChangePeriod(profile.secondary_period));
    }
    if buttons.all_set(BTN_CLEAR) {
        issue(BlinkCommand::Clear);
    }
    if buttons.all_set(BTN_REINIT) {
        issue(BlinkCommand::Reinit {
            period: profile.initial_period,
            pattern: profile.initial_pattern,
        });
    }
    cmds
}

pub struct ButtonMonitor<I, D, T, S> {
    input: I,
    delay: D,
    timer: T,
    sink: S,
    debouncer: Debouncer,
    profile: ButtonProfile,
    poll_ms: u32,
}

impl<I, D, T, S> ButtonMonitor<I, D, T, S>
where
    I: InputPort,
    D: DelayNs,
    T: BlinkPort,
    S: EventSink,
{
    pub fn new(input: I, delay: D, timer: T, sink: S, config: &BlinkerConfig) -> Self {
        Self {
            input,
            delay,
            timer,
            sink,
            debouncer: Debouncer::new(Nibble::OFF, config.settle_delay_ms),
            profile: ButtonProfile::from(config),
            poll_ms: config.button_poll_ms,
        }
    }

    /// One read-confirm-act pass.  Returns the confirmed button value,
    /// if the port settled on a new one.
    ///
    /// Passes `gate` again after the settle delay: if the task was
    /// suspended while waiting, nothing is confirmed or issued until it
    /// is resumed, and the confirming read then sees the port as it is.
    pub fn poll_once(&mut self, gate: &TaskGate) -> Option<Nibble> {
        let buttons = self
            .debouncer
            .poll_with(&mut self.input, &mut self.delay, || gate.checkpoint())?;
        self.sink.emit(&AppEvent::ButtonChanged(buttons));

        for cmd in commands_for(buttons, &self.profile) {
            self.timer.submit(cmd);
            self.sink.emit(&AppEvent::TimerCommand(cmd));
        }
        Some(buttons)
    }

    /// Task body: poll forever, parking at the gate while suspended.
    pub fn run(mut self, gate: &TaskGate) -> ! {
        loop {
            gate.checkpoint();
            self.poll_once(gate);
            self.delay.delay_ms(self.poll_ms);
        }
    }
}
