//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one status line per application
//! event to the ESP-IDF logger (UART / USB-CDC on the board, the
//! host logger in simulation).

use log::info;

use crate::app::commands::BlinkCommand;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ButtonChanged(value) => {
                info!("BTN | changed to {:#x}", value);
            }
            AppEvent::SwitchChanged(value) => {
                info!("SW | changed to {:#x}", value);
            }
            AppEvent::LatchChanged { from, to } => {
                info!("SW | latch {:?} -> {:?}", from, to);
            }
            AppEvent::TimerCommand(cmd) => match cmd {
                BlinkCommand::ChangePeriod(p) => {
                    info!("TIMER | period := {}ms", p.as_millis());
                }
                BlinkCommand::Reinit { period, pattern } => {
                    info!("TIMER | reinit period={}ms pattern={}", period.as_millis(), pattern);
                }
                other => info!("TIMER | {:?}", other),
            },
            AppEvent::TaskSuspended(task) => {
                info!("TASK | {} suspended", task.name());
            }
            AppEvent::TaskResumed(task) => {
                info!("TASK | {} resumed", task.name());
            }
        }
    }
}
