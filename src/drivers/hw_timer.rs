//! Timer service task.
//!
//! The software timer has no thread of its own.  This task runs one
//! priority above the monitors, wakes every `timer_tick_ms` and lets the
//! blink controller fire any due expiry, the way the FreeRTOS timer
//! daemon dispatches software-timer callbacks.
//!
//! A rejected expiry is logged and the service keeps running.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::app::blink::BlinkController;
use crate::app::ports::{Clock, OutputPort};
use crate::scheduler::TaskGate;

/// Dispatch at most one due expiry.  Returns `true` if a blink happened.
pub fn service_once<O: OutputPort, C: Clock>(blinker: &BlinkController<O, C>) -> bool {
    match blinker.service() {
        Some(Ok(_)) => true,
        Some(Err(e)) => {
            warn!("timer service: {}", e);
            false
        }
        None => false,
    }
}

/// Task body for the timer service.
pub fn run_timer_service<O, C, D>(blinker: &BlinkController<O, C>, mut delay: D, tick_ms: u32, gate: &TaskGate) -> !
where
    O: OutputPort,
    C: Clock,
    D: DelayNs,
{
    loop {
        gate.checkpoint();
        service_once(blinker);
        delay.delay_ms(tick_ms);
    }
}
