//! System bring-up: wires the ports into the three tasks.
//!
//! ```text
//!   Board ─┬─ buttons ──▶ ButtonMonitor ──┐
//!          ├─ switches ─▶ SwitchMonitor ──┼─▶ Arc<BlinkController> ──▶ leds
//!          │                    │         │            ▲
//!          │                    └─ TaskTable (suspend BTN)
//!          └─ leds ─────────────────────────  timer service (tick)
//! ```
//!
//! [`launch`] validates the configuration, creates every task held at
//! the launch gate, starts the blink timer and only then releases the
//! scheduler.  Nothing observable happens before the scheduler starts.

use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::adapters::log_sink::LogEventSink;
use crate::app::blink::{BLINK_TIMER_ID, BlinkController};
use crate::app::button::ButtonMonitor;
use crate::app::commands::BlinkCommand;
use crate::app::ports::{BlinkPort, Clock, InputPort, OutputPort};
use crate::app::switch::SwitchMonitor;
use crate::config::BlinkerConfig;
use crate::drivers::hw_timer::run_timer_service;
use crate::error::Result;
use crate::scheduler::{Scheduler, TaskId, TaskTable};

/// The three 4-bit ports of the board.
pub struct Board<B, S, L> {
    pub buttons: B,
    pub switches: S,
    pub leds: L,
}

/// A running system: the tasks plus handles on the shared state.
pub struct System<L, C> {
    scheduler: Scheduler,
    blinker: Arc<BlinkController<L, C>>,
}

impl<L, C> System<L, C> {
    /// The blink timer controller shared by every task.
    pub fn blinker(&self) -> &Arc<BlinkController<L, C>> {
        &self.blinker
    }

    /// Suspend/resume handles on the running tasks.
    pub fn tasks(&self) -> TaskTable {
        self.scheduler.tasks()
    }

    /// Block on the tasks.  They never return on the board.
    pub fn join(self) {
        self.scheduler.join();
    }
}

/// Bring the system up and start the scheduler.
///
/// `delay` is cloned once per task.  Returns an error if the
/// configuration is rejected or a task cannot be created; in both cases
/// no task has been released.
pub fn launch<B, S, L, C, D>(config: BlinkerConfig, board: Board<B, S, L>, clock: C, delay: D) -> Result<System<L, C>>
where
    B: InputPort + Send + 'static,
    S: InputPort + Send + 'static,
    L: OutputPort + Send + 'static,
    C: Clock + Send + Sync + 'static,
    D: DelayNs + Clone + Send + 'static,
{
    config.validate()?;
    info!(
        "launch: period={}ms pattern={} settle={}ms",
        config.initial_period_ms,
        config.initial_pattern(),
        config.settle_delay_ms
    );

    let blinker = Arc::new(BlinkController::new(BLINK_TIMER_ID, &config, board.leds, clock));
    let mut scheduler = Scheduler::new();

    let button = ButtonMonitor::new(board.buttons, delay.clone(), Arc::clone(&blinker), LogEventSink::new(), &config);
    scheduler.spawn(TaskId::ButtonMonitor, move |gate| {
        button.run(gate);
    })?;

    let switch = SwitchMonitor::new(
        board.switches,
        delay.clone(),
        Arc::clone(&blinker),
        scheduler.tasks(),
        LogEventSink::new(),
        &config,
    );
    scheduler.spawn(TaskId::SwitchMonitor, move |gate| {
        switch.run(gate);
    })?;

    let service = Arc::clone(&blinker);
    let tick_ms = config.timer_tick_ms;
    scheduler.spawn(TaskId::TimerService, move |gate| {
        run_timer_service(&*service, delay, tick_ms, gate);
    })?;

    blinker.submit(BlinkCommand::Start);
    scheduler.start();

    Ok(System { scheduler, blinker })
}
