//! Fuzz target: `SwitchMonitor::poll_once`
//!
//! Each input byte is one raw switch sample.  Asserts that the monitor
//! never panics, that the button monitor is suspended exactly when the
//! last sample has both pair switches on (or it was left suspended by a
//! split pair), and that only start/stop ever reach the timer.
//!
//! cargo fuzz run fuzz_switch_monitor

#![no_main]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use blinkctl::app::commands::BlinkCommand;
use blinkctl::app::events::AppEvent;
use blinkctl::app::nibble::Nibble;
use blinkctl::app::ports::{BlinkPort, EventSink, InputPort, TaskControl};
use blinkctl::app::switch::{SW_PAIR, SwitchMonitor};
use blinkctl::config::BlinkerConfig;
use blinkctl::scheduler::{TaskId, TaskTable};
use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;

struct Samples(Rc<RefCell<VecDeque<u8>>>);

impl InputPort for Samples {
    fn read(&mut self) -> Nibble {
        Nibble::new(self.0.borrow_mut().pop_front().unwrap_or(0))
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[derive(Clone, Default)]
struct Timer(Rc<RefCell<Vec<BlinkCommand>>>);

impl BlinkPort for Timer {
    fn submit(&self, cmd: BlinkCommand) {
        self.0.borrow_mut().push(cmd);
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let samples = Rc::new(RefCell::new(data.iter().copied().collect::<VecDeque<_>>()));
    let timer = Timer::default();
    let tasks = TaskTable::new();
    let mut monitor = SwitchMonitor::new(
        Samples(Rc::clone(&samples)),
        NoDelay,
        timer.clone(),
        tasks.clone(),
        Discard,
        &BlinkerConfig::default(),
    );

    let mut suspended = false;
    for &raw in data {
        monitor.poll_once();
        let n = Nibble::new(raw);
        if n.all_set(SW_PAIR) {
            suspended = true;
        } else if n.none_set(SW_PAIR) {
            suspended = false;
        }
        assert_eq!(tasks.is_suspended(TaskId::ButtonMonitor), suspended);
    }

    for cmd in timer.0.borrow().iter() {
        assert!(matches!(cmd, BlinkCommand::Start | BlinkCommand::Stop));
    }
});
