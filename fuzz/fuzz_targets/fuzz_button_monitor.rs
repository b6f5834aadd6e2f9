//! Fuzz target: `ButtonMonitor::poll_once`
//!
//! Input bytes are raw button samples.  Asserts that the debouncer only
//! ever reports a value equal to both reads of its confirmation pair and
//! that each confirmed value issues one command per pressed line.
//!
//! cargo fuzz run fuzz_button_monitor

#![no_main]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use blinkctl::app::button::ButtonMonitor;
use blinkctl::app::commands::BlinkCommand;
use blinkctl::app::events::AppEvent;
use blinkctl::app::nibble::Nibble;
use blinkctl::app::ports::{BlinkPort, EventSink, InputPort};
use blinkctl::config::BlinkerConfig;
use blinkctl::scheduler::TaskGate;
use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;

#[derive(Clone)]
struct Samples {
    queue: Rc<RefCell<VecDeque<u8>>>,
    seen: Rc<RefCell<Vec<Nibble>>>,
}

impl InputPort for Samples {
    fn read(&mut self) -> Nibble {
        let n = Nibble::new(self.queue.borrow_mut().pop_front().unwrap_or(0));
        self.seen.borrow_mut().push(n);
        n
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
    let input = Samples {
        queue: Rc::new(RefCell::new(data.iter().copied().collect())),
        seen: Rc::default(),
    };
    let timer = Timer::default();
    let mut monitor = ButtonMonitor::new(input.clone(), NoDelay, timer.clone(), Discard, &BlinkerConfig::default());
    let gate = TaskGate::new();

    while !input.queue.borrow().is_empty() {
        let before = input.seen.borrow().len();
        let issued = timer.0.borrow().len();
        if let Some(confirmed) = monitor.poll_once(&gate) {
            let seen = input.seen.borrow();
            assert_eq!(seen.len(), before + 2);
            assert_eq!(seen[before], confirmed);
            assert_eq!(seen[before + 1], confirmed);
            let added = timer.0.borrow().len() - issued;
            assert_eq!(added, confirmed.bits().count_ones() as usize);
        } else {
            assert_eq!(timer.0.borrow().len(), issued);
        }
    }
});
