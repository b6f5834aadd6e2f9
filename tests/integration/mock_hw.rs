//! Mock board adapters for integration tests.
//!
//! Every mock is a cheap handle on shared state: the test keeps one clone
//! for scripting and assertions and hands the other to the code under
//! test.  Nothing here touches real (or simulated) GPIO.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use blinkctl::app::commands::BlinkCommand;
use blinkctl::app::events::AppEvent;
use blinkctl::app::nibble::Nibble;
use blinkctl::app::ports::{BlinkPort, Clock, EventSink, InputPort, OutputPort};
use embedded_hal::delay::DelayNs;

// ── ScriptedInput ─────────────────────────────────────────────

#[derive(Default)]
struct InputState {
    script: VecDeque<Nibble>,
    level: Nibble,
    reads: usize,
}

/// Input port that replays scripted samples, then holds its level.
#[derive(Clone, Default)]
pub struct ScriptedInput {
    state: Arc<Mutex<InputState>>,
}

#[allow(dead_code)]
impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value returned once the script is exhausted.
    pub fn hold(&self, bits: u8) {
        self.state.lock().unwrap().level = Nibble::new(bits);
    }

    /// Queue samples returned one per read, ahead of the held level.
    pub fn script(&self, samples: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.script.extend(samples.iter().map(|&b| Nibble::new(b)));
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }
}

impl InputPort for ScriptedInput {
    fn read(&mut self) -> Nibble {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;
        match state.script.pop_front() {
            Some(sample) => sample,
            None => state.level,
        }
    }
}

// ── RecordingLeds ─────────────────────────────────────────────

/// Output port that records every write.
#[derive(Clone, Default)]
pub struct RecordingLeds {
    writes: Arc<Mutex<Vec<Nibble>>>,
}

#[allow(dead_code)]
impl RecordingLeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<Nibble> {
        self.writes.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Nibble> {
        self.writes.lock().unwrap().last().copied()
    }

    pub fn count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl OutputPort for RecordingLeds {
    fn write(&mut self, value: Nibble) {
        self.writes.lock().unwrap().push(value);
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock that only moves when the test says so.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// ── TickingClock ──────────────────────────────────────────────

/// Clock that moves forward by one millisecond on every read, so no two
/// reads ever see the same time.
#[derive(Clone, Default)]
pub struct TickingClock {
    now: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl TickingClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for TickingClock {
    fn now_ms(&self) -> u64 {
        self.now.fetch_add(1, Ordering::SeqCst) + 1
    }
}

// ── RecordingDelay ────────────────────────────────────────────

/// Delay that returns immediately and records the requested waits (ms).
#[derive(Clone, Default)]
pub struct RecordingDelay {
    waits: Arc<Mutex<Vec<u32>>>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> Vec<u32> {
        self.waits.lock().unwrap().clone()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits.lock().unwrap().push(ns.div_ceil(1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits.lock().unwrap().push(ms);
    }
}

// ── RecordingTimer ────────────────────────────────────────────

/// Blink port that records submitted commands instead of running a timer.
#[derive(Clone, Default)]
pub struct RecordingTimer {
    commands: Arc<Mutex<Vec<BlinkCommand>>>,
}

#[allow(dead_code)]
impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<BlinkCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.commands.lock().unwrap().clear();
    }
}

impl BlinkPort for RecordingTimer {
    fn submit(&self, cmd: BlinkCommand) {
        self.commands.lock().unwrap().push(cmd);
    }
}

// ── CollectSink ───────────────────────────────────────────────

/// Event sink that keeps every event.
#[derive(Clone, Default)]
pub struct CollectSink {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

#[allow(dead_code)]
impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventSink for CollectSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
