//! System configuration parameters
//!
//! The blinker runs on fixed constants; this struct gathers them in one
//! place so the coordinator can validate them before any task starts.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::nibble::Nibble;
use crate::error::{Error, Result};

/// Core blinker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkerConfig {
    // --- Debounce ---
    /// Wait between the first and confirming button read (milliseconds)
    pub settle_delay_ms: u32,

    // --- Blink timer ---
    /// Period the timer starts with and returns to on re-init (milliseconds)
    pub initial_period_ms: u32,
    /// Longer period selected from the buttons (milliseconds)
    pub secondary_period_ms: u32,
    /// LED pattern shown on the first expiry and after re-init
    pub initial_pattern: u8,

    // --- Task pacing ---
    /// Button task sleep between polls (milliseconds)
    pub button_poll_ms: u32,
    /// Switch task sleep between polls (milliseconds)
    pub switch_poll_ms: u32,
    /// Timer service resolution (milliseconds)
    pub timer_tick_ms: u32,
}

impl Default for BlinkerConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 250,

            initial_period_ms: 5_000,
            secondary_period_ms: 10_000,
            initial_pattern: 0b1100,

            button_poll_ms: 10,
            switch_poll_ms: 10,
            timer_tick_ms: 10,
        }
    }
}

impl BlinkerConfig {
    /// Reject constants the timer and tasks cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.settle_delay_ms == 0 {
            return Err(Error::Config("settle_delay_ms must be non-zero"));
        }
        if self.initial_period_ms == 0 {
            return Err(Error::Config("initial_period_ms must be non-zero"));
        }
        if self.secondary_period_ms <= self.initial_period_ms {
            return Err(Error::Config("secondary_period_ms must exceed initial_period_ms"));
        }
        if self.initial_pattern > Nibble::MASK {
            return Err(Error::Config("initial_pattern wider than 4 bits"));
        }
        if self.timer_tick_ms == 0 || self.timer_tick_ms >= self.initial_period_ms {
            return Err(Error::Config("timer_tick_ms must be non-zero and below initial_period_ms"));
        }
        Ok(())
    }

    pub fn initial_period(&self) -> Duration {
        Duration::from_millis(self.initial_period_ms as u64)
    }

    pub fn secondary_period(&self) -> Duration {
        Duration::from_millis(self.secondary_period_ms as u64)
    }

    pub fn initial_pattern(&self) -> Nibble {
        Nibble::new(self.initial_pattern)
    }
}
