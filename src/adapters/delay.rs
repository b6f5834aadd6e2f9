//! Blocking delay adapter for host builds.
//!
//! On the board the tasks use `esp_idf_hal::delay::FreeRtos`, which
//! yields to the RTOS tick.  Off target the same `DelayNs` contract is
//! met by sleeping the calling thread.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// `DelayNs` backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
