//! Blinker Firmware: Main Entry Point
//!
//! Hexagonal architecture: three tasks around one shared blink timer.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioPort ×3        LogEventSink    MonotonicClock   FreeRtos  │
//! │  (Input/Output)     (EventSink)     (Clock)          (DelayNs) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  ButtonMonitor · SwitchMonitor · BlinkController       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (task gates) · timer service                        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use blinkctl::adapters::hardware::GpioPort;
use blinkctl::adapters::time::MonotonicClock;
use blinkctl::config::BlinkerConfig;
use blinkctl::coordinator::{self, Board};
use blinkctl::drivers::hw_init;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  blinkctl v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise GPIO ────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        log::error!("HAL init failed: {}, halting", e);
        return Err(blinkctl::Error::from(e).into());
    }

    // ── 3. Wire the board and start the scheduler ─────────────
    let board = Board {
        buttons: GpioPort::buttons(),
        switches: GpioPort::switches(),
        leds: GpioPort::leds(),
    };
    let system = coordinator::launch(BlinkerConfig::default(), board, MonotonicClock::new(), FreeRtos)?;
    info!("System ready. Tasks running.");

    // ── 4. Park the main task ─────────────────────────────────
    system.join();
    Ok(())
}
