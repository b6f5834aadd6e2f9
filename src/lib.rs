//! Blinker firmware library.
//!
//! Exposes the coordination logic, the adapters and the task plumbing
//! for integration testing and the host simulation.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod coordinator;
pub mod scheduler;

mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;

pub use error::{Error, Result, TimerError};
