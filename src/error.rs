//! Unified error types for the blinker firmware.
//!
//! `Error` covers everything that aborts startup.  Timer expiry
//! failures are not in it: they stay local to the timer service, which
//! logs the `TimerError` and keeps running.  Both are `Copy` so they can
//! be logged and returned without allocation.

use core::fmt;

use crate::drivers::hw_init::HwInitError;
use crate::drivers::soft_timer::TimerId;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// GPIO setup failed; fatal before the scheduler starts.
    Init(HwInitError),
    /// A configuration constant is out of range.
    Config(&'static str),
    /// A task could not be created (carries the task name).
    Spawn(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Spawn(task) => write!(f, "spawn: could not create {task}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Timer errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The expiry callback was invoked for a timer it does not own.
    UnexpectedTimer { expected: TimerId, got: TimerId },
    /// A late expiry arrived after the timer was stopped.
    Dormant(TimerId),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedTimer { expected, got } => {
                write!(f, "unexpected {got} (expected {expected})")
            }
            Self::Dormant(id) => write!(f, "{id} expired while stopped"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
