//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements              | Connects to               |
//! |------------|-------------------------|---------------------------|
//! | `hardware` | InputPort, OutputPort   | ESP32 GPIO banks          |
//! | `time`     | Clock                   | ESP32 system timer        |
//! | `delay`    | DelayNs (host)          | `std::thread::sleep`      |
//! | `log_sink` | EventSink               | Serial log output         |

pub mod delay;
pub mod hardware;
pub mod log_sink;
pub mod time;
