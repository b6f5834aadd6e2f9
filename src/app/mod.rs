//! Application core: the coordination protocol, zero direct I/O.
//!
//! The blink timer controller, the two monitor tasks and the debounce
//! algorithm they share.  Hardware, timing and scheduling are reached
//! only through the **capability traits** in [`ports`], so every piece
//! here runs against mock adapters on the host.

pub mod blink;
pub mod button;
pub mod commands;
pub mod debounce;
pub mod events;
pub mod nibble;
pub mod ports;
pub mod switch;
