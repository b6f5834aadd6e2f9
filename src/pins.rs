//! GPIO pin assignments for the blinker board.
//!
//! Single source of truth; every adapter references this module rather
//! than hard-coding pin numbers.  Index `i` of each bank carries bit `i`
//! of the corresponding 4-bit port.

// ---------------------------------------------------------------------------
// LEDs (active HIGH, 330 Ω series)
// ---------------------------------------------------------------------------

pub const LED_GPIOS: [i32; 4] = [1, 2, 3, 4];

// ---------------------------------------------------------------------------
// Push buttons (active HIGH, internal pull-down)
// ---------------------------------------------------------------------------

pub const BUTTON_GPIOS: [i32; 4] = [5, 6, 7, 8];

// ---------------------------------------------------------------------------
// Slide switches (active HIGH, internal pull-down)
// ---------------------------------------------------------------------------

pub const SWITCH_GPIOS: [i32; 4] = [9, 10, 11, 12];
