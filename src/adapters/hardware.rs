//! GPIO bank adapter: bridges a 4-pin bank to the domain port traits.
//!
//! One [`GpioPort`] per bank.  Bit `i` of the [`Nibble`] maps to
//! `pins[i]`.  This and [`hw_init`](crate::drivers::hw_init) are the
//! only places in the system that touch pin levels; off target the
//! levels come from the simulated register in `hw_init::sim`.

use crate::app::nibble::Nibble;
use crate::app::ports::{InputPort, OutputPort, PortId};
use crate::drivers::hw_init::{gpio_read, gpio_write};
use crate::pins;

/// A 4-bit port backed by four GPIO pins.
#[derive(Debug, Clone, Copy)]
pub struct GpioPort {
    id: PortId,
    pins: [i32; 4],
}

impl GpioPort {
    pub const fn new(id: PortId, pins: [i32; 4]) -> Self {
        Self { id, pins }
    }

    pub const fn leds() -> Self {
        Self::new(PortId::Leds, pins::LED_GPIOS)
    }

    pub const fn buttons() -> Self {
        Self::new(PortId::Buttons, pins::BUTTON_GPIOS)
    }

    pub const fn switches() -> Self {
        Self::new(PortId::Switches, pins::SWITCH_GPIOS)
    }

    pub fn id(&self) -> PortId {
        self.id
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for GpioPort {
    fn read(&mut self) -> Nibble {
        let bits = self
            .pins
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &pin)| if gpio_read(pin) { acc | 1 << i } else { acc });
        Nibble::new(bits)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for GpioPort {
    fn write(&mut self, value: Nibble) {
        for (i, &pin) in self.pins.iter().enumerate() {
            gpio_write(pin, value.line(i as u8));
        }
    }
}
