//! Four-bit port value.
//!
//! Every port on the board (LEDs, buttons, switches) is four lines wide.
//! A [`Nibble`] is one immutable sample of such a port, or one LED
//! pattern.  Construction masks off anything above bit 3, so the upper
//! nibble of the backing byte is always zero.

use core::fmt;

/// Line masks shared by every 4-bit port.
pub const LINE0: u8 = 0b0001;
pub const LINE1: u8 = 0b0010;
pub const LINE2: u8 = 0b0100;
pub const LINE3: u8 = 0b1000;

/// A 4-bit port sample or LED pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nibble(u8);

impl Nibble {
    /// Mask of the active lines.
    pub const MASK: u8 = 0b1111;
    /// All four lines low.
    pub const OFF: Self = Self(0);
    /// All four lines high.
    pub const ALL: Self = Self(Self::MASK);

    /// Build from a raw register value, dropping bits above line 3.
    pub const fn new(raw: u8) -> Self {
        Self(raw & Self::MASK)
    }

    /// Raw 4-bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Bitwise complement restricted to the four active lines.
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::MASK)
    }

    /// `true` when every line in `mask` is high.
    pub const fn all_set(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    /// `true` when every line in `mask` is low.
    pub const fn none_set(self, mask: u8) -> bool {
        self.0 & mask == 0
    }

    /// Level of a single line (0..=3).
    pub const fn line(self, index: u8) -> bool {
        self.0 & (1 << (index & 0b11)) != 0
    }
}

impl From<u8> for Nibble {
    fn from(raw: u8) -> Self {
        Self::new(raw)
    }
}

impl From<Nibble> for u8 {
    fn from(n: Nibble) -> Self {
        n.0
    }
}

impl fmt::Display for Nibble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{:04b}", self.0)
    }
}

impl fmt::LowerHex for Nibble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
