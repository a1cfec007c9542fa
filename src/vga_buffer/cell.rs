// src/vga_buffer/cell.rs

//! Display cell encoding

use super::color::ColorCode;

/// One 16-bit VGA cell: character in the low byte, attribute in the high byte
///
/// `repr(transparent)` over `u16` keeps the in-memory order identical to the
/// hardware's (character byte at the lower address on little-endian x86).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct ScreenChar(u16);

impl ScreenChar {
    /// Encode `ascii` with `color`; the byte is zero-extended.
    #[inline]
    pub const fn new(ascii: u8, color: ColorCode) -> Self {
        Self((color.as_u8() as u16) << 8 | ascii as u16)
    }

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Character code (low byte)
    pub const fn ascii(self) -> u8 {
        (self.0 & 0x00ff) as u8
    }

    /// Attribute (high byte)
    pub const fn color(self) -> ColorCode {
        ColorCode::from_u8((self.0 >> 8) as u8)
    }
}
