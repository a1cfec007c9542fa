// src/vga_buffer/color.rs

//! Attribute byte model
//!
//! Layout of the attribute byte:
//!
//! | bits | meaning          |
//! |------|------------------|
//! | 0-3  | foreground color |
//! | 4-6  | background color |
//! | 7    | blink            |

/// VGA color codes (4-bit color palette)
#[allow(dead_code)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

impl VgaColor {
    /// Decode the low nibble of `value`
    pub const fn from_nibble(value: u8) -> Self {
        match value & 0x0f {
            0 => Self::Black,
            1 => Self::Blue,
            2 => Self::Green,
            3 => Self::Cyan,
            4 => Self::Red,
            5 => Self::Magenta,
            6 => Self::Brown,
            7 => Self::LightGray,
            8 => Self::DarkGray,
            9 => Self::LightBlue,
            10 => Self::LightGreen,
            11 => Self::LightCyan,
            12 => Self::LightRed,
            13 => Self::Pink,
            14 => Self::Yellow,
            _ => Self::White,
        }
    }
}

const BLINK_BIT: u8 = 0x80;

/// Attribute byte combining foreground and background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Create a new color code from foreground and background colors
    ///
    /// Only the low three bits of the background survive; bit 7 is blink.
    pub const fn new(fg: VgaColor, bg: VgaColor) -> Self {
        Self(((bg as u8) & 0x07) << 4 | (fg as u8))
    }

    /// Reinterpret a raw attribute byte
    pub const fn from_u8(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw byte value
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    pub const fn foreground(self) -> VgaColor {
        VgaColor::from_nibble(self.0)
    }

    pub const fn background(self) -> VgaColor {
        VgaColor::from_nibble((self.0 >> 4) & 0x07)
    }

    pub const fn blink(self) -> bool {
        self.0 & BLINK_BIT != 0
    }

    /// Default color scheme (light gray on black)
    pub const fn normal() -> Self {
        Self::new(VgaColor::LightGray, VgaColor::Black)
    }
}

/// Attribute written with every character: light gray on black, no blink
pub const DEFAULT_TEXT_ATTRIBUTE: ColorCode = ColorCode::normal();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attribute_is_0x07() {
        assert_eq!(DEFAULT_TEXT_ATTRIBUTE.as_u8(), 0x07);
        assert_eq!(DEFAULT_TEXT_ATTRIBUTE.foreground(), VgaColor::LightGray);
        assert_eq!(DEFAULT_TEXT_ATTRIBUTE.background(), VgaColor::Black);
        assert!(!DEFAULT_TEXT_ATTRIBUTE.blink());
    }

    #[test]
    fn test_color_code_encoding() {
        let color = ColorCode::new(VgaColor::White, VgaColor::Red);
        assert_eq!(color.as_u8(), 0x4F);
    }

    #[test]
    fn test_bright_background_does_not_set_blink() {
        let color = ColorCode::new(VgaColor::Black, VgaColor::White);
        assert!(!color.blink());
        assert_eq!(color.background(), VgaColor::LightGray);
    }

    #[test]
    fn test_decode_raw_attribute() {
        let color = ColorCode::from_u8(0x9E);
        assert!(color.blink());
        assert_eq!(color.foreground(), VgaColor::Yellow);
        assert_eq!(color.background(), VgaColor::Blue);
    }
}
