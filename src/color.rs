//! RGBA color type and hex string conversion
//!
//! Colors travel two ways in this crate: as struct values on renderers and
//! sprite pixels, and as hex strings ("#FF00FF" or shorthand "#F0F") coming
//! from UI/config layers. Both directions live here.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent (zero alpha, zero channels)
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    /// Create an opaque color
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha
    #[inline]
    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as RGBA bytes (framebuffer pixel order)
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Unpack from RGBA bytes
    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self { r: bytes[0], g: bytes[1], b: bytes[2], a: bytes[3] }
    }

    /// Parse an HTML-style hex color: "#RRGGBB", "RRGGBB", "#RGB", or "RGB".
    ///
    /// Shorthand digits expand CSS-style ("F0A" -> "FF00AA"). Alpha is always
    /// 255; the parsed value therefore always fits in [0, 0xFFFFFF].
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        match digits.len() {
            6 => {
                let value = parse_hex_digits(digits, hex)?;
                Ok(Self::new(
                    (value >> 16) as u8,
                    (value >> 8) as u8,
                    value as u8,
                ))
            }
            3 => {
                let value = parse_hex_digits(digits, hex)?;
                let r = ((value >> 8) & 0xF) as u8;
                let g = ((value >> 4) & 0xF) as u8;
                let b = (value & 0xF) as u8;
                Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            _ => Err(ColorError::InvalidHex(hex.to_string())),
        }
    }

    /// Channel-wise multiply (material tint over vertex color)
    #[inline]
    pub fn modulate(self, other: Color) -> Color {
        Color {
            r: ((self.r as u16 * other.r as u16) / 255) as u8,
            g: ((self.g as u16 * other.g as u16) / 255) as u8,
            b: ((self.b as u16 * other.b as u16) / 255) as u8,
            a: ((self.a as u16 * other.a as u16) / 255) as u8,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Error type for color parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not a valid hex color (bad digits or bad length)
    InvalidHex(String),
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::InvalidHex(s) => write!(f, "invalid hex color: {:?}", s),
        }
    }
}

impl std::error::Error for ColorError {}

fn parse_hex_digits(digits: &str, original: &str) -> Result<u32, ColorError> {
    u32::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex(original.to_string()))
}

/// Parse a hexadecimal string (with or without a leading '#') as an unsigned
/// integer. Fails on empty input or non-hex digits.
pub fn hex_to_int(hex: &str) -> Result<u32, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.is_empty() {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    parse_hex_digits(digits, hex)
}

/// Format an integer as uppercase hex, zero-padded to a minimum of 3 digits.
///
/// Values above 0xFFF emit as many digits as they need; the 3-digit width is
/// a floor, not a fixed width. `int_to_hex(255)` is "0FF",
/// `int_to_hex(0xFFFFFF)` is "FFFFFF".
pub fn int_to_hex(value: u32) -> String {
    format!("{:03X}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_int() {
        assert_eq!(hex_to_int("#FF00FF").unwrap(), 16711935);
        assert_eq!(hex_to_int("FF00FF").unwrap(), 16711935);
        assert_eq!(hex_to_int("#0").unwrap(), 0);
        assert_eq!(hex_to_int("fff").unwrap(), 0xFFF);
    }

    #[test]
    fn test_hex_to_int_rejects_garbage() {
        assert!(hex_to_int("").is_err());
        assert!(hex_to_int("#").is_err());
        assert!(hex_to_int("#GG0011").is_err());
        assert!(hex_to_int("12 34").is_err());
    }

    #[test]
    fn test_int_to_hex_padding() {
        assert_eq!(int_to_hex(255), "0FF");
        assert_eq!(int_to_hex(0), "000");
        assert_eq!(int_to_hex(0xFFF), "FFF");
    }

    #[test]
    fn test_int_to_hex_wide_values() {
        // Above 0xFFF the 3-digit floor no longer binds: the full value is
        // emitted, so the string is wider than 3 digits.
        assert_eq!(int_to_hex(0x1000), "1000");
        assert_eq!(int_to_hex(0xFFFFFF), "FFFFFF");
        assert_eq!(int_to_hex(0xFFFFFF).len(), 6);
    }

    #[test]
    fn test_hex_round_trip() {
        // Round-trips for small and large values alike; only the fixed-width
        // guarantee breaks above 0xFFF, not the value itself.
        for v in [0u32, 1, 255, 0xFFF, 0x1000, 0xABCDEF, 0xFFFFFF] {
            assert_eq!(hex_to_int(&int_to_hex(v)).unwrap(), v);
        }
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::RED);
        assert_eq!(Color::from_hex("00FF00").unwrap(), Color::GREEN);
        assert_eq!(Color::from_hex("#F0A").unwrap(), Color::new(0xFF, 0x00, 0xAA));
        assert!(Color::from_hex("#FF00").is_err());
        assert!(Color::from_hex("#ZZZZZZ").is_err());
    }

    #[test]
    fn test_modulate() {
        assert_eq!(Color::WHITE.modulate(Color::RED), Color::RED);
        assert_eq!(Color::BLACK.modulate(Color::RED), Color::BLACK);
        let half = Color::new(128, 128, 128);
        let m = half.modulate(Color::new(255, 0, 255));
        assert_eq!((m.r, m.g, m.b), (128, 0, 128));
    }
}
