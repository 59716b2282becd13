//! 8-bit RGBA color with fixed-point blending helpers.
//!
//! Colors travel through configuration as `#RRGGBB` (or `#RRGGBBAA`) strings;
//! `Rgba8` parses and prints that form and serializes through it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::basics::CoverType;
use crate::error::PuzzleError;

/// Non-premultiplied RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_MASK: u32 = (1 << Self::BASE_SHIFT) - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::opaque(0, 0, 0);
    /// Alert color used to mark the answer cell.
    pub const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == Self::BASE_MASK as u8
    }

    /// Fixed-point multiply, exact over u8: `a * b / 255` with rounding.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Scale an alpha value by a pixel coverage.
    #[inline]
    pub fn mult_cover(a: u8, cover: CoverType) -> u8 {
        Self::multiply(a, cover)
    }

    /// Interpolate from `p` toward `q` by `a` (0..=255).
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }

    /// Hex form, `#RRGGBB` for opaque colors and `#RRGGBBAA` otherwise.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba8 {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PuzzleError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = PuzzleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_hex()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_bounds() {
        assert_eq!(Rgba8::multiply(255, 255), 255);
        assert_eq!(Rgba8::multiply(255, 0), 0);
        assert_eq!(Rgba8::multiply(128, 255), 128);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgba8::lerp(10, 200, 0), 10);
        assert_eq!(Rgba8::lerp(10, 200, 255), 200);
        assert_eq!(Rgba8::lerp(200, 10, 255), 10);
        let mid = Rgba8::lerp(0, 255, 128);
        assert!((127..=129).contains(&mid));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#334488".parse::<Rgba8>().unwrap(), Rgba8::opaque(0x33, 0x44, 0x88));
        assert_eq!("#ffd700".parse::<Rgba8>().unwrap(), Rgba8::opaque(0xFF, 0xD7, 0x00));
        assert_eq!(
            "#11223344".parse::<Rgba8>().unwrap(),
            Rgba8::new(0x11, 0x22, 0x33, 0x44)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in ["334488", "#3344", "#GG4488", "#33448", "#한국어"] {
            assert!(s.parse::<Rgba8>().is_err(), "accepted {s}");
        }
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgba8::RED.to_string(), "#FF0000");
        assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Rgba8::opaque(0x33, 0x44, 0x88)).unwrap();
        assert_eq!(json, "\"#334488\"");
        let back: Rgba8 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba8::opaque(0x33, 0x44, 0x88));
        assert!(serde_json::from_str::<Rgba8>("\"red\"").is_err());
    }
}
