//! Hex color parsing for the `qrcolor` / `bgcolor` parameters

use std::fmt;
use std::str::FromStr;

use image::Rgba;

/// RGBA color parsed from `RRGGBB` or `RRGGBBAA` hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const BLACK: Self = Self::rgba(0x00, 0x00, 0x00, 0xff);
    pub const WHITE: Self = Self::rgba(0xff, 0xff, 0xff, 0xff);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

/// Error returned for malformed color strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected 6 or 8 hex digits")]
pub struct ParseColorError;

impl FromStr for HexColor {
    type Err = ParseColorError;

    /// Accepts an optional leading `#` (sent as `%23` in a query string).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError);
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ParseColorError);

        match digits.len() {
            6 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 0xff)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ParseColorError),
        }
    }
}

/// CSS form: `#rrggbb` when opaque, `#rrggbbaa` otherwise
impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}
