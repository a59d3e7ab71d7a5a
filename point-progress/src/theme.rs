//! Colors and the default dark palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 8-bit RGBA color. Serialized as `"#RRGGBB"` or `"#RRGGBBAA"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {input:?}: expected #RRGGBB or #RRGGBBAA")]
pub struct ColorParseError {
    pub input: String,
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError { input: s.to_string() };
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// Background
pub const BG: Color = Color::rgb(0x0D, 0x11, 0x17);
pub const SURFACE: Color = Color::rgb(0x16, 0x1B, 0x22);
pub const CARD_BORDER: Color = Color::rgb(0x30, 0x36, 0x3D);

// Text
pub const TEXT_PRIMARY: Color = Color::rgb(0xE6, 0xED, 0xF3);

// Accents
pub const ACCENT_BLUE: Color = Color::rgb(0x58, 0xA6, 0xFF);

// Inactive points and segments
pub const INACTIVE: Color = CARD_BORDER;
// Completed points and segments
pub const ACTIVE: Color = ACCENT_BLUE;
