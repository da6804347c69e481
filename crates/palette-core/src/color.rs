//! Cell color values.
//!
//! Colors are stored as packed 8-bit RGB and exchanged as lowercase `#rrggbb`
//! hex strings (the form presets, config files and frontends use).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color string is empty")]
    /// The input was empty (or only a `#`).
    Empty,

    #[error("invalid hex color length {0} (expected 3 or 6 digits)")]
    /// The input did not have 3 or 6 hex digits.
    InvalidLength(usize),

    #[error("invalid hex digit in color '{0}'")]
    /// The input contained a non-hex character.
    InvalidDigit(String),
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// `#ffffff`, the default background of every grid.
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// `#000000`, the default paint color.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Build a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `#rgb`, or the same without the leading `#`.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        if digits.is_empty() {
            return Err(ColorError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(input.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidDigit(input.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // `#abc` expands to `#aabbcc`.
                let expand = |s: &str| channel(s).map(|v| v * 0x11);
                Ok(Self::rgb(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            other => Err(ColorError::InvalidLength(other)),
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
