//! RGB colour values parsed from CSS-style hex strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a hex colour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// String did not start with `#` or `0x`.
    #[error("colour `{0}` must start with '#' or '0x'")]
    MissingPrefix(String),
    /// Wrong number of hex digits.
    #[error("colour `{0}` must have 3 or 6 hex digits")]
    BadLength(String),
    /// Non-hex digit.
    #[error("colour `{0}` contains a non-hex digit")]
    BadDigit(String),
}

/// 8-bit-per-channel RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Mid grey used for idle primitives.
    pub const GREY: Self = Self::new(0x80, 0x80, 0x80);
    /// Pure blue used for hovered primitives.
    pub const BLUE: Self = Self::new(0x00, 0x00, 0xff);
    /// White.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats in `[0, 1]`.
    pub fn to_array(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .ok_or_else(|| ColorParseError::MissingPrefix(input.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(input.to_string()));
        }

        let channel = |s: &str| u8::from_str_radix(s, 16);
        let parsed = match digits.len() {
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&digits[i..i + 1].repeat(2));
                (expand(0), expand(1), expand(2))
            }
            6 => (
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
            ),
            _ => return Err(ColorParseError::BadLength(input.to_string())),
        };

        match parsed {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            _ => Err(ColorParseError::BadDigit(input.to_string())),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!("#808080".parse::<Rgb>(), Ok(Rgb::GREY));
        assert_eq!("#0000ff".parse::<Rgb>(), Ok(Rgb::BLUE));
        assert_eq!("0xffffff".parse::<Rgb>(), Ok(Rgb::WHITE));
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!("#00f".parse::<Rgb>(), Ok(Rgb::BLUE));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            "808080".parse::<Rgb>(),
            Err(ColorParseError::MissingPrefix(_))
        ));
        assert!(matches!(
            "#8080".parse::<Rgb>(),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            "#80808g".parse::<Rgb>(),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgb::new(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }
}
