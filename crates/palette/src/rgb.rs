use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 24-bit RGB color value.
///
/// Value equality is the identity key for every color in the app: lookups,
/// slot guards and quiz answers all compare `Rgb` values, never names.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse a `#rrggbb` hex string. The leading `#` is optional and digits
    /// are case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, ParseRgbError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ParseRgbError::new(hex));
        }

        let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| ParseRgbError::new(hex))?;
        let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| ParseRgbError::new(hex))?;
        let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| ParseRgbError::new(hex))?;

        Ok(Rgb { r, g, b })
    }

    /// Channel-wise linear interpolation toward `end`, rounding half up.
    /// `t` is clamped to [0, 1]; 0 returns `self` and 1 returns `end`.
    pub fn lerp(&self, end: &Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: lerp_channel(self.r, end.r, t),
            g: lerp_channel(self.g, end.g, t),
            b: lerp_channel(self.b, end.b, t),
        }
    }
}

fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    // Values stay within [0, 255] because this is a convex combination,
    // so rounding half away from zero behaves as round-half-up here.
    (start as f64 * (1.0 - t) + end as f64 * t).round() as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Rgb::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError {
    input: String,
}

impl ParseRgbError {
    fn new(input: &str) -> Self {
        ParseRgbError {
            input: input.to_string(),
        }
    }
}

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color {:?}, expected #rrggbb", self.input)
    }
}

impl std::error::Error for ParseRgbError {}
