/// Packaging colors with serde support for `"#RGB"`, `"#RRGGBB"` and `"#RRGGBBAA"` strings.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a CSS-style hex color. Accepts the 3-digit shorthand that
    /// browser color inputs emit as well as 6 and 8 digit forms.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        // `from_str_radix` alone would accept a leading `+` per channel.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HexColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim()).ok_or_else(|| anyhow::anyhow!("invalid hex color: {s}"))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_colors() {
        assert_eq!(HexColor::from_hex("#8B4513"), Some(HexColor::rgb(139, 69, 19)));
        assert_eq!(HexColor::from_hex("#e74c3c"), Some(HexColor::rgb(231, 76, 60)));
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(HexColor::from_hex("#fff"), Some(HexColor::WHITE));
        assert_eq!(HexColor::from_hex("#0a0"), Some(HexColor::rgb(0, 170, 0)));
    }

    #[test]
    fn test_parse_with_alpha() {
        assert_eq!(
            HexColor::from_hex("#326EC864"),
            Some(HexColor::rgba(50, 110, 200, 100))
        );
    }

    #[test]
    fn test_to_hex_is_lowercase() {
        assert_eq!(HexColor::rgb(248, 249, 250).to_hex(), "#f8f9fa");
        assert_eq!(HexColor::rgba(0, 0, 0, 128).to_string(), "#00000080");
    }

    #[test]
    fn test_invalid_input() {
        assert!(HexColor::from_hex("").is_none());
        assert!(HexColor::from_hex("#").is_none());
        assert!(HexColor::from_hex("#GG0000").is_none());
        assert!(HexColor::from_hex("#12345").is_none());
        assert!(HexColor::from_hex("ffffff").is_none());
        assert!(HexColor::from_hex("#ééé").is_none());
    }

    #[test]
    fn test_sign_characters_rejected() {
        assert!(HexColor::from_hex("#+f+f+f").is_none());
        assert!(HexColor::from_hex("#+fff+f").is_none());
        assert!(HexColor::from_hex("#-1").is_none());
        assert!("#+f+f+f".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_from_str() {
        let c: HexColor = " #000 ".parse().unwrap();
        assert_eq!(c, HexColor::BLACK);
        assert!("red".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_default_is_white() {
        assert_eq!(HexColor::default().to_hex(), "#ffffff");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&HexColor::rgb(155, 89, 182)).unwrap();
        assert_eq!(json, "\"#9b59b6\"");
        let parsed: HexColor = serde_json::from_str("\"#9B59B6\"").unwrap();
        assert_eq!(parsed, HexColor::rgb(155, 89, 182));
        assert!(serde_json::from_str::<HexColor>("\"nope\"").is_err());
    }
}
