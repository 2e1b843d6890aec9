//! Color strings
//!
//! Colors are stored in the state document exactly as they were chosen.
//! Parsing only happens when a color is rendered.

use std::fmt;
use std::str::FromStr;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("white", Rgb::new(0xFF, 0xFF, 0xFF)),
    ("red", Rgb::new(0xFF, 0x00, 0x00)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("blue", Rgb::new(0x00, 0x00, 0xFF)),
    ("yellow", Rgb::new(0xFF, 0xFF, 0x00)),
    ("gold", Rgb::new(0xFF, 0xD7, 0x00)),
    ("navy", Rgb::new(0x00, 0x00, 0x80)),
    ("gray", Rgb::new(0xBE, 0xBE, 0xBE)),
    ("grey", Rgb::new(0xBE, 0xBE, 0xBE)),
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a color string, falling back when it cannot be understood
    pub fn parse_or(value: &str, fallback: Rgb) -> Rgb {
        value.parse().unwrap_or(fallback)
    }
}

fn hex_channel(digits: &str) -> Option<u8> {
    let v = u16::from_str_radix(digits, 16).ok()?;
    // Scale 1-, 2- and 4-digit channels to 8 bits
    Some(match digits.len() {
        1 => (v * 17) as u8,
        2 => v as u8,
        4 => (v >> 8) as u8,
        _ => return None,
    })
}

impl FromStr for Rgb {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(());
            }
            let width = match hex.len() {
                3 => 1,
                6 => 2,
                12 => 4,
                _ => return Err(()),
            };
            let channel = |i: usize| hex_channel(&hex[i * width..(i + 1) * width]).ok_or(());
            return Ok(Rgb::new(channel(0)?, channel(1)?, channel(2)?));
        }

        let lower = s.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| *rgb)
            .ok_or(())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#0A1F44".parse::<Rgb>(), Ok(Rgb::new(0x0A, 0x1F, 0x44)));
        assert_eq!("#fff".parse::<Rgb>(), Ok(Rgb::new(255, 255, 255)));
        assert_eq!("#ffff00000000".parse::<Rgb>(), Ok(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!("Gold".parse::<Rgb>(), Ok(Rgb::new(0xFF, 0xD7, 0x00)));
    }

    #[test]
    fn test_parse_invalid_falls_back() {
        let fallback = Rgb::new(1, 2, 3);
        assert_eq!(Rgb::parse_or("#12", fallback), fallback);
        assert_eq!(Rgb::parse_or("#gggggg", fallback), fallback);
        assert_eq!(Rgb::parse_or("chartreuse-ish", fallback), fallback);
    }

    #[test]
    fn test_to_hex_lowercase() {
        assert_eq!(Rgb::new(0xFF, 0xD7, 0x00).to_hex(), "#ffd700");
    }
}
