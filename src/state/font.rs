//! Font descriptors
//!
//! `BaseFont` is the persisted base typeface. `FontSpec` is the full font
//! configuration stored on a formatting tag, which additionally carries the
//! underline and overstrike flags as 0/1 integers.

use crate::config::{clamp_font_size, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    #[default]
    Roman,
    Italic,
}

fn default_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

fn default_size() -> i32 {
    DEFAULT_FONT_SIZE
}

/// Base font applied to untagged text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFont {
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default = "default_size")]
    pub size: i32,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub slant: FontSlant,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BaseFont {
    fn default() -> Self {
        Self {
            family: default_family(),
            size: default_size(),
            weight: FontWeight::Normal,
            slant: FontSlant::Roman,
            extra: Map::new(),
        }
    }
}

impl BaseFont {
    /// Full font configuration derived from this base font
    pub fn to_spec(&self) -> FontSpec {
        FontSpec {
            family: self.family.clone(),
            size: self.size,
            weight: self.weight,
            slant: self.slant,
            underline: false,
            overstrike: false,
        }
    }

    /// Point size suitable for display; negative sizes are pixel sizes
    pub fn display_size(&self) -> u16 {
        clamp_font_size(self.size.abs()) as u16
    }
}

/// Font configuration of a formatting tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    #[serde(default = "default_family")]
    pub family: String,
    #[serde(default = "default_size")]
    pub size: i32,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub slant: FontSlant,
    #[serde(default, with = "flag")]
    pub underline: bool,
    #[serde(default, with = "flag")]
    pub overstrike: bool,
}

impl FontSpec {
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }
}

/// Booleans persisted as 0/1, read from either integers or booleans
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_font_spec_flags_as_integers() {
        let spec = BaseFont::default().to_spec().bold();
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({
                "family": "Segoe UI",
                "size": 16,
                "weight": "bold",
                "slant": "roman",
                "underline": 0,
                "overstrike": 0
            })
        );
    }

    #[test]
    fn test_font_spec_lenient_read() {
        let spec: FontSpec =
            serde_json::from_value(json!({"size": 20, "underline": true})).unwrap();
        assert_eq!(spec.family, "Segoe UI");
        assert_eq!(spec.size, 20);
        assert!(spec.underline);
        assert!(!spec.overstrike);
    }

    #[test]
    fn test_display_size_handles_pixel_sizes() {
        let font = BaseFont {
            size: -14,
            ..BaseFont::default()
        };
        assert_eq!(font.display_size(), 14);
    }
}
