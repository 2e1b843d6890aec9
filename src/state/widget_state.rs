//! Typed view of the persisted widget document
//!
//! `WidgetState` is built from a document that already has the defaults
//! merged in. Values are taken as they are on disk; clamping happens at
//! input and display time only. A value of the wrong JSON type falls back
//! to the default for that field alone. Keys the widget does not know are
//! carried through untouched.

use super::font::BaseFont;
use super::geometry::Geometry;
use crate::config::{self, clamp_alpha, clamp_border};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Panel colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub border: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: config::DEFAULT_BACKGROUND.to_string(),
            text: config::DEFAULT_TEXT.to_string(),
            accent: config::DEFAULT_ACCENT.to_string(),
            border: config::DEFAULT_BORDER_COLOR.to_string(),
            extra: Map::new(),
        }
    }
}

/// Color channel selectable from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    Background,
    Text,
    Accent,
    Border,
}

impl ColorChannel {
    pub const ALL: [ColorChannel; 4] = [
        ColorChannel::Background,
        ColorChannel::Text,
        ColorChannel::Accent,
        ColorChannel::Border,
    ];

    /// Toolbar label
    pub fn label(self) -> &'static str {
        match self {
            ColorChannel::Background => "BG",
            ColorChannel::Text => "Text",
            ColorChannel::Accent => "Caret",
            ColorChannel::Border => "Border",
        }
    }
}

impl Colors {
    pub fn get(&self, channel: ColorChannel) -> &str {
        match channel {
            ColorChannel::Background => &self.background,
            ColorChannel::Text => &self.text,
            ColorChannel::Accent => &self.accent,
            ColorChannel::Border => &self.border,
        }
    }

    pub fn set(&mut self, channel: ColorChannel, color: String) {
        match channel {
            ColorChannel::Background => self.background = color,
            ColorChannel::Text => self.text = color,
            ColorChannel::Accent => self.accent = color,
            ColorChannel::Border => self.border = color,
        }
    }
}

/// Text content with its formatting tags in persisted form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    pub tags: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The whole widget state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetState {
    #[serde(with = "geometry_string")]
    pub geometry: Geometry,
    pub always_on_top: bool,
    pub alpha: f64,
    pub colors: Colors,
    pub border_thickness: Number,
    pub base_font: BaseFont,
    pub content: Content,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const KNOWN_KEYS: &[&str] = &[
    "geometry",
    "always_on_top",
    "alpha",
    "colors",
    "border_thickness",
    "base_font",
    "content",
];

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            geometry: default_geometry(),
            always_on_top: true,
            alpha: 1.0,
            colors: Colors::default(),
            border_thickness: Number::from(config::DEFAULT_BORDER),
            base_font: BaseFont::default(),
            content: Content::default(),
            extra: Map::new(),
        }
    }
}

fn default_geometry() -> Geometry {
    Geometry::new(600, 320, 100, 100)
}

/// Read one field, keeping the fallback when it is absent or mistyped
fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str, fallback: T) -> T {
    match obj.get(key) {
        None => fallback,
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Ignoring invalid value for {:?}: {}", key, e);
                fallback
            }
        },
    }
}

fn extra_keys(obj: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !known.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn as_object(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

impl Colors {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let d = Colors::default();
        Self {
            background: field(obj, "background", d.background),
            text: field(obj, "text", d.text),
            accent: field(obj, "accent", d.accent),
            border: field(obj, "border", d.border),
            extra: extra_keys(obj, &["background", "text", "accent", "border"]),
        }
    }
}

impl BaseFont {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let d = BaseFont::default();
        Self {
            family: field(obj, "family", d.family),
            size: field(obj, "size", d.size),
            weight: field(obj, "weight", d.weight),
            slant: field(obj, "slant", d.slant),
            extra: extra_keys(obj, &["family", "size", "weight", "slant"]),
        }
    }
}

impl Content {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            text: field(obj, "text", String::new()),
            tags: field(obj, "tags", Map::new()),
            extra: extra_keys(obj, &["text", "tags"]),
        }
    }
}

impl WidgetState {
    /// Build the typed state from a (default-merged) document
    pub fn from_document(doc: &Value) -> Self {
        let empty = Map::new();
        let obj = doc.as_object().unwrap_or(&empty);
        let d = WidgetState::default();

        let geometry = match obj.get("geometry").and_then(Value::as_str) {
            Some(s) => s.parse().unwrap_or_else(|e| {
                log::warn!("{}; using default geometry", e);
                d.geometry
            }),
            None => d.geometry,
        };

        Self {
            geometry,
            always_on_top: field(obj, "always_on_top", d.always_on_top),
            alpha: field(obj, "alpha", d.alpha),
            colors: Colors::from_object(&as_object(obj.get("colors"))),
            border_thickness: field(obj, "border_thickness", d.border_thickness),
            base_font: BaseFont::from_object(&as_object(obj.get("base_font"))),
            content: Content::from_object(&as_object(obj.get("content"))),
            extra: extra_keys(obj, KNOWN_KEYS),
        }
    }

    /// Serialize back into a document
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            log::error!("Could not serialize widget state: {}", e);
            Value::Object(Map::new())
        })
    }

    /// Opacity as displayed; the stored value is left alone
    pub fn display_alpha(&self) -> f64 {
        clamp_alpha(self.alpha)
    }

    /// Border thickness as displayed, rounded to whole pixels
    pub fn display_border(&self) -> u32 {
        let thickness = self.border_thickness.as_f64().unwrap_or_default();
        clamp_border(thickness.round() as i64)
    }

    /// Set the border thickness from user input
    pub fn set_border(&mut self, thickness: u32) {
        self.border_thickness = Number::from(clamp_border(i64::from(thickness)));
    }
}

mod geometry_string {
    use super::Geometry;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(geometry: &Geometry, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_document;
    use serde_json::json;

    #[test]
    fn test_defaults_match_default_document() {
        let state = WidgetState::from_document(&default_document());
        assert_eq!(state, WidgetState::default());
        assert_eq!(state.to_document(), default_document());
    }

    #[test]
    fn test_out_of_range_values_are_preserved() {
        let mut doc = default_document();
        doc["alpha"] = json!(0.3);
        doc["border_thickness"] = json!(40);

        let state = WidgetState::from_document(&doc);
        assert_eq!(state.alpha, 0.3);
        assert_eq!(state.display_alpha(), 0.5);
        assert_eq!(state.border_thickness, Number::from(40));
        assert_eq!(state.display_border(), 16);
        assert_eq!(state.to_document()["alpha"], json!(0.3));
    }

    #[test]
    fn test_odd_border_thickness_is_kept() {
        let mut doc = default_document();
        doc["border_thickness"] = json!(-3);
        let state = WidgetState::from_document(&doc);
        assert_eq!(state.display_border(), 0);
        assert_eq!(state.to_document()["border_thickness"], json!(-3));

        doc["border_thickness"] = json!(2.6);
        let mut state = WidgetState::from_document(&doc);
        assert_eq!(state.display_border(), 3);
        assert_eq!(state.to_document()["border_thickness"], json!(2.6));

        state.set_border(30);
        assert_eq!(state.to_document()["border_thickness"], json!(16));
    }

    #[test]
    fn test_mistyped_field_falls_back_alone() {
        let mut doc = default_document();
        doc["alpha"] = json!("opaque");
        doc["colors"]["text"] = json!(42);
        doc["colors"]["border"] = json!("#123456");

        let state = WidgetState::from_document(&doc);
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.colors.text, config::DEFAULT_TEXT);
        assert_eq!(state.colors.border, "#123456");
    }

    #[test]
    fn test_unknown_keys_survive() {
        let mut doc = default_document();
        doc["schema_note"] = json!("kept");
        doc["colors"]["selection"] = json!("#00ff00");
        doc["base_font"]["underline"] = json!(1);
        doc["content"]["cursor"] = json!("1.4");

        let state = WidgetState::from_document(&doc);
        let out = state.to_document();
        assert_eq!(out["schema_note"], "kept");
        assert_eq!(out["colors"]["selection"], "#00ff00");
        assert_eq!(out["base_font"]["underline"], json!(1));
        assert_eq!(out["base_font"]["family"], "Segoe UI");
        assert_eq!(out["content"]["cursor"], "1.4");
    }

    #[test]
    fn test_bad_geometry_uses_default() {
        let mut doc = default_document();
        doc["geometry"] = json!("huge");
        let state = WidgetState::from_document(&doc);
        assert_eq!(state.geometry, default_geometry());
    }

    #[test]
    fn test_color_channels() {
        let mut colors = Colors::default();
        colors.set(ColorChannel::Accent, "#ff0000".to_string());
        assert_eq!(colors.get(ColorChannel::Accent), "#ff0000");
        assert_eq!(ColorChannel::Accent.label(), "Caret");
    }
}
