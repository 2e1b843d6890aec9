//! Configuration constants for Motivation Widget
//!
//! Holds the application identity, the clamp bounds applied to user input,
//! and the default state document that is merged under whatever is on disk.

use serde_json::{json, Value};
use std::path::PathBuf;

/// Application identifier following reverse-DNS convention
pub const APP_ID: &str = "com.github.MotivationWidget";

/// Human-readable application name shown in the title bar
pub const APP_NAME: &str = "Motivation Widget";

/// State file, relative to the working directory
pub const STATE_FILE: &str = "widget_state.json";

/// Default window geometry in `WxH+X+Y` form
pub const DEFAULT_GEOMETRY: &str = "600x320+100+100";

/// Resize limits for the corner grip
pub const MIN_WIDTH: u32 = 320;
pub const MAX_WIDTH: u32 = 1600;
pub const MIN_HEIGHT: u32 = 180;
pub const MAX_HEIGHT: u32 = 1200;

/// Font size limits (points)
pub const MIN_FONT_SIZE: i32 = 8;
pub const MAX_FONT_SIZE: i32 = 96;

/// Default base font size
pub const DEFAULT_FONT_SIZE: i32 = 16;

/// Step applied by the grow/shrink selection actions
pub const FONT_SIZE_STEP: i32 = 2;

/// Border thickness limits (pixels)
pub const MIN_BORDER: u32 = 0;
pub const MAX_BORDER: u32 = 16;

/// Default border thickness
pub const DEFAULT_BORDER: u32 = 2;

/// Opacity limits and slider resolution
pub const MIN_ALPHA: f64 = 0.5;
pub const MAX_ALPHA: f64 = 1.0;
pub const ALPHA_STEP: f64 = 0.05;

/// Default base font family
pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI";

/// Default colors
pub const DEFAULT_BACKGROUND: &str = "#0A1F44";
pub const DEFAULT_TEXT: &str = "#FFFFFF";
pub const DEFAULT_ACCENT: &str = "#FFD700";
pub const DEFAULT_BORDER_COLOR: &str = "#222222";

/// Color used for the title label
pub const TITLE_COLOR: &str = "#B8C1D1";

/// Swatches offered by the color picker
pub const PALETTE: &[&str] = &[
    "#FFFFFF", "#000000", "#222222", "#0A1F44", "#1E3A8A", "#2563EB", "#0EA5E9", "#14B8A6",
    "#16A34A", "#84CC16", "#FFD700", "#F59E0B", "#EA580C", "#DC2626", "#DB2777", "#9333EA",
];

/// Path of the state file
pub fn state_path() -> PathBuf {
    PathBuf::from(STATE_FILE)
}

/// Build the default state document
///
/// Every key the widget reads is present here, so merging this under a
/// loaded document always yields a complete state.
pub fn default_document() -> Value {
    json!({
        "geometry": DEFAULT_GEOMETRY,
        "always_on_top": true,
        "alpha": 1.0,
        "colors": {
            "background": DEFAULT_BACKGROUND,
            "text": DEFAULT_TEXT,
            "accent": DEFAULT_ACCENT,
            "border": DEFAULT_BORDER_COLOR
        },
        "border_thickness": DEFAULT_BORDER,
        "base_font": {
            "family": DEFAULT_FONT_FAMILY,
            "size": DEFAULT_FONT_SIZE,
            "weight": "normal",
            "slant": "roman"
        },
        "content": {
            "text": "",
            "tags": {}
        }
    })
}

/// Clamp a font size into the supported range
pub fn clamp_font_size(size: i32) -> i32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Clamp a border thickness into the supported range
pub fn clamp_border(thickness: i64) -> u32 {
    thickness.clamp(i64::from(MIN_BORDER), i64::from(MAX_BORDER)) as u32
}

/// Clamp an opacity into the supported range
pub fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        return MAX_ALPHA;
    }
    alpha.clamp(MIN_ALPHA, MAX_ALPHA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_shape() {
        let doc = default_document();
        assert_eq!(doc["geometry"], DEFAULT_GEOMETRY);
        assert_eq!(doc["always_on_top"], true);
        assert_eq!(doc["colors"]["accent"], DEFAULT_ACCENT);
        assert_eq!(doc["base_font"]["size"], 16);
        assert!(doc["content"]["tags"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_font_size(2), MIN_FONT_SIZE);
        assert_eq!(clamp_font_size(200), MAX_FONT_SIZE);
        assert_eq!(clamp_border(40), MAX_BORDER);
        assert_eq!(clamp_border(-4), MIN_BORDER);
        assert_eq!(clamp_alpha(0.3), MIN_ALPHA);
        assert_eq!(clamp_alpha(f64::NAN), MAX_ALPHA);
        assert_eq!(clamp_alpha(0.75), 0.75);
    }
}
