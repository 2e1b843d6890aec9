//! The widget document and the edits the UI makes to it
//!
//! `WidgetModel` owns the persisted state, the rich text and the store they
//! are saved to. Each operation reports whether it changed anything, and
//! every change ends with a full save. A failed save is returned to the
//! caller; the in-memory state keeps the change either way.

use crate::config::{clamp_alpha, clamp_font_size, ALPHA_STEP};
use crate::editor::{RichText, Span, StyleAction};
use crate::error::StoreResult;
use crate::state::{ColorChannel, Geometry, Rgb, WidgetState};
use crate::store::StateStore;

/// Opacity snapped to the slider step
pub fn snap_alpha(alpha: f64) -> f64 {
    let snapped = (alpha / ALPHA_STEP).round() * ALPHA_STEP;
    clamp_alpha((snapped * 100.0).round() / 100.0)
}

/// Persisted widget state with its store
#[derive(Debug, Clone)]
pub struct WidgetModel {
    store: StateStore,
    state: WidgetState,
    rich: RichText,
}

impl WidgetModel {
    pub fn new(store: StateStore, state: WidgetState) -> Self {
        let rich = RichText::from_content(&state.content);
        Self { store, state, rich }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn rich(&self) -> &RichText {
        &self.rich
    }

    /// Write text and tags into the state and save the whole document
    pub fn save(&mut self) -> StoreResult<()> {
        self.rich.write_to(&mut self.state.content);
        self.store.save_state(&self.state)
    }

    fn save_if(&mut self, changed: bool) -> StoreResult<bool> {
        if changed {
            self.save()?;
        }
        Ok(changed)
    }

    /// Take the text reported by the editor, moving formatting along
    pub fn edit_text(&mut self, text: &str) -> StoreResult<bool> {
        let changed = self.rich.set_text(text);
        self.save_if(changed)
    }

    /// Format the selection; no selection or an empty one changes nothing
    pub fn apply_style(&mut self, action: &StyleAction, selection: Option<Span>) -> StoreResult<bool> {
        let applied = match selection {
            Some(span) => self.rich.apply(action, span, &self.state.base_font).is_some(),
            None => {
                log::debug!("No selection for {:?}", action);
                false
            }
        };
        self.save_if(applied)
    }

    /// Set a widget color; unreadable colors are ignored
    pub fn set_color(&mut self, channel: ColorChannel, value: &str) -> StoreResult<bool> {
        let Ok(rgb) = value.parse::<Rgb>() else {
            log::debug!("Ignoring unreadable color {:?}", value);
            return Ok(false);
        };
        self.state.colors.set(channel, rgb.to_hex());
        self.save_if(true)
    }

    pub fn set_border(&mut self, thickness: u32) -> StoreResult<bool> {
        self.state.set_border(thickness);
        self.save_if(true)
    }

    pub fn set_alpha(&mut self, alpha: f64) -> StoreResult<bool> {
        let alpha = snap_alpha(alpha);
        let changed = alpha != self.state.alpha;
        self.state.alpha = alpha;
        self.save_if(changed)
    }

    pub fn set_family(&mut self, family: String) -> StoreResult<bool> {
        log::info!("Base font family set to {:?}", family);
        self.state.base_font.family = family;
        self.save_if(true)
    }

    pub fn set_font_size(&mut self, size: i32) -> StoreResult<bool> {
        let size = clamp_font_size(size);
        let changed = size != self.state.base_font.size;
        self.state.base_font.size = size;
        self.save_if(changed)
    }

    pub fn toggle_pin(&mut self) -> StoreResult<bool> {
        self.state.always_on_top = !self.state.always_on_top;
        self.save_if(true)
    }

    /// Window moved by the system
    pub fn move_to(&mut self, x: i32, y: i32) -> StoreResult<bool> {
        let geometry = self.state.geometry.moved_to(x, y);
        let changed = geometry != self.state.geometry;
        self.state.geometry = geometry;
        self.save_if(changed)
    }

    /// Window resized by the system
    pub fn resize_to(&mut self, width: f32, height: f32) -> StoreResult<bool> {
        let geometry = Geometry {
            width: width.round().max(0.0) as u32,
            height: height.round().max(0.0) as u32,
            ..self.state.geometry
        };
        let changed = geometry != self.state.geometry;
        self.state.geometry = geometry;
        self.save_if(changed)
    }

    /// Geometry during a grip drag; saved once the drag ends
    pub fn preview_geometry(&mut self, geometry: Geometry) -> bool {
        let changed = geometry != self.state.geometry;
        self.state.geometry = geometry;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ResizeDrag;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn model_with_text(dir: &TempDir, text: &str) -> WidgetModel {
        let store = StateStore::new(dir.path().join("widget_state.json"));
        let mut state = WidgetState::default();
        state.content.text = text.to_string();
        WidgetModel::new(store, state)
    }

    fn saved(dir: &TempDir) -> Value {
        let raw = std::fs::read_to_string(dir.path().join("widget_state.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn has_saved(dir: &TempDir) -> bool {
        dir.path().join("widget_state.json").exists()
    }

    #[test]
    fn test_snap_alpha_to_step() {
        assert_eq!(snap_alpha(0.73), 0.75);
        assert_eq!(snap_alpha(0.5), 0.5);
        assert_eq!(snap_alpha(1.0), 1.0);
        assert_eq!(snap_alpha(0.2), 0.5);
    }

    #[test]
    fn test_text_edit_saves() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "Hello");

        assert!(!model.edit_text("Hello").unwrap());
        assert!(!has_saved(&dir));

        assert!(model.edit_text("Hello!").unwrap());
        assert_eq!(saved(&dir)["content"]["text"], "Hello!");
    }

    #[test]
    fn test_style_saves_tag() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "Hello");

        assert!(model.apply_style(&StyleAction::Bold, Some(Span::new(0, 5))).unwrap());
        let doc = saved(&dir);
        assert_eq!(doc["content"]["tags"]["bold"]["ranges"], json!([["1.0", "1.5"]]));
        assert_eq!(doc["content"]["tags"]["bold"]["config"]["font"]["weight"], "bold");
    }

    #[test]
    fn test_style_without_selection_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "Hello");

        assert!(!model.apply_style(&StyleAction::Bold, None).unwrap());
        assert!(!model.apply_style(&StyleAction::Bold, Some(Span::new(2, 2))).unwrap());
        assert!(!has_saved(&dir));
        assert!(model.rich().tags().is_empty());
    }

    #[test]
    fn test_appearance_changes_save() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "");

        assert!(model.set_color(ColorChannel::Background, "#FF0000").unwrap());
        assert_eq!(saved(&dir)["colors"]["background"], "#ff0000");

        assert!(!model.set_color(ColorChannel::Text, "not a color").unwrap());
        assert_eq!(saved(&dir)["colors"]["text"], "#FFFFFF");

        assert!(model.set_border(40).unwrap());
        assert_eq!(saved(&dir)["border_thickness"], 16);

        assert!(model.set_alpha(0.73).unwrap());
        assert_eq!(saved(&dir)["alpha"], json!(0.75));
        assert!(!model.set_alpha(0.76).unwrap());
    }

    #[test]
    fn test_font_changes_save() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "");

        assert!(model.set_family("Noto Serif".to_string()).unwrap());
        assert_eq!(saved(&dir)["base_font"]["family"], "Noto Serif");

        assert!(model.set_font_size(200).unwrap());
        assert_eq!(saved(&dir)["base_font"]["size"], 96);
        assert!(!model.set_font_size(96).unwrap());
    }

    #[test]
    fn test_pin_and_geometry_save() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "");

        assert!(model.toggle_pin().unwrap());
        assert_eq!(saved(&dir)["always_on_top"], false);

        assert!(model.move_to(5, -20).unwrap());
        assert_eq!(saved(&dir)["geometry"], "600x320+5+-20");
        assert!(!model.move_to(5, -20).unwrap());

        assert!(model.resize_to(700.4, 400.0).unwrap());
        assert_eq!(saved(&dir)["geometry"], "700x400+5+-20");
    }

    #[test]
    fn test_grip_drag_saves_on_release_only() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "");

        let drag = ResizeDrag::begin(model.state().geometry, 10.0, 10.0);
        let geometry = drag.update(model.state().geometry, 5000.0, -5000.0);
        assert!(model.preview_geometry(geometry));
        assert!(!has_saved(&dir));

        model.save().unwrap();
        assert_eq!(saved(&dir)["geometry"], "1600x180+100+100");
    }

    #[test]
    fn test_save_before_hiding_keeps_latest_text() {
        let dir = TempDir::new().unwrap();
        let mut model = model_with_text(&dir, "draft");
        model.apply_style(&StyleAction::Grow, Some(Span::new(0, 5))).unwrap();
        model.edit_text("final draft").unwrap();

        model.save().unwrap();
        let doc = saved(&dir);
        assert_eq!(doc["content"]["text"], "final draft");
        assert_eq!(doc["content"]["tags"]["size_18"]["ranges"], json!([["1.6", "1.11"]]));
    }

    #[test]
    fn test_failed_save_keeps_change() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("missing").join("widget_state.json"));
        let mut model = WidgetModel::new(store, WidgetState::default());

        assert!(model.toggle_pin().is_err());
        assert!(!model.state().always_on_top);
    }
}
