//! UI module for Motivation Widget
//!
//! Contains all user interface components including:
//! - Main panel layout (border, title bar, toolbar, text area, grip)
//! - Title bar with window controls
//! - Settings toolbar
//! - Color palette popup
//! - Rich text rendering

pub mod highlighter;
mod palette;
mod panel;
mod titlebar;
mod toolbar;

use crate::fonts::FontCatalog;
use crate::menu::Action as MenuAction;
use crate::message::{ColorPicker, Message};
use crate::state::WidgetState;
use cosmic::widget::menu::KeyBind;
use cosmic::widget::text_editor;
use cosmic::Element;
use std::collections::HashMap;

pub use highlighter::{RichHighlighter, RichSettings};

/// Transient UI state that is not persisted
#[derive(Debug, Clone)]
pub struct PanelState {
    /// Settings toolbar visible
    pub toolbar_visible: bool,
    /// Open color picker, if any
    pub picker: Option<ColorPicker>,
    /// Hex text typed into the open picker
    pub color_input: String,
    /// Format row shown after a right-click on the text
    pub format_row: bool,
    /// Status line text
    pub status: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            toolbar_visible: true,
            picker: None,
            color_input: String::new(),
            format_row: false,
            status: None,
        }
    }
}

impl PanelState {
    /// Open a picker, seeding its input with the current color
    pub fn open_picker(&mut self, picker: ColorPicker, current: &str) {
        self.picker = Some(picker);
        self.color_input = current.to_string();
    }

    pub fn close_popups(&mut self) {
        self.picker = None;
        self.format_row = false;
    }
}

/// Everything the view reads
pub struct ViewContext<'a> {
    pub state: &'a WidgetState,
    pub content: &'a text_editor::Content,
    pub highlight: &'a RichSettings,
    pub fonts: &'a FontCatalog,
    pub panel: &'a PanelState,
    pub key_binds: &'a HashMap<KeyBind, MenuAction>,
}

/// Build the main application view
pub fn view<'a>(cx: &ViewContext<'a>) -> Element<'a, Message> {
    panel::view(cx)
}
