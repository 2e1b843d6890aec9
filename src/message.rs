//! Application message types
//!
//! Defines all messages that can be sent to the application's update function.
//! Messages are organized by category for clear handling and routing.

use crate::editor::StyleAction;
use crate::fonts::{FontCatalog, ImportedFont};
use crate::state::ColorChannel;
use cosmic::widget::text_editor;

/// Main application message enum
#[derive(Debug, Clone)]
pub enum Message {
    /// Window chrome: move, resize, pin, minimize, close
    Window(WindowMessage),

    /// Text editing and selection formatting
    Editor(EditorMessage),

    /// Colors, border and opacity
    Appearance(AppearanceMessage),

    /// Base font and font import
    Font(FontMessage),

    /// Popups and panels
    View(ViewMessage),

    /// Saving, errors and status
    System(SystemMessage),
}

/// Window chrome messages
#[derive(Debug, Clone)]
pub enum WindowMessage {
    /// Title bar pressed; let the compositor move the window
    DragStart,

    /// Corner grip pressed
    ResizeStart,

    /// Pointer moved, in window coordinates
    PointerMoved { x: f32, y: f32 },

    /// Pointer released anywhere
    PointerReleased,

    /// Window was moved by the system
    Moved { x: i32, y: i32 },

    /// Window was resized by the system
    Resized { width: f32, height: f32 },

    /// Toggle always-on-top
    TogglePin,

    /// Save and hide the window
    Minimize,

    /// Save and exit
    Close,
}

/// Text editing messages
#[derive(Debug, Clone)]
pub enum EditorMessage {
    /// Action from the text_editor widget
    Action(text_editor::Action),

    /// Apply formatting to the current selection
    Style(StyleAction),

    /// Hex color typed for the selection color
    SelectionColorInput(String),

    /// Apply the typed selection color
    SelectionColorSubmit,
}

/// Appearance messages
#[derive(Debug, Clone)]
pub enum AppearanceMessage {
    /// Set one of the widget colors
    SetColor(ColorChannel, String),

    /// Hex color typed into the picker of a channel
    ColorInput(ColorChannel, String),

    /// Apply the typed color of a channel
    ColorSubmit(ColorChannel),

    /// Set border thickness
    SetBorder(u32),

    /// Set window opacity
    SetAlpha(f32),
}

/// Font messages
#[derive(Debug, Clone)]
pub enum FontMessage {
    /// System font enumeration finished
    CatalogLoaded(FontCatalog),

    /// Select a base font family by index into the catalog
    SelectFamily(usize),

    /// Set the base font size
    SetSize(i32),

    /// Show the font file picker
    Import,

    /// Picker was dismissed
    ImportCancelled,

    /// Font file was read and validated
    Imported(ImportedFont),

    /// Font file could not be used
    ImportFailed { title: String, message: String },

    /// Font data was registered with the renderer
    Registered,
}

/// Popup and panel messages
#[derive(Debug, Clone)]
pub enum ViewMessage {
    /// Show or hide the settings toolbar
    ToggleToolbar,

    /// Open the color picker of a channel
    OpenPicker(ColorPicker),

    /// Close any open popup
    ClosePopup,

    /// Text area was right-clicked
    ContextMenu,
}

/// Which color a picker edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPicker {
    Channel(ColorChannel),
    Selection,
}

/// Saving, errors and status messages
#[derive(Debug, Clone)]
pub enum SystemMessage {
    /// Save the state now
    Save,

    /// Blocking error dialog was dismissed
    ErrorShown,

    /// Clear the status line
    ClearStatus,
}
