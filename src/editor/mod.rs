//! Rich text model for Motivation Widget
//!
//! Contains the text and its formatting:
//! - Text buffer management (using ropey)
//! - Formatting tags and their spans
//! - Locating the selection reported by the text widget

pub mod buffer;
pub mod selection;
pub mod tags;

pub use buffer::{TextBuffer, TextChange, TextIndex};
pub use selection::selection_span;
pub use tags::{Span, SpanSet, StyledRun, Tag, TagTable, TextStyle};

use crate::config::{clamp_font_size, FONT_SIZE_STEP};
use crate::state::{BaseFont, Content, Rgb};

/// A formatting action applied to the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleAction {
    /// Bold, derived from the base font
    Bold,
    /// Base font size plus one step
    Grow,
    /// Base font size minus one step
    Shrink,
    /// Foreground color
    Color(String),
}

impl StyleAction {
    /// The style this action applies, given the current base font
    pub fn style(&self, base: &BaseFont) -> TextStyle {
        match self {
            StyleAction::Bold => TextStyle::with_font(base.to_spec().bold()),
            StyleAction::Grow => size_style(base, FONT_SIZE_STEP),
            StyleAction::Shrink => size_style(base, -FONT_SIZE_STEP),
            StyleAction::Color(color) => {
                let color = color
                    .parse::<Rgb>()
                    .map(Rgb::to_hex)
                    .unwrap_or_else(|_| color.trim().to_string());
                TextStyle::with_foreground(color)
            }
        }
    }
}

fn size_style(base: &BaseFont, delta: i32) -> TextStyle {
    let size = clamp_font_size(base.size + delta);
    TextStyle::with_font(base.to_spec().with_size(size))
}

/// Text plus formatting tags, kept consistent across edits
#[derive(Debug, Clone, Default)]
pub struct RichText {
    buffer: TextBuffer,
    tags: TagTable,
}

impl RichText {
    /// Rebuild from persisted content
    pub fn from_content(content: &Content) -> Self {
        let buffer = TextBuffer::from_str(&content.text);
        let tags = TagTable::restore(&content.tags, &buffer);
        log::debug!(
            "Restored {} chars of text with {} tags",
            buffer.len_chars(),
            tags.len()
        );
        Self { buffer, tags }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Replace the text, moving tag spans along with the edit
    ///
    /// Returns whether the text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        match self.buffer.set_content(text) {
            Some(change) => {
                self.tags.apply_change(&change);
                true
            }
            None => false,
        }
    }

    /// Apply a formatting action over a span
    ///
    /// The span is clamped to the text. Returns the name of the tag used, or
    /// `None` when nothing was applied.
    pub fn apply(&mut self, action: &StyleAction, span: Span, base: &BaseFont) -> Option<String> {
        let span = span.clamped(self.buffer.len_chars());
        let name = self
            .tags
            .apply(action.style(base), span)
            .map(str::to_string)?;
        log::debug!("Applied {:?} over {}..{} as {:?}", action, span.start, span.end, name);
        Some(name)
    }

    /// Store text and tags into persisted content
    pub fn write_to(&self, content: &mut Content) {
        content.text = self.text();
        content.tags = self.tags.capture(&self.buffer);
    }

    /// Effective formatting runs over the whole text
    pub fn runs(&self, base: &BaseFont) -> Vec<StyledRun> {
        self.tags.runs(self.buffer.len_chars(), &base.to_spec())
    }
}
