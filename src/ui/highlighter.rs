//! Rich text rendering through the text editor's highlighter hook
//!
//! The text editor asks for formatting one line at a time, as byte ranges.
//! Styled runs are character ranges over the whole text, so they are cut at
//! line breaks and converted up front whenever the text or tags change.
//! Runs only carry color and font face; per-run sizes and backgrounds are
//! persisted but drawn at the base size. Run colors carry the widget
//! opacity like every other painted color.

use crate::editor::StyledRun;
use crate::fonts;
use crate::state::{FontSlant, FontSpec, FontWeight, Rgb};
use cosmic::iced::font::{Style as FontStyle, Weight};
use cosmic::iced::{Color, Font};
use cosmic::iced_core::text::highlighter::{self, Highlighter};
use std::ops::Range;
use std::sync::Arc;

/// Formatting of one run within a line
#[derive(Debug, Clone, PartialEq)]
pub struct RunFormat {
    pub color: Option<Color>,
    pub font: Option<Font>,
}

/// Formatting of every line, indexed by line number
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichSettings {
    lines: Arc<Vec<Vec<(Range<usize>, RunFormat)>>>,
}

impl RichSettings {
    /// Convert styled runs over `text` into per-line byte ranges
    ///
    /// Runs that look exactly like untagged text are left out. Colors are
    /// painted at `alpha`.
    pub fn build(text: &str, runs: &[StyledRun], base: &FontSpec, alpha: f32) -> Self {
        let mut lines = Vec::new();
        let mut line_start = 0;

        for line in text.split('\n') {
            let line_len = line.chars().count();
            let line_end = line_start + line_len;
            let mut formats = Vec::new();

            for run in runs {
                let start = run.span.start.max(line_start);
                let end = run.span.end.min(line_end);
                if start >= end {
                    continue;
                }
                let format = RunFormat {
                    color: run
                        .foreground
                        .as_deref()
                        .and_then(|c| c.parse::<Rgb>().ok())
                        .map(|rgb| to_color(rgb, alpha)),
                    font: (run.font != *base).then(|| to_font(&run.font)),
                };
                if format.color.is_none() && format.font.is_none() {
                    continue;
                }
                let bytes = byte_offset(line, start - line_start)..byte_offset(line, end - line_start);
                formats.push((bytes, format));
            }

            lines.push(formats);
            line_start = line_end + 1;
        }

        Self {
            lines: Arc::new(lines),
        }
    }

    fn line(&self, index: usize) -> &[(Range<usize>, RunFormat)] {
        self.lines.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn byte_offset(line: &str, chars: usize) -> usize {
    line.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Renderer font for a tag font
pub fn to_font(spec: &FontSpec) -> Font {
    Font {
        weight: match spec.weight {
            FontWeight::Bold => Weight::Bold,
            FontWeight::Normal => Weight::Normal,
        },
        style: match spec.slant {
            FontSlant::Italic => FontStyle::Italic,
            FontSlant::Roman => FontStyle::Normal,
        },
        ..Font::with_name(fonts::intern(&spec.family))
    }
}

/// Renderer color for a color value
pub fn to_color(rgb: Rgb, alpha: f32) -> Color {
    Color::from_rgba8(rgb.r, rgb.g, rgb.b, alpha)
}

/// Highlighter replaying precomputed line formats
#[derive(Debug)]
pub struct RichHighlighter {
    settings: RichSettings,
    current_line: usize,
}

impl Highlighter for RichHighlighter {
    type Settings = RichSettings;
    type Highlight = RunFormat;
    type Iterator<'a>
        = std::vec::IntoIter<(Range<usize>, RunFormat)>
    where
        Self: 'a;

    fn new(settings: &Self::Settings) -> Self {
        Self {
            settings: settings.clone(),
            current_line: 0,
        }
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        self.settings = new_settings.clone();
        self.current_line = 0;
    }

    fn change_line(&mut self, line: usize) {
        self.current_line = self.current_line.min(line);
    }

    fn highlight_line(&mut self, _line: &str) -> Self::Iterator<'_> {
        let formats = self.settings.line(self.current_line).to_vec();
        self.current_line += 1;
        formats.into_iter()
    }

    fn current_line(&self) -> usize {
        self.current_line
    }
}

/// Editor format for a run
pub fn to_format(run: &RunFormat, _theme: &cosmic::Theme) -> highlighter::Format<Font> {
    highlighter::Format {
        color: run.color,
        font: run.font,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{RichText, Span, StyleAction};
    use crate::state::{BaseFont, Content};

    fn settings_for(text: &str, actions: &[(StyleAction, Span)]) -> RichSettings {
        settings_at(text, actions, 1.0)
    }

    fn settings_at(text: &str, actions: &[(StyleAction, Span)], alpha: f32) -> RichSettings {
        let base = BaseFont::default();
        let mut rich = RichText::from_content(&Content {
            text: text.to_string(),
            ..Content::default()
        });
        for (action, span) in actions {
            rich.apply(action, *span, &base);
        }
        RichSettings::build(text, &rich.runs(&base), &base.to_spec(), alpha)
    }

    #[test]
    fn test_runs_split_at_line_breaks() {
        let settings = settings_for(
            "ab\ncd",
            &[(StyleAction::Color("#ff0000".to_string()), Span::new(1, 4))],
        );
        assert_eq!(settings.line(0).len(), 1);
        assert_eq!(settings.line(0)[0].0, 1..2);
        assert_eq!(settings.line(1)[0].0, 0..1);
        assert_eq!(settings.line(1)[0].1.color, Some(Color::from_rgb8(255, 0, 0)));
        assert!(settings.line(1)[0].1.font.is_none());
    }

    #[test]
    fn test_byte_ranges_for_multibyte_text() {
        let settings = settings_for("größe", &[(StyleAction::Bold, Span::new(2, 4))]);
        let (range, format) = &settings.line(0)[0];
        assert_eq!(*range, 2..6);
        assert_eq!(format.font.map(|f| f.weight), Some(Weight::Bold));
    }

    #[test]
    fn test_plain_text_has_no_formats() {
        let settings = settings_for("plain\ntext", &[]);
        assert!(settings.line(0).is_empty());
        assert!(settings.line(1).is_empty());
        assert!(settings.line(7).is_empty());
    }

    #[test]
    fn test_highlighter_walks_lines() {
        let settings = settings_for(
            "x\ny",
            &[(StyleAction::Color("#00ff00".to_string()), Span::new(2, 3))],
        );
        let mut highlighter = RichHighlighter::new(&settings);
        assert_eq!(highlighter.highlight_line("x").count(), 0);
        assert_eq!(highlighter.highlight_line("y").count(), 1);
        highlighter.change_line(1);
        assert_eq!(highlighter.current_line(), 1);
    }

    #[test]
    fn test_run_colors_follow_opacity() {
        let settings = settings_at(
            "fade",
            &[(StyleAction::Color("#ff0000".to_string()), Span::new(0, 4))],
            0.6,
        );
        let color = settings.line(0)[0].1.color.unwrap();
        assert_eq!(color.a, 0.6);
        assert_eq!(to_format(&settings.line(0)[0].1, &cosmic::Theme::dark()).color, Some(color));
    }
}
