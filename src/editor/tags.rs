//! Formatting tags
//!
//! A tag pairs a `TextStyle` with the set of spans it covers. Styles are
//! values: applying a style that is already in the table reuses that tag.
//! Tags later in the table take priority. Applying a style raises its tag
//! to the top and takes the span away from tags it fully overrides, so the
//! most recently applied attribute wins where tags overlap.
//!
//! Persisted form (one entry per tag, in priority order):
//!
//! ```json
//! "bold": {"config": {"font": {...}}, "ranges": [["1.0", "1.5"]]}
//! ```

use super::buffer::{TextBuffer, TextChange, TextIndex};
use crate::state::{FontSpec, FontWeight};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Half-open character range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Span between two offsets, in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Same span with both ends clamped to `len`
    pub fn clamped(self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}

fn shift_for_delete(p: usize, change: &TextChange) -> usize {
    let range = change.removed_range();
    if p <= range.start {
        p
    } else if p >= range.end {
        p - change.removed
    } else {
        range.start
    }
}

/// Sorted, non-empty, non-touching spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanSet {
    spans: Vec<Span>,
}

impl SpanSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// Add a span, merging with any span it overlaps or touches
    pub fn add(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }
        self.spans.push(span);
        self.normalize();
    }

    pub fn covers(&self, offset: usize) -> bool {
        self.spans.iter().any(|s| s.contains(offset))
    }

    /// Follow a text edit
    ///
    /// Text inserted strictly inside a span extends it; text inserted at a
    /// span's start pushes the span right; text inserted at its end is left
    /// out. Deleted text collapses, and spans left empty are dropped.
    pub fn apply_change(&mut self, change: &TextChange) {
        let at = change.start;
        let n = change.inserted;
        for span in &mut self.spans {
            let mut start = shift_for_delete(span.start, change);
            let mut end = shift_for_delete(span.end, change);
            if n > 0 && start < end {
                if start >= at {
                    start += n;
                    end += n;
                } else if end > at {
                    end += n;
                }
            }
            *span = Span { start, end };
        }
        self.normalize();
    }

    /// Remove a span, splitting any span it falls inside
    pub fn subtract(&mut self, cut: Span) {
        if cut.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.spans.len() + 1);
        for span in self.spans.drain(..) {
            if span.end <= cut.start || span.start >= cut.end {
                out.push(span);
                continue;
            }
            if span.start < cut.start {
                out.push(Span::new(span.start, cut.start));
            }
            if cut.end < span.end {
                out.push(Span::new(cut.end, span.end));
            }
        }
        self.spans = out;
    }

    fn normalize(&mut self) {
        self.spans.retain(|s| !s.is_empty());
        self.spans.sort();
        let mut merged: Vec<Span> = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            match merged.last_mut() {
                Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        self.spans = merged;
    }
}

/// Style carried by a tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl TextStyle {
    pub fn with_font(font: FontSpec) -> Self {
        Self {
            font: Some(font),
            ..Self::default()
        }
    }

    pub fn with_foreground(color: impl Into<String>) -> Self {
        Self {
            foreground: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.font.is_none() && self.foreground.is_none() && self.background.is_none()
    }

    /// Bit set of the attributes this style defines
    fn attributes(&self) -> u8 {
        u8::from(self.font.is_some())
            | u8::from(self.foreground.is_some()) << 1
            | u8::from(self.background.is_some()) << 2
    }

    /// Readable tag name for a new tag with this style
    fn suggested_name(&self) -> String {
        match (&self.font, &self.foreground, &self.background) {
            (Some(font), _, _) if font.weight == FontWeight::Bold => "bold".to_string(),
            (Some(font), _, _) => format!("size_{}", font.size),
            (None, Some(fg), _) => format!("color_{}", fg),
            (None, None, Some(bg)) => format!("background_{}", bg),
            (None, None, None) => "style".to_string(),
        }
    }
}

/// A named style and the spans it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub style: TextStyle,
    pub spans: SpanSet,
}

/// Effective formatting of a run of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub span: Span,
    pub font: FontSpec,
    pub foreground: Option<String>,
    pub background: Option<String>,
}

/// Persisted shape of one tag
#[derive(Debug, Serialize, Deserialize)]
struct TagRecord {
    #[serde(default)]
    config: Value,
    #[serde(default)]
    ranges: Vec<Value>,
}

fn parse_range(value: &Value) -> Option<(TextIndex, TextIndex)> {
    match value.as_array()?.as_slice() {
        [start, end] => Some((
            start.as_str()?.parse().ok()?,
            end.as_str()?.parse().ok()?,
        )),
        _ => None,
    }
}

/// All tags of a text, lowest priority first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    tags: Vec<Tag>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    fn unique_name(&self, base: String) -> String {
        if self.get(&base).is_none() {
            return base;
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(base)
    }

    /// Apply a style over a span and return the name of the tag used
    ///
    /// Other tags whose every attribute is overridden by `style` give up the
    /// span; a tag left without spans that way is dropped. Empty spans and
    /// empty styles change nothing.
    pub fn apply(&mut self, style: TextStyle, span: Span) -> Option<&str> {
        if span.is_empty() || style.is_empty() {
            return None;
        }

        let attributes = style.attributes();
        self.tags.retain_mut(|tag| {
            if tag.style == style
                || tag.spans.is_empty()
                || tag.style.attributes() & !attributes != 0
            {
                return true;
            }
            tag.spans.subtract(span);
            !tag.spans.is_empty()
        });

        let mut tag = match self.tags.iter().rposition(|t| t.style == style) {
            Some(pos) => self.tags.remove(pos),
            None => Tag {
                name: self.unique_name(style.suggested_name()),
                style,
                spans: SpanSet::new(),
            },
        };
        tag.spans.add(span);
        self.tags.push(tag);
        self.tags.last().map(|t| t.name.as_str())
    }

    /// Follow a text edit
    pub fn apply_change(&mut self, change: &TextChange) {
        for tag in &mut self.tags {
            tag.spans.apply_change(change);
        }
    }

    /// Serializable tag map, in priority order
    pub fn capture(&self, buffer: &TextBuffer) -> Map<String, Value> {
        let mut out = Map::new();
        for tag in &self.tags {
            if tag.style.is_empty() && tag.spans.is_empty() {
                continue;
            }
            let config = serde_json::to_value(&tag.style).unwrap_or_else(|e| {
                log::warn!("Could not serialize style of tag {:?}: {}", tag.name, e);
                Value::Object(Map::new())
            });
            let ranges = tag
                .spans
                .iter()
                .map(|s| {
                    Value::from(vec![
                        buffer.index_of(s.start).to_string(),
                        buffer.index_of(s.end).to_string(),
                    ])
                })
                .collect::<Vec<_>>();

            let record = TagRecord { config, ranges };
            match serde_json::to_value(&record) {
                Ok(value) => {
                    out.insert(tag.name.clone(), value);
                }
                Err(e) => log::warn!("Could not capture tag {:?}: {}", tag.name, e),
            }
        }
        out
    }

    /// Rebuild tags from their persisted form
    ///
    /// Entries that are not objects are skipped. Malformed ranges are
    /// skipped; indices past the end clamp to the end of the text.
    pub fn restore(tags: &Map<String, Value>, buffer: &TextBuffer) -> Self {
        let mut table = TagTable::new();
        for (name, value) in tags {
            let record: TagRecord = match serde_json::from_value(value.clone()) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Skipping tag {:?}: {}", name, e);
                    continue;
                }
            };
            let style: TextStyle = match record.config {
                Value::Null => TextStyle::default(),
                config => serde_json::from_value(config).unwrap_or_else(|e| {
                    log::warn!("Ignoring style of tag {:?}: {}", name, e);
                    TextStyle::default()
                }),
            };

            let mut spans = SpanSet::new();
            for range in &record.ranges {
                match parse_range(range) {
                    Some((start, end)) => {
                        let (start, end) = (buffer.offset_of(start), buffer.offset_of(end));
                        if start < end {
                            spans.add(Span { start, end });
                        }
                    }
                    None => log::debug!("Skipping malformed range {} of tag {:?}", range, name),
                }
            }

            table.tags.push(Tag {
                name: name.clone(),
                style,
                spans,
            });
        }
        table
    }

    /// Effective formatting of every character, merged into runs
    pub fn runs(&self, len: usize, base: &FontSpec) -> Vec<StyledRun> {
        let mut bounds: Vec<usize> = vec![0, len];
        for tag in &self.tags {
            for span in tag.spans.iter() {
                bounds.push(span.start.min(len));
                bounds.push(span.end.min(len));
            }
        }
        bounds.sort_unstable();
        bounds.dedup();

        let mut runs: Vec<StyledRun> = Vec::new();
        for pair in bounds.windows(2) {
            let span = Span::new(pair[0], pair[1]);
            if span.is_empty() {
                continue;
            }
            let mut run = StyledRun {
                span,
                font: base.clone(),
                foreground: None,
                background: None,
            };
            for tag in self.tags.iter().filter(|t| t.spans.covers(span.start)) {
                if let Some(font) = &tag.style.font {
                    run.font = font.clone();
                }
                if let Some(fg) = &tag.style.foreground {
                    run.foreground = Some(fg.clone());
                }
                if let Some(bg) = &tag.style.background {
                    run.background = Some(bg.clone());
                }
            }

            match runs.last_mut() {
                Some(last)
                    if last.span.end == span.start
                        && last.font == run.font
                        && last.foreground == run.foreground
                        && last.background == run.background =>
                {
                    last.span.end = span.end;
                }
                _ => runs.push(run),
            }
        }
        runs
    }
}
