//! Text buffer implementation using ropey
//!
//! Offsets are character offsets. Positions are persisted as text indices
//! of the form `line.column`, with 1-based lines and 0-based columns; only
//! `\n` separates lines.

use ropey::Rope;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// A `line.column` position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextIndex {
    /// 1-based line
    pub line: usize,
    /// 0-based column in characters
    pub column: usize,
}

impl TextIndex {
    /// Position past the last character
    pub const END: TextIndex = TextIndex {
        line: usize::MAX,
        column: 0,
    };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl FromStr for TextIndex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "end" {
            return Ok(TextIndex::END);
        }
        let (line, column) = s.split_once('.').ok_or(())?;
        let line: usize = line.parse().map_err(|_| ())?;
        let column: usize = column.parse().map_err(|_| ())?;
        if line == 0 {
            return Err(());
        }
        Ok(TextIndex { line, column })
    }
}

impl fmt::Display for TextIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// A single contiguous replacement that turns one text into another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    /// Offset where old and new text start to differ
    pub start: usize,
    /// Characters removed at `start`
    pub removed: usize,
    /// Characters inserted at `start`
    pub inserted: usize,
}

impl TextChange {
    /// Minimal change between two texts, or `None` if they are equal
    pub fn between(old: &str, new: &str) -> Option<Self> {
        if old == new {
            return None;
        }
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();

        let prefix = old
            .iter()
            .zip(new.iter())
            .take_while(|(a, b)| a == b)
            .count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Some(Self {
            start: prefix,
            removed: old.len() - prefix - suffix,
            inserted: new.len() - prefix - suffix,
        })
    }

    pub fn removed_range(&self) -> Range<usize> {
        self.start..self.start + self.removed
    }
}

/// Text buffer wrapping ropey::Rope
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create a buffer from a string
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total character count
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the length of a specific line (in characters, excluding newline)
    pub fn line_len(&self, line_idx: usize) -> Option<usize> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        let has_newline = len > 0 && line.char(len - 1) == '\n';
        Some(if has_newline { len - 1 } else { len })
    }

    /// Convert (line, column) to character offset, both 0-based
    ///
    /// Columns past the end of a line clamp to the end of that line.
    pub fn line_col_to_char(&self, line: usize, col: usize) -> Option<usize> {
        let line_len = self.line_len(line)?;
        Some(self.rope.line_to_char(line) + col.min(line_len))
    }

    /// Convert character offset to 0-based (line, column)
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        (line, char_idx - line_start)
    }

    /// Text index of a character offset
    pub fn index_of(&self, char_idx: usize) -> TextIndex {
        let (line, column) = self.char_to_line_col(char_idx);
        TextIndex::new(line + 1, column)
    }

    /// Character offset of a text index, clamped into the buffer
    pub fn offset_of(&self, index: TextIndex) -> usize {
        let line = index.line.saturating_sub(1);
        self.line_col_to_char(line, index.column)
            .unwrap_or(self.rope.len_chars())
    }

    /// Get a slice of the buffer as a string
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.rope.len_chars());
        let end = range.end.min(self.rope.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Replace the whole content, returning what changed
    pub fn set_content(&mut self, text: &str) -> Option<TextChange> {
        let change = TextChange::between(&self.rope.to_string(), text)?;
        self.rope = Rope::from_str(text);
        Some(change)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
