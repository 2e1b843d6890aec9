//! Selection lookup
//!
//! The text widget reports the caret, the selection anchor and the selected
//! text as line/column positions. Columns may count characters or bytes
//! depending on the text backend, so both readings are checked against the
//! selected text before a span is accepted.

use super::buffer::TextBuffer;
use super::tags::Span;

fn matches_at(buffer: &TextBuffer, span: Span, selected: &str) -> bool {
    buffer.slice(span.start..span.end) == selected
}

/// Character offset of a 0-based line and byte column, if it is a boundary
fn byte_position(buffer: &TextBuffer, line: usize, byte_col: usize) -> Option<usize> {
    let start = buffer.line_col_to_char(line, 0)?;
    let len = buffer.line_len(line)?;
    let text = buffer.slice(start..start + len);
    text.is_char_boundary(byte_col)
        .then(|| start + text[..byte_col].chars().count())
}

/// Character offsets a widget position may stand for
fn offsets(buffer: &TextBuffer, (line, column): (usize, usize)) -> [Option<usize>; 2] {
    [
        buffer.line_col_to_char(line, column),
        byte_position(buffer, line, column),
    ]
}

fn span_between(a: usize, b: usize) -> Span {
    Span::new(a.min(b), a.max(b))
}

/// The selected text directly before or after the caret
///
/// When both sides hold the selected text the caret alone cannot tell
/// which one is meant, so nothing is returned.
fn around_caret(buffer: &TextBuffer, caret: usize, selected: &str) -> Option<Span> {
    let n = selected.chars().count();
    let before = caret
        .checked_sub(n)
        .map(|start| Span::new(start, caret))
        .filter(|span| matches_at(buffer, *span, selected));
    let after = Some(Span::new(caret, caret + n))
        .filter(|span| span.end <= buffer.len_chars() && matches_at(buffer, *span, selected));

    match (before, after) {
        (Some(span), None) | (None, Some(span)) => Some(span),
        _ => None,
    }
}

/// Locate the selection from its anchor and the caret
///
/// Positions are 0-based `(line, column)` pairs. The span between anchor
/// and caret is used when it holds exactly the selected text, whatever the
/// selection direction. Without a usable anchor, the selection is looked
/// up next to the caret.
pub fn selection_span(
    buffer: &TextBuffer,
    anchor: Option<(usize, usize)>,
    caret: (usize, usize),
    selected: &str,
) -> Option<Span> {
    if selected.is_empty() {
        return None;
    }

    if let Some(anchor) = anchor {
        let found = offsets(buffer, anchor)
            .into_iter()
            .zip(offsets(buffer, caret))
            .filter_map(|pair| match pair {
                (Some(a), Some(c)) => Some(span_between(a, c)),
                _ => None,
            })
            .find(|span| matches_at(buffer, *span, selected));
        if found.is_some() {
            return found;
        }
    }

    locate_selection(buffer, caret.0, caret.1, selected)
}

/// Locate the selected text relative to the caret
///
/// `line` and `column` are 0-based. The column is tried as a character
/// column first and as a byte column second. When neither places the
/// selection at the caret, a selection that occurs exactly once in the
/// text is still accepted.
pub fn locate_selection(
    buffer: &TextBuffer,
    line: usize,
    column: usize,
    selected: &str,
) -> Option<Span> {
    if selected.is_empty() {
        return None;
    }

    for caret in offsets(buffer, (line, column)).into_iter().flatten() {
        if let Some(span) = around_caret(buffer, caret, selected) {
            return Some(span);
        }
    }

    let text = buffer.to_string();
    let mut found = text.match_indices(selected);
    match (found.next(), found.next()) {
        (Some((byte_start, _)), None) => {
            let start = text[..byte_start].chars().count();
            Some(Span::new(start, start + selected.chars().count()))
        }
        _ => {
            log::debug!("Could not place selection of {} chars", selected.chars().count());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_ending_at_caret() {
        let buf = TextBuffer::from_str("Hello world");
        assert_eq!(locate_selection(&buf, 0, 5, "Hello"), Some(Span::new(0, 5)));
    }

    #[test]
    fn test_selection_starting_at_caret() {
        let buf = TextBuffer::from_str("Hello world");
        assert_eq!(locate_selection(&buf, 0, 6, "world"), Some(Span::new(6, 11)));
    }

    #[test]
    fn test_multiline_selection() {
        let buf = TextBuffer::from_str("one\ntwo\nthree");
        assert_eq!(locate_selection(&buf, 2, 2, "wo\nth"), Some(Span::new(5, 10)));
    }

    #[test]
    fn test_byte_column_fallback() {
        let buf = TextBuffer::from_str("grüße aus");
        // caret after "grüße" is char column 5, byte column 7
        assert_eq!(locate_selection(&buf, 0, 7, "grüße"), Some(Span::new(0, 5)));
    }

    #[test]
    fn test_unique_occurrence_fallback() {
        let buf = TextBuffer::from_str("alpha beta gamma");
        assert_eq!(locate_selection(&buf, 0, 0, "gamma"), Some(Span::new(11, 16)));
    }

    #[test]
    fn test_ambiguous_or_empty_selection() {
        let buf = TextBuffer::from_str("la la la");
        assert_eq!(locate_selection(&buf, 0, 1, "la"), None);
        assert_eq!(locate_selection(&buf, 0, 2, ""), None);
    }

    #[test]
    fn test_backward_selection_of_repeated_text() {
        let buf = TextBuffer::from_str("abab");
        // selected right to left: anchor after the second "ab", caret before it
        assert_eq!(
            selection_span(&buf, Some((0, 4)), (0, 2), "ab"),
            Some(Span::new(2, 4))
        );
        // forward selection of the first "ab"
        assert_eq!(
            selection_span(&buf, Some((0, 0)), (0, 2), "ab"),
            Some(Span::new(0, 2))
        );
    }

    #[test]
    fn test_caret_between_repeats_is_ambiguous() {
        let buf = TextBuffer::from_str("abab");
        assert_eq!(locate_selection(&buf, 0, 2, "ab"), None);
        assert_eq!(selection_span(&buf, None, (0, 2), "ab"), None);
    }

    #[test]
    fn test_anchor_span_across_lines() {
        let buf = TextBuffer::from_str("one\ntwo\nthree");
        assert_eq!(
            selection_span(&buf, Some((2, 2)), (1, 1), "wo\nth"),
            Some(Span::new(5, 10))
        );
    }

    #[test]
    fn test_anchor_with_byte_columns() {
        let buf = TextBuffer::from_str("grüße grüße");
        // second word: char columns 6..11, byte columns 8..15
        assert_eq!(
            selection_span(&buf, Some((0, 15)), (0, 8), "grüße"),
            Some(Span::new(6, 11))
        );
    }
}
