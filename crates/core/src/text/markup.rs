//! `==word==` highlight markup used on card fronts and context sentences.

use std::ops::Range;

pub const HIGHLIGHT_DELIMITER: &str = "==";

const DELIMITER_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Highlight(&'a str),
}

impl<'a> Segment<'a> {
    #[must_use]
    pub fn text(self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Highlight(text) => text,
        }
    }
}

/// Split `text` into plain and highlighted runs, scanning left to right.
///
/// A highlight is the delimiter, one or more non-`=` characters, then the
/// delimiter again. Anything else, including stray delimiters, stays plain.
#[must_use]
pub fn highlight_segments(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if let Some(inner) = highlight_at(bytes, i) {
            if plain_start < i {
                segments.push(Segment::Plain(&text[plain_start..i]));
            }
            segments.push(Segment::Highlight(&text[inner.clone()]));
            i = inner.end + DELIMITER_CHARS;
            plain_start = i;
        } else {
            i += 1;
        }
    }
    if plain_start < text.len() {
        segments.push(Segment::Plain(&text[plain_start..]));
    }
    segments
}

// Byte range of the highlighted body when a highlight opens at `at`.
fn highlight_at(bytes: &[u8], at: usize) -> Option<Range<usize>> {
    if !bytes[at..].starts_with(b"==") {
        return None;
    }
    let body_start = at + DELIMITER_CHARS;
    let body_len = bytes[body_start..]
        .iter()
        .take_while(|&&b| b != b'=')
        .count();
    let body_end = body_start + body_len;
    (body_len > 0 && bytes[body_end..].starts_with(b"==")).then_some(body_start..body_end)
}

/// Result of toggling a highlight inside a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightEdit {
    pub value: String,
    /// New selection, in char offsets.
    pub selection: Range<usize>,
}

/// True when toggling `start..end` (char offsets) would remove a highlight.
#[must_use]
pub fn is_highlighted(value: &str, start: usize, end: usize) -> bool {
    let chars: Vec<char> = value.chars().collect();
    let (start, end) = ordered(start, end, chars.len());
    wraps_itself(&chars[start..end]) || is_flanked(&chars, start, end)
}

/// Add or remove highlight delimiters around the selection `start..end`.
///
/// Offsets are in chars, as reported by form controls.
#[must_use]
pub fn toggle_highlight(value: &str, start: usize, end: usize) -> HighlightEdit {
    let chars: Vec<char> = value.chars().collect();
    let (start, end) = ordered(start, end, chars.len());
    let before: String = chars[..start].iter().collect();
    let selected = &chars[start..end];
    let after: String = chars[end..].iter().collect();

    if wraps_itself(selected) {
        let inner: String = selected[DELIMITER_CHARS..selected.len() - DELIMITER_CHARS]
            .iter()
            .collect();
        let inner_len = selected.len() - 2 * DELIMITER_CHARS;
        return HighlightEdit {
            value: format!("{before}{inner}{after}"),
            selection: start..start + inner_len,
        };
    }

    let selected: String = selected.iter().collect();
    if is_flanked(&chars, start, end) {
        let before: String = chars[..start - DELIMITER_CHARS].iter().collect();
        let after: String = chars[end + DELIMITER_CHARS..].iter().collect();
        return HighlightEdit {
            value: format!("{before}{selected}{after}"),
            selection: start - DELIMITER_CHARS..end - DELIMITER_CHARS,
        };
    }

    HighlightEdit {
        value: format!("{before}{HIGHLIGHT_DELIMITER}{selected}{HIGHLIGHT_DELIMITER}{after}"),
        selection: start + DELIMITER_CHARS..end + DELIMITER_CHARS,
    }
}

fn ordered(start: usize, end: usize, len: usize) -> (usize, usize) {
    let (a, b) = (start.min(len), end.min(len));
    (a.min(b), a.max(b))
}

fn wraps_itself(selected: &[char]) -> bool {
    selected.len() > 2 * DELIMITER_CHARS
        && selected.starts_with(&['=', '='])
        && selected.ends_with(&['=', '='])
}

fn is_flanked(chars: &[char], start: usize, end: usize) -> bool {
    start >= DELIMITER_CHARS
        && chars[start - DELIMITER_CHARS..start] == ['=', '=']
        && chars.get(end..end + DELIMITER_CHARS) == Some(&['=', '='][..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_plain_and_highlighted_runs() {
        assert_eq!(
            highlight_segments("I ==like== red ==apples=="),
            vec![
                Segment::Plain("I "),
                Segment::Highlight("like"),
                Segment::Plain(" red "),
                Segment::Highlight("apples"),
            ]
        );
    }

    #[test]
    fn stray_delimiters_stay_plain() {
        assert_eq!(
            highlight_segments("a ==== b"),
            vec![Segment::Plain("a ==== b")]
        );
        assert_eq!(highlight_segments("x == y"), vec![Segment::Plain("x == y")]);
        assert!(highlight_segments("").is_empty());
    }

    #[test]
    fn multibyte_highlight() {
        assert_eq!(
            highlight_segments("я ==люблю== чай"),
            vec![
                Segment::Plain("я "),
                Segment::Highlight("люблю"),
                Segment::Plain(" чай"),
            ]
        );
    }

    #[test]
    fn wraps_plain_selection() {
        let edit = toggle_highlight("I like tea", 2, 6);
        assert_eq!(edit.value, "I ==like== tea");
        assert_eq!(edit.selection, 4..8);
        assert!(!is_highlighted("I like tea", 2, 6));
    }

    #[test]
    fn unwraps_selection_including_delimiters() {
        let edit = toggle_highlight("I ==like== tea", 2, 10);
        assert_eq!(edit.value, "I like tea");
        assert_eq!(edit.selection, 2..6);
    }

    #[test]
    fn unwraps_flanked_selection() {
        assert!(is_highlighted("I ==like== tea", 4, 8));
        let edit = toggle_highlight("I ==like== tea", 4, 8);
        assert_eq!(edit.value, "I like tea");
        assert_eq!(edit.selection, 2..6);
    }

    #[test]
    fn toggling_twice_restores_value() {
        let once = toggle_highlight("чай и кофе", 0, 3);
        assert_eq!(once.value, "==чай== и кофе");
        let twice = toggle_highlight(&once.value, once.selection.start, once.selection.end);
        assert_eq!(twice.value, "чай и кофе");
        assert_eq!(twice.selection, 0..3);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let edit = toggle_highlight("tea", 10, 1);
        assert_eq!(edit.value, "t==ea==");
    }
}
