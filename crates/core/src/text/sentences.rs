//! Sentence segmentation for the reading view.

/// Characters that end a sentence when followed by whitespace.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Split `text` into sentences, borrowing from the input.
///
/// A boundary sits right after a terminator that is followed by at least one
/// whitespace character; the whole whitespace run is consumed by the boundary.
/// A trailing fragment without a terminator is its own final sentence. Pieces
/// that are empty after trimming are dropped; kept pieces are not trimmed.
#[must_use]
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&ch) {
            continue;
        }
        if !chars.peek().is_some_and(|&(_, next)| is_boundary_space(next)) {
            continue;
        }

        push_sentence(&mut out, &text[start..idx + ch.len_utf8()]);

        start = text.len();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !is_boundary_space(next) {
                start = next_idx;
                break;
            }
            chars.next();
        }
    }

    push_sentence(&mut out, &text[start..]);
    out
}

/// Owned variant of [`sentences`].
#[must_use]
pub fn split_into_sentences(text: &str) -> Vec<String> {
    sentences(text).into_iter().map(str::to_owned).collect()
}

/// ECMAScript `\s`: Unicode `White_Space` plus U+FEFF, minus U+0085.
fn is_boundary_space(ch: char) -> bool {
    match ch {
        '\u{feff}' => true,
        '\u{85}' => false,
        _ => ch.is_whitespace(),
    }
}

fn push_sentence<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    if !piece.trim_matches(is_boundary_space).is_empty() {
        out.push(piece);
    }
}
