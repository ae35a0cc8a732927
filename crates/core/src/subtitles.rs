//! Timed subtitle cues and the window of cues shown around the playhead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubtitleError {
    #[error("invalid timestamp {0:?}, expected HH:MM:SS,mmm")]
    InvalidTimestamp(String),
}

/// A cue as delivered by the subtitle service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub start: String,
    pub end: String,
    pub text: String,
}

impl Cue {
    /// # Errors
    ///
    /// Returns `SubtitleError::InvalidTimestamp` when `start` is malformed.
    pub fn start_seconds(&self) -> Result<f64, SubtitleError> {
        parse_timestamp(&self.start)
    }

    /// # Errors
    ///
    /// Returns `SubtitleError::InvalidTimestamp` when `end` is malformed.
    pub fn end_seconds(&self) -> Result<f64, SubtitleError> {
        parse_timestamp(&self.end)
    }
}

/// Parse `HH:MM:SS,mmm` into seconds.
///
/// # Errors
///
/// Returns `SubtitleError::InvalidTimestamp` for anything else.
pub fn parse_timestamp(raw: &str) -> Result<f64, SubtitleError> {
    let invalid = || SubtitleError::InvalidTimestamp(raw.to_owned());
    let (hms, millis) = raw.trim().split_once(',').ok_or_else(invalid)?;

    let mut parts = hms.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let field = |part: &str| part.parse::<u32>().map_err(|_| invalid());
    let (hours, minutes, seconds, millis) = (field(h)?, field(m)?, field(s)?, field(millis)?);

    Ok(f64::from(hours) * 3600.0
        + f64::from(minutes) * 60.0
        + f64::from(seconds)
        + f64::from(millis) / 1000.0)
}

/// How many cues surround the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub before: usize,
    pub after: usize,
    /// Cues shown before playback reaches the first cue.
    pub head: usize,
    /// Cues shown once playback is past the last cue start.
    pub tail: usize,
}

impl WindowLayout {
    pub const DESKTOP: WindowLayout = WindowLayout {
        before: 2,
        after: 4,
        head: 5,
        tail: 5,
    };

    pub const MOBILE: WindowLayout = WindowLayout {
        before: 1,
        after: 2,
        head: 3,
        tail: 2,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleCue<'a> {
    pub cue: &'a Cue,
    pub active: bool,
}

/// Cues to display at playback position `now` (seconds).
///
/// The active cue is the first one starting after `now`, so the upcoming
/// line is the one emphasised. Cues with malformed start times never count
/// as upcoming.
#[must_use]
pub fn visible_window(cues: &[Cue], now: f64, layout: WindowLayout) -> Vec<VisibleCue<'_>> {
    if cues.is_empty() {
        return Vec::new();
    }

    let next = cues
        .iter()
        .position(|cue| cue.start_seconds().is_ok_and(|start| start > now));

    let (range, active) = match next {
        Some(0) => (0..layout.head.min(cues.len()), 0),
        None => {
            let start = cues.len().saturating_sub(layout.tail);
            (start..cues.len(), cues.len() - 1)
        }
        Some(next) => {
            let start = next.saturating_sub(layout.before);
            let end = (next + layout.after).min(cues.len());
            (start..end, next)
        }
    };

    range
        .map(|index| VisibleCue {
            cue: &cues[index],
            active: index == active,
        })
        .collect()
}

const VIDEO_ID_LEN: usize = 11;

/// Extract the 11-character video id from a YouTube watch, short or embed URL.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<&str> {
    let line = url.lines().next().unwrap_or_default();

    let rest = (0..=line.len())
        .rev()
        .filter(|&at| line.is_char_boundary(at))
        .find_map(|at| marker_end(&line[at..]).map(|len| &line[at + len..]))?;

    let id_len = rest.find(['#', '&', '?']).unwrap_or(rest.len());
    let id = &rest[..id_len];
    (id.chars().count() == VIDEO_ID_LEN).then_some(id)
}

// Length of the id-prefix marker at the start of `s`, if any.
fn marker_end(s: &str) -> Option<usize> {
    const FIXED: [&str; 4] = ["v/", "embed/", "watch?v=", "&v="];

    // "youtu" + any one char + "be/"
    if let Some(after) = s.strip_prefix("youtu") {
        let mut chars = after.chars();
        if let Some(any) = chars.next() {
            if chars.as_str().starts_with("be/") {
                return Some("youtu".len() + any.len_utf8() + "be/".len());
            }
        }
    }
    // "u/" + one word char + "/"
    if let Some(after) = s.strip_prefix("u/") {
        let mut chars = after.chars();
        if let (Some(word), Some('/')) = (chars.next(), chars.next()) {
            if word.is_ascii_alphanumeric() || word == '_' {
                return Some("u/".len() + 1 + "/".len());
            }
        }
    }
    FIXED
        .iter()
        .find(|marker| s.starts_with(**marker))
        .map(|marker| marker.len())
}
