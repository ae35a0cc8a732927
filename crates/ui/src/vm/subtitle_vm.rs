use lingo_core::subtitles::{WindowLayout, visible_window};
use services::SubtitleTrack;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CueLineVm {
    pub text: String,
    pub active: bool,
}

/// A fetched track plus the scrubber position.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleVm {
    track: SubtitleTrack,
    position: f64,
    duration: f64,
}

impl SubtitleVm {
    #[must_use]
    pub fn new(track: SubtitleTrack) -> Self {
        let duration = track
            .cues
            .iter()
            .filter_map(|cue| cue.end_seconds().ok())
            .fold(0.0_f64, f64::max);
        Self {
            track,
            position: 0.0,
            duration,
        }
    }

    #[must_use]
    pub fn video_id(&self) -> &str {
        &self.track.video_id
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.track.language
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// End of the last cue, in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Move the playhead, clamped to the track.
    pub fn seek(&mut self, seconds: f64) {
        self.position = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration)
        } else {
            0.0
        };
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format_clock(self.position)
    }

    #[must_use]
    pub fn visible_lines(&self, layout: WindowLayout) -> Vec<CueLineVm> {
        visible_window(&self.track.cues, self.position, layout)
            .into_iter()
            .map(|visible| CueLineVm {
                text: visible.cue.text.clone(),
                active: visible.active,
            })
            .collect()
    }
}

fn format_clock(seconds: f64) -> String {
    // Truncation to whole seconds is intended.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.max(0.0) as u64;
    let (hours, minutes, secs) = (total / 3600, total / 60 % 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
