//! Estimate of how many sentences fit in the reading area.
//!
//! The result is a hint; it never overrides a page size the user picked.

use crate::text::pages::PageSize;

/// Upper bound for a fitted page size.
pub const MAX_AUTO_FIT_SENTENCES: usize = 15;

/// Rendered heights in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitMeasurement {
    pub container_height: f64,
    /// Height of the first rendered sentence; `None` when nothing is rendered.
    pub sentence_height: Option<f64>,
}

/// `floor(container / sentence)`, bounded to `1..=MAX_AUTO_FIT_SENTENCES`.
#[must_use]
pub fn suggest_page_size(measurement: FitMeasurement) -> PageSize {
    let Some(sentence_height) = measurement
        .sentence_height
        .filter(|height| height.is_finite() && *height > 0.0)
    else {
        return fitted(MAX_AUTO_FIT_SENTENCES);
    };

    let ratio = (measurement.container_height / sentence_height).floor();
    if ratio.is_nan() || ratio < 1.0 {
        return fitted(1);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let fits = ratio.min(MAX_AUTO_FIT_SENTENCES as f64) as usize;
    fitted(fits)
}

fn fitted(sentences: usize) -> PageSize {
    PageSize::new(sentences.clamp(1, MAX_AUTO_FIT_SENTENCES)).unwrap_or_default()
}
