use serde::{Deserialize, Serialize};

use crate::model::card::Card;

/// Self-assessed recall difficulty submitted after reviewing a card.
///
/// Interval scheduling happens on the backend; the client only reports the grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Result of asking the backend for the next card to review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDraw {
    Card(Card),
    /// Nothing is due; the backend answers with an error-shaped body whose
    /// `field` is null.
    NoCardsDue { message: Option<String> },
}

impl ReviewDraw {
    #[must_use]
    pub fn card(&self) -> Option<&Card> {
        match self {
            ReviewDraw::Card(card) => Some(card),
            ReviewDraw::NoCardsDue { .. } => None,
        }
    }
}
