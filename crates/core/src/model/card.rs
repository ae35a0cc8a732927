use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::media::is_valid_image_url;
use crate::model::ids::{CardId, FolderId};

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// A vocabulary card as returned by the backend.
///
/// When `is_image` is set, `text_translation` holds an image URL instead of a
/// translated phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "cardId", alias = "id")]
    pub id: CardId,
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    pub text: String,
    pub text_translation: String,
    #[serde(default)]
    pub is_image: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_word: Option<String>,
}

/// Unvalidated input for creating or updating a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub folder_id: Option<FolderId>,
    pub text: String,
    pub text_translation: String,
    pub is_image: bool,
}

impl CardDraft {
    /// Pre-fill a text card from a captured selection.
    #[must_use]
    pub fn from_selection(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Build an image card whose back side is a picture URL.
    #[must_use]
    pub fn image(folder_id: Option<FolderId>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            folder_id,
            text: text.into(),
            text_translation: url.into(),
            is_image: true,
        }
    }

    /// Check the draft before it is sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns `CardError` when the front text or translation is blank, or when an
    /// image card does not carry an acceptable image URL.
    pub fn validate(self) -> Result<ValidatedCard, CardError> {
        if self.text.trim().is_empty() {
            return Err(CardError::EmptyText);
        }
        if self.text_translation.trim().is_empty() {
            return Err(CardError::EmptyTranslation);
        }
        if self.is_image && !is_valid_image_url(&self.text_translation) {
            return Err(CardError::InvalidImageUrl(self.text_translation));
        }
        Ok(ValidatedCard(self))
    }
}

/// A draft that passed [`CardDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedCard(CardDraft);

impl ValidatedCard {
    #[must_use]
    pub fn draft(&self) -> &CardDraft {
        &self.0
    }

    #[must_use]
    pub fn into_draft(self) -> CardDraft {
        self.0
    }
}

//
// ─── CARD VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card text cannot be empty")]
    EmptyText,

    #[error("card translation cannot be empty")]
    EmptyTranslation,

    #[error("not a usable image URL: {0}")]
    InvalidImageUrl(String),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
