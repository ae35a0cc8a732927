use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::FolderId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FolderError {
    #[error("folder name cannot be empty")]
    EmptyName,
}

//
// ─── TYPES ─────────────────────────────────────────────────────────────────────
//

/// Trimmed, non-empty folder name used for create/rename requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FolderName(String);

impl FolderName {
    /// # Errors
    ///
    /// Returns `FolderError::EmptyName` if the name is blank.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FolderError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FolderError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Time until the nearest due review, as computed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDelay {
    pub value: u32,
    pub unit: String,
}

impl ReviewDelay {
    #[must_use]
    pub fn is_due_now(&self) -> bool {
        self.value == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub card_count: u32,
    #[serde(default)]
    pub nearest_review_time: Option<ReviewDelay>,
}

/// Aggregate over every folder of the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderOverview {
    #[serde(default)]
    pub card_count: u32,
    #[serde(default)]
    pub nearest_review_time: Option<ReviewDelay>,
}

/// One page of a server-side paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T> Paged<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_name_is_trimmed() {
        assert_eq!(FolderName::new("  Verbs ").unwrap().as_str(), "Verbs");
        assert_eq!(FolderName::new(" \t").unwrap_err(), FolderError::EmptyName);
    }

    #[test]
    fn folder_decodes_with_review_delay() {
        let json = r#"{"id":4,"name":"Food","cardCount":12,"nearestReviewTime":{"value":0,"unit":"min"}}"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert_eq!(folder.card_count, 12);
        assert!(folder.nearest_review_time.unwrap().is_due_now());
    }

    #[test]
    fn paged_navigation_flags() {
        let page = Paged::<u8> {
            items: vec![],
            current_page: 1,
            total_pages: 3,
        };
        assert!(page.has_next());
        assert!(!page.has_previous());
    }
}
