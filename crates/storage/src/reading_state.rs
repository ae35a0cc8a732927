//! Typed access to the persisted reading state.
//!
//! Each value lives under its own key and is read on its own. A missing or
//! unparsable value falls back to its default; it never poisons the others.

use std::sync::Arc;

use lingo_core::text::{PageSize, ViewMode};
use tracing::warn;

use crate::repository::{KeyValueStore, StorageError};

pub const SAVED_TEXT_KEY: &str = "savedText";
pub const SENTENCES_PER_PAGE_KEY: &str = "sentencesPerPage";
pub const CURRENT_PAGE_KEY: &str = "currentTextPage";
pub const VIEW_MODE_KEY: &str = "textViewMode";

/// Reader values as last written, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedReading {
    pub text: String,
    pub page_size: PageSize,
    pub page_index: usize,
    pub view_mode: ViewMode,
}

#[derive(Clone)]
pub struct ReadingStateStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ReadingStateStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load all four values. Read failures are logged and defaulted per key.
    pub async fn load(&self) -> PersistedReading {
        PersistedReading {
            text: self.read_or_default(SAVED_TEXT_KEY, |raw| Some(raw.to_owned())).await,
            page_size: self
                .read_or_default(SENTENCES_PER_PAGE_KEY, parse_page_size)
                .await,
            page_index: self
                .read_or_default(CURRENT_PAGE_KEY, |raw| raw.trim().parse().ok())
                .await,
            view_mode: self.read_or_default(VIEW_MODE_KEY, ViewMode::parse).await,
        }
    }

    /// Persist the working text; an empty text removes the key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn save_text(&self, text: &str) -> Result<(), StorageError> {
        if text.is_empty() {
            self.kv.remove(SAVED_TEXT_KEY).await
        } else {
            self.kv.set(SAVED_TEXT_KEY, text).await
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn save_page_size(&self, size: PageSize) -> Result<(), StorageError> {
        self.kv
            .set(SENTENCES_PER_PAGE_KEY, &size.get().to_string())
            .await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn save_page_index(&self, index: usize) -> Result<(), StorageError> {
        self.kv.set(CURRENT_PAGE_KEY, &index.to_string()).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn save_view_mode(&self, mode: ViewMode) -> Result<(), StorageError> {
        self.kv.set(VIEW_MODE_KEY, mode.as_str()).await
    }

    async fn read_or_default<T, F>(&self, key: &str, parse: F) -> T
    where
        T: Default,
        F: FnOnce(&str) -> Option<T>,
    {
        match self.kv.get(key).await {
            Ok(Some(raw)) => parse(&raw).unwrap_or_else(|| {
                warn!(key, value = %raw, "unparsable persisted value, using default");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(err) => {
                warn!(key, error = %err, "failed to read persisted value, using default");
                T::default()
            }
        }
    }
}

fn parse_page_size(raw: &str) -> Option<PageSize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| PageSize::new(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;

    fn store() -> (Arc<InMemoryStore>, ReadingStateStore) {
        let kv = Arc::new(InMemoryStore::new());
        let reading = ReadingStateStore::new(kv.clone());
        (kv, reading)
    }

    #[tokio::test]
    async fn empty_store_yields_defaults() {
        let (_, reading) = store();
        let loaded = reading.load().await;
        assert_eq!(loaded, PersistedReading::default());
        assert_eq!(loaded.page_size.get(), 5);
        assert_eq!(loaded.view_mode, ViewMode::Edit);
    }

    #[tokio::test]
    async fn values_round_trip() {
        let (_, reading) = store();
        reading.save_text("Test sentence.").await.unwrap();
        reading
            .save_page_size(PageSize::new(10).unwrap())
            .await
            .unwrap();
        reading.save_page_index(3).await.unwrap();
        reading.save_view_mode(ViewMode::Read).await.unwrap();

        let loaded = reading.load().await;
        assert_eq!(loaded.text, "Test sentence.");
        assert_eq!(loaded.page_size.get(), 10);
        assert_eq!(loaded.page_index, 3);
        assert_eq!(loaded.view_mode, ViewMode::Read);
    }

    #[tokio::test]
    async fn bad_values_fall_back_independently() {
        let (kv, reading) = store();
        kv.set(SAVED_TEXT_KEY, "Kept.").await.unwrap();
        kv.set(SENTENCES_PER_PAGE_KEY, "0").await.unwrap();
        kv.set(CURRENT_PAGE_KEY, "-1").await.unwrap();
        kv.set(VIEW_MODE_KEY, "slideshow").await.unwrap();

        let loaded = reading.load().await;
        assert_eq!(loaded.text, "Kept.");
        assert_eq!(loaded.page_size, PageSize::DEFAULT);
        assert_eq!(loaded.page_index, 0);
        assert_eq!(loaded.view_mode, ViewMode::Edit);
    }

    #[tokio::test]
    async fn saving_empty_text_removes_key() {
        let (kv, reading) = store();
        reading.save_text("Something.").await.unwrap();
        reading.save_text("").await.unwrap();
        assert_eq!(kv.get(SAVED_TEXT_KEY).await.unwrap(), None);
    }
}
