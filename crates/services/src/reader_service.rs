use lingo_core::text::{Reader, ReaderChanges};
use storage::ReadingStateStore;
use storage::repository::StorageError;
use tracing::{debug, warn};

/// Joins the reader state machine with its persisted values.
#[derive(Clone)]
pub struct ReaderService {
    store: ReadingStateStore,
}

impl ReaderService {
    #[must_use]
    pub fn new(store: ReadingStateStore) -> Self {
        Self { store }
    }

    /// Rebuild the reader from whatever was last persisted.
    pub async fn load(&self) -> Reader {
        let persisted = self.store.load().await;
        let reader = Reader::restore(
            persisted.text,
            persisted.page_size,
            persisted.page_index,
            persisted.view_mode,
        );
        debug!(
            pages = reader.pages().len(),
            page = reader.current_page_index(),
            mode = reader.view_mode().as_str(),
            "reader restored"
        );
        reader
    }

    /// Write the values named in `changes`, each independently.
    ///
    /// Every key is attempted even when an earlier write fails; the first
    /// failure is returned after all writes ran.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError` encountered.
    pub async fn persist(&self, reader: &Reader, changes: ReaderChanges) -> Result<(), StorageError> {
        let mut first_error = None;
        let mut record = |key: &'static str, result: Result<(), StorageError>| {
            if let Err(err) = result {
                warn!(key, error = %err, "failed to persist reader value");
                first_error.get_or_insert(err);
            }
        };

        if changes.text {
            record("text", self.store.save_text(reader.raw_text()).await);
        }
        if changes.page_size {
            record("page_size", self.store.save_page_size(reader.page_size()).await);
        }
        if changes.page_index {
            record(
                "page_index",
                self.store.save_page_index(reader.current_page_index()).await,
            );
        }
        if changes.view_mode {
            record("view_mode", self.store.save_view_mode(reader.view_mode()).await);
        }

        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lingo_core::text::{PageSize, ViewMode};
    use std::sync::Arc;
    use storage::repository::{InMemoryStore, KeyValueStore};
    use storage::{Storage, reading_state};

    fn service() -> (Storage, ReaderService) {
        let storage = Storage::in_memory();
        let service = ReaderService::new(storage.reading_state());
        (storage, service)
    }

    #[tokio::test]
    async fn text_survives_reload() {
        let (storage, service) = service();
        let mut reader = service.load().await;
        let changes = reader.set_text("Test sentence.");
        service.persist(&reader, changes).await.unwrap();

        let reloaded = ReaderService::new(storage.reading_state()).load().await;
        assert_eq!(reloaded.raw_text(), "Test sentence.");
        assert_eq!(reloaded.page_size(), PageSize::DEFAULT);
        assert_eq!(reloaded.view_mode(), ViewMode::Edit);
    }

    #[tokio::test]
    async fn only_changed_keys_are_written() {
        let (storage, service) = service();
        let mut reader = service.load().await;
        let changes = reader.enter_read_mode();
        service.persist(&reader, changes).await.unwrap();

        assert_eq!(
            storage.kv.get(reading_state::VIEW_MODE_KEY).await.unwrap().as_deref(),
            Some("read")
        );
        assert_eq!(storage.kv.get(reading_state::CURRENT_PAGE_KEY).await.unwrap(), None);
        assert_eq!(storage.kv.get(reading_state::SAVED_TEXT_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn stale_index_is_clamped_on_load() {
        let (storage, service) = service();
        let reading = storage.reading_state();
        reading.save_text("A. B. C. D.").await.unwrap();
        reading.save_page_size(PageSize::new(2).unwrap()).await.unwrap();
        reading.save_page_index(4).await.unwrap();

        let reader = service.load().await;
        assert_eq!(reader.current_page_index(), 1);
    }

    #[derive(Default)]
    struct FailingTextStore {
        inner: InMemoryStore,
    }

    #[async_trait]
    impl KeyValueStore for FailingTextStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == reading_state::SAVED_TEXT_KEY {
                return Err(StorageError::Connection("quota exceeded".into()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn failed_write_does_not_block_other_keys() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(FailingTextStore::default());
        let storage = Storage { kv };
        let service = ReaderService::new(storage.reading_state());

        let mut reader = Reader::new();
        let changes = reader.set_text("One. Two.") | reader.enter_read_mode();
        let err = service.persist(&reader, changes).await.unwrap_err();
        assert!(matches!(err, StorageError::Connection(_)));

        let reloaded = service.load().await;
        assert_eq!(reloaded.raw_text(), "");
        assert_eq!(reloaded.view_mode(), ViewMode::Read);
    }
}
