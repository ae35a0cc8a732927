use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use async_trait::async_trait;
use lingo_core::text::{PageSize, ViewMode};
use storage::{InMemoryStore, KeyValueStore, Storage, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};
use crate::context::SAVE_FAILED;
use crate::vm::ReaderIntent;

/// Writes of short values take longer than writes of long ones.
#[derive(Clone, Default)]
struct UnevenStore {
    inner: InMemoryStore,
}

#[async_trait]
impl KeyValueStore for UnevenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() < 3 {
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

/// Every write fails until `healthy` is flipped.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryStore,
    healthy: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.healthy.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StorageError::Connection("disk full".into()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

async fn seeded(text: &str, page_size: usize, page_index: usize, mode: ViewMode) -> Storage {
    let storage = Storage::in_memory();
    let reading = storage.reading_state();
    reading.save_text(text).await.expect("save text");
    reading
        .save_page_size(PageSize::new(page_size).expect("page size"))
        .await
        .expect("save page size");
    reading.save_page_index(page_index).await.expect("save index");
    reading.save_view_mode(mode).await.expect("save mode");
    storage
}

#[tokio::test(flavor = "current_thread")]
async fn text_view_starts_in_edit_mode() {
    let mut harness = setup_view_harness(ViewKind::Text).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("<textarea"), "missing editor in {html}");
    assert!(html.contains("Read mode"), "missing read button in {html}");
    assert!(html.contains("Clear"), "missing clear button in {html}");
    assert!(!html.contains("Sentences per page"), "unexpected reader in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn read_mode_renders_the_current_page_only() {
    let storage = seeded("Hello world. How are you? Fine!", 1, 0, ViewMode::Read).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Text, storage).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Hello world."), "missing sentence in {html}");
    assert!(!html.contains("How are you?"), "second page leaked into {html}");
    assert!(html.contains("1 / 3"), "missing counter in {html}");
    for size in PageSize::OPTIONS {
        let option = format!("value=\"{size}\"");
        assert!(html.contains(&option), "missing page size {size} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn read_mode_with_empty_text_shows_placeholder() {
    let storage = seeded("", 5, 0, ViewMode::Read).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Text, storage).await;
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("There is no text to read yet."),
        "missing placeholder in {html}"
    );
    assert!(!html.contains(" / "), "unexpected counter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn stale_page_index_is_clamped_on_render() {
    let storage = seeded("A. B. C. D.", 2, 4, ViewMode::Read).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Text, storage).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("2 / 2"), "index not clamped in {html}");
    assert!(html.contains("C."), "missing last page in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subtitles_view_renders_link_entry() {
    let mut harness = setup_view_harness(ViewKind::Subtitles).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Subtitles"), "missing heading in {html}");
    assert!(html.contains("Load subtitles"), "missing fetch button in {html}");
    assert!(!html.contains("cue active"), "unexpected cues in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn custom_page_size_is_shown_as_selected() {
    let storage = seeded("A. B. C. D. E. F. G. H.", 7, 0, ViewMode::Read).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Text, storage).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("value=\"7\""), "missing current size in {html}");
    assert!(html.contains("1 / 2"), "unexpected paging in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn later_text_wins_even_when_earlier_write_is_slow() {
    let storage = Storage {
        kv: Arc::new(UnevenStore::default()),
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Text, storage.clone()).await;
    harness.rebuild();
    let state = harness.reader.get();

    state.dispatch(ReaderIntent::SetText("ab".into()));
    // let the slow write of "ab" start before the next edit arrives
    let _ = tokio::time::timeout(Duration::from_millis(5), harness.dom.wait_for_work()).await;
    state.dispatch(ReaderIntent::SetText("abc".into()));
    harness.settle(6).await;

    assert_eq!(state.reader.peek().raw_text(), "abc");
    let reloaded = storage.reading_state().load().await;
    assert_eq!(reloaded.text, "abc");
}

#[tokio::test(flavor = "current_thread")]
async fn save_banner_reflects_the_latest_write() {
    let store = Arc::new(FlakyStore::default());
    let kv: Arc<dyn KeyValueStore> = store.clone();
    let mut harness = setup_view_harness_with_storage(ViewKind::Text, Storage { kv }).await;
    harness.rebuild();
    let state = harness.reader.get();

    state.dispatch(ReaderIntent::SetText("First.".into()));
    harness.settle(2).await;
    assert_eq!(*state.save_error.peek(), Some(SAVE_FAILED));
    assert!(harness.render().contains(SAVE_FAILED));

    store.healthy.store(true, std::sync::atomic::Ordering::SeqCst);
    state.dispatch(ReaderIntent::SetText("Second.".into()));
    harness.settle(2).await;
    assert_eq!(*state.save_error.peek(), None);
    assert_eq!(storage_text(&harness.storage).await, "Second.");
}

async fn storage_text(storage: &Storage) -> String {
    storage.reading_state().load().await.text
}

#[tokio::test(flavor = "current_thread")]
async fn capture_without_token_asks_to_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Capture("Hund")).await;
    harness.rebuild();
    harness.settle(2).await;
    let html = harness.render();
    assert!(html.contains("Sign in to save cards"), "missing sign-in notice in {html}");
    assert!(!html.contains("Save card"), "form shown without a session in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn capture_with_rejected_token_clears_it() {
    let storage = Storage::in_memory();
    storage.session().set_token("expired").await.expect("seed token");
    let mut harness = setup_view_harness_with_storage(ViewKind::Capture("Hund"), storage).await;
    harness.rebuild();
    harness.settle(6).await;
    let html = harness.render();
    assert!(html.contains("Sign in to save cards"), "missing sign-in notice in {html}");
    let token = harness.storage.session().token().await.expect("read token");
    assert_eq!(token, None);
}
