use std::sync::Arc;

use dioxus::prelude::*;
use lingo_core::text::{Reader, ReaderChanges};
use services::{
    AuthService, CardService, ContextService, FolderService, PictureService, ReaderService,
    SubtitleService, TranslateService,
};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::warn;

use crate::vm::ReaderIntent;

pub trait UiApp: Send + Sync {
    /// Reader as restored from persisted state before launch.
    fn initial_reader(&self) -> Reader;

    fn reader(&self) -> Arc<ReaderService>;
    fn auth(&self) -> Arc<AuthService>;
    fn folders(&self) -> Arc<FolderService>;
    fn cards(&self) -> Arc<CardService>;
    fn translate(&self) -> Arc<TranslateService>;
    fn context(&self) -> Arc<ContextService>;
    fn pictures(&self) -> Arc<PictureService>;
    fn subtitles(&self) -> Arc<SubtitleService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_reader: Reader,

    reader: Arc<ReaderService>,
    auth: Arc<AuthService>,
    folders: Arc<FolderService>,
    cards: Arc<CardService>,
    translate: Arc<TranslateService>,
    context: Arc<ContextService>,
    pictures: Arc<PictureService>,
    subtitles: Arc<SubtitleService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_reader: app.initial_reader(),
            reader: app.reader(),
            auth: app.auth(),
            folders: app.folders(),
            cards: app.cards(),
            translate: app.translate(),
            context: app.context(),
            pictures: app.pictures(),
            subtitles: app.subtitles(),
        }
    }

    #[must_use]
    pub fn initial_reader(&self) -> Reader {
        self.initial_reader.clone()
    }

    #[must_use]
    pub fn reader(&self) -> Arc<ReaderService> {
        Arc::clone(&self.reader)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn folders(&self) -> Arc<FolderService> {
        Arc::clone(&self.folders)
    }

    #[must_use]
    pub fn cards(&self) -> Arc<CardService> {
        Arc::clone(&self.cards)
    }

    #[must_use]
    pub fn translate(&self) -> Arc<TranslateService> {
        Arc::clone(&self.translate)
    }

    #[must_use]
    pub fn context(&self) -> Arc<ContextService> {
        Arc::clone(&self.context)
    }

    #[must_use]
    pub fn pictures(&self) -> Arc<PictureService> {
        Arc::clone(&self.pictures)
    }

    #[must_use]
    pub fn subtitles(&self) -> Arc<SubtitleService> {
        Arc::clone(&self.subtitles)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

pub const SAVE_FAILED: &str = "Your reading position could not be saved.";

/// Reader state shared by every view for the lifetime of the window.
///
/// Lives above the router so leaving the text page keeps the reading position
/// and lets queued writes finish.
#[derive(Clone, Copy, PartialEq)]
pub struct ReaderState {
    pub reader: Signal<Reader>,
    /// Outcome of the most recent write.
    pub save_error: Signal<Option<&'static str>>,
    dispatch: Callback<ReaderIntent>,
}

impl ReaderState {
    /// Apply `intent` and queue the changed values for persistence.
    pub fn dispatch(&self, intent: ReaderIntent) {
        self.dispatch.call(intent);
    }

    #[must_use]
    pub fn dispatcher(&self) -> Callback<ReaderIntent> {
        self.dispatch
    }
}

type PendingWrite = (Reader, ReaderChanges);

/// Provide the shared reader, seeded from the persisted state.
///
/// Writes go through one task, in dispatch order.
pub fn use_reader_state_provider() -> ReaderState {
    let ctx = use_context::<AppContext>();
    let mut reader = use_signal(|| ctx.initial_reader());
    let save_error = use_signal(|| None::<&'static str>);
    let writes = use_hook(|| {
        let (tx, rx) = unbounded_channel::<PendingWrite>();
        spawn(write_in_order(ctx.reader(), rx, save_error));
        tx
    });

    let dispatch = use_callback(move |intent: ReaderIntent| {
        let changes = intent.apply(&mut reader.write());
        if changes.is_empty() {
            return;
        }
        let snapshot = reader.peek().clone();
        if writes.send((snapshot, changes)).is_err() {
            warn!("reader writer stopped, change kept in memory only");
        }
    });

    use_context_provider(move || ReaderState {
        reader,
        save_error,
        dispatch,
    })
}

async fn write_in_order(
    service: Arc<ReaderService>,
    mut pending: UnboundedReceiver<PendingWrite>,
    mut save_error: Signal<Option<&'static str>>,
) {
    while let Some((mut snapshot, mut changes)) = pending.recv().await {
        // Queued snapshots are superseded by the newest; their keys accumulate.
        while let Ok((newer, more)) = pending.try_recv() {
            snapshot = newer;
            changes |= more;
        }
        match service.persist(&snapshot, changes).await {
            Ok(()) => save_error.set(None),
            Err(err) => {
                warn!(error = %err, "reading state not saved");
                save_error.set(Some(SAVE_FAILED));
            }
        }
    }
}
