use std::sync::Arc;

use lingo_core::text::Reader;
use storage::Storage;

use crate::auth_service::AuthService;
use crate::backend::BackendClient;
use crate::card_service::CardService;
use crate::config::ServiceConfig;
use crate::context_service::ContextService;
use crate::error::AppServicesError;
use crate::folder_service::FolderService;
use crate::picture_service::PictureService;
use crate::reader_service::ReaderService;
use crate::review_service::ReviewService;
use crate::subtitle_service::SubtitleService;
use crate::translate_service::TranslateService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    reader: Arc<ReaderService>,
    auth: Arc<AuthService>,
    folders: Arc<FolderService>,
    cards: Arc<CardService>,
    reviews: Arc<ReviewService>,
    translate: Arc<TranslateService>,
    context: Arc<ContextService>,
    pictures: Arc<PictureService>,
    subtitles: Arc<SubtitleService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, config: ServiceConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, config))
    }

    /// Build services over an existing storage backend.
    #[must_use]
    pub fn from_storage(storage: Storage, config: ServiceConfig) -> Self {
        let session = storage.session();
        let backend = BackendClient::new(config.backend_url, session.clone());

        Self {
            reader: Arc::new(ReaderService::new(storage.reading_state())),
            auth: Arc::new(AuthService::new(backend.clone())),
            folders: Arc::new(FolderService::new(backend.clone())),
            cards: Arc::new(CardService::new(backend.clone())),
            reviews: Arc::new(ReviewService::new(backend)),
            translate: Arc::new(TranslateService::new(config.translate_url, session.clone())),
            context: Arc::new(ContextService::new(config.context_url, session.clone())),
            pictures: Arc::new(PictureService::new(config.pictures_url)),
            subtitles: Arc::new(SubtitleService::new(config.subtitles_url, session)),
            storage,
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Reader restored from persisted state.
    pub async fn initial_reader(&self) -> Reader {
        self.reader.load().await
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
    pub fn reviews(&self) -> Arc<ReviewService> {
        Arc::clone(&self.reviews)
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
