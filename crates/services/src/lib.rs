#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod backend;
pub mod card_service;
pub mod config;
pub mod context_service;
pub mod error;
pub mod folder_service;
pub mod picture_service;
pub mod reader_service;
pub mod review_service;
pub mod subtitle_service;
pub mod translate_service;

pub use app_services::AppServices;
pub use auth_service::{Access, AuthService};
pub use backend::BackendClient;
pub use card_service::CardService;
pub use config::ServiceConfig;
pub use context_service::{ContextSentence, ContextService};
pub use error::{AppServicesError, ErrorShape, ServiceError};
pub use folder_service::FolderService;
pub use picture_service::PictureService;
pub use reader_service::ReaderService;
pub use review_service::ReviewService;
pub use subtitle_service::{SubtitleService, SubtitleTrack};
pub use translate_service::TranslateService;
