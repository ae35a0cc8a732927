//! Auth token and language preferences kept between runs.

use std::sync::Arc;

use lingo_core::model::UiLanguage;
use tracing::warn;

use crate::repository::{KeyValueStore, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const UI_LANGUAGE_KEY: &str = "lang";
pub const LEARNING_LANGUAGE_KEY: &str = "learningLang";
pub const NATIVE_LANGUAGE_KEY: &str = "nativeLang";

pub const DEFAULT_LEARNING_LANGUAGE: &str = "en";
pub const DEFAULT_NATIVE_LANGUAGE: &str = "ru";

#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Bearer token of the signed-in user; blank tokens count as absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .kv
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.trim().is_empty()))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.kv.set(TOKEN_KEY, token).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn clear_token(&self) -> Result<(), StorageError> {
        self.kv.remove(TOKEN_KEY).await
    }

    /// Interface language; unknown or missing codes fall back to the default.
    pub async fn ui_language(&self) -> UiLanguage {
        match self.kv.get(UI_LANGUAGE_KEY).await {
            Ok(Some(code)) => UiLanguage::from_code(&code).unwrap_or_else(|| {
                warn!(code = %code, "unknown ui language, using default");
                UiLanguage::default()
            }),
            Ok(None) => UiLanguage::default(),
            Err(err) => {
                warn!(error = %err, "failed to read ui language, using default");
                UiLanguage::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn set_ui_language(&self, language: UiLanguage) -> Result<(), StorageError> {
        self.kv.set(UI_LANGUAGE_KEY, language.code()).await
    }

    /// Code of the language being studied, `en` when never set.
    pub async fn learning_language(&self) -> String {
        self.language_code(LEARNING_LANGUAGE_KEY, DEFAULT_LEARNING_LANGUAGE)
            .await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn set_learning_language(&self, code: &str) -> Result<(), StorageError> {
        self.kv.set(LEARNING_LANGUAGE_KEY, code.trim()).await
    }

    /// Code of the user's own language, `ru` when never set.
    pub async fn native_language(&self) -> String {
        self.language_code(NATIVE_LANGUAGE_KEY, DEFAULT_NATIVE_LANGUAGE)
            .await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn set_native_language(&self, code: &str) -> Result<(), StorageError> {
        self.kv.set(NATIVE_LANGUAGE_KEY, code.trim()).await
    }

    async fn language_code(&self, key: &str, default: &str) -> String {
        match self.kv.get(key).await {
            Ok(Some(code)) if !code.trim().is_empty() => code.trim().to_owned(),
            Ok(_) => default.to_owned(),
            Err(err) => {
                warn!(key, error = %err, "failed to read language, using default");
                default.to_owned()
            }
        }
    }
}
