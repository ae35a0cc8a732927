//! Shared error types for the services crate.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use lingo_core::model::{AccountError, CardError, FolderError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Error body returned by the backend and the auxiliary services.
///
/// `field` names the rejected input; it is null for errors that are not tied
/// to a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorShape {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rejected_value: Option<serde_json::Value>,
}

impl ErrorShape {
    /// Decode an error body, `None` when it is not error-shaped.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let shape: Self = serde_json::from_slice(body).ok()?;
        (shape.field.is_some() || shape.message.is_some()).then_some(shape)
    }

    /// The server message, or `fallback` when the body carried none.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_owned()
    }
}

/// Errors emitted by the backend and auxiliary service clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("{0} service is not configured")]
    NotConfigured(&'static str),
    #[error("not signed in")]
    Unauthorized,
    #[error("request failed with status {status}: {}", .shape.user_message("no message"))]
    Api { status: StatusCode, shape: ErrorShape },
    #[error("request failed with status {0}")]
    HttpStatus(StatusCode),
    #[error("{service} service returned an empty response")]
    EmptyResponse { service: &'static str },
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Folder(#[from] FolderError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Text to show the user: the server message when there is one, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Api { shape, .. } => shape.user_message(fallback),
            ServiceError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            ServiceError::Card(err) => err.to_string(),
            ServiceError::Folder(err) => err.to_string(),
            ServiceError::Account(err) => err.to_string(),
            _ => fallback.to_owned(),
        }
    }

    /// Input field the error refers to, when the backend named one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            ServiceError::Api { shape, .. } => shape.field.as_deref(),
            ServiceError::Account(err) => Some(err.field()),
            _ => None,
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
