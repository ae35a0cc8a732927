use reqwest::Client;
use serde::{Deserialize, Serialize};
use storage::SessionStore;
use tracing::debug;

use crate::backend::{error_from_response, read_body};
use crate::error::ServiceError;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    alternatives: u32,
    api_key: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Machine translation from the learning language into the native language.
#[derive(Clone)]
pub struct TranslateService {
    client: Client,
    url: Option<String>,
    session: SessionStore,
}

impl TranslateService {
    #[must_use]
    pub fn new(url: Option<String>, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            url,
            session,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Translate `text` using the stored language pair.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotConfigured` when no URL is set, or the
    /// service's error otherwise.
    pub async fn translate(&self, text: &str) -> Result<String, ServiceError> {
        let source = self.session.learning_language().await;
        let target = self.session.native_language().await;
        self.translate_pair(text, &source, &target).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::NotConfigured` when no URL is set, or the
    /// service's error otherwise.
    pub async fn translate_pair(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ServiceError> {
        let url = self
            .url
            .as_deref()
            .ok_or(ServiceError::NotConfigured("translation"))?;

        debug!(source, target, chars = text.chars().count(), "translating");
        let response = self
            .client
            .post(url)
            .json(&TranslateRequest {
                q: text,
                source,
                target,
                format: "text",
                alternatives: 0,
                api_key: "",
            })
            .send()
            .await?;

        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        let body: TranslateResponse = serde_json::from_slice(&body)?;
        Ok(body.translated_text)
    }
}
