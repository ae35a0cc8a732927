use lingo_core::model::context_language_name;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use storage::SessionStore;

use crate::backend::{error_from_response, read_body};
use crate::error::ServiceError;

/// Example sentence with its translation; the looked-up word is wrapped in `==`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSentence {
    pub text: String,
    #[serde(default)]
    pub text_translate: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContextRequest<'a> {
    word: &'a str,
    native_lang: &'static str,
    learning_lang: &'static str,
}

#[derive(Debug, Deserialize)]
struct ContextResponse {
    #[serde(default)]
    sentences: Vec<ContextSentence>,
}

#[derive(Clone)]
pub struct ContextService {
    client: Client,
    url: Option<String>,
    session: SessionStore,
}

impl ContextService {
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

    /// Example sentences that use `word`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotConfigured` when no URL is set, or the
    /// service's error otherwise.
    pub async fn sentences(&self, word: &str) -> Result<Vec<ContextSentence>, ServiceError> {
        let url = self
            .url
            .as_deref()
            .ok_or(ServiceError::NotConfigured("context"))?;
        let native = self.session.native_language().await;
        let learning = self.session.learning_language().await;

        let response = self
            .client
            .post(url)
            .json(&ContextRequest {
                word: word.trim(),
                native_lang: context_language_name(&native),
                learning_lang: context_language_name(&learning),
            })
            .send()
            .await?;

        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        let body: ContextResponse = serde_json::from_slice(&body)?;
        Ok(body.sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_language_names() {
        let payload = serde_json::to_value(ContextRequest {
            word: "chat",
            native_lang: context_language_name("ru"),
            learning_lang: context_language_name("fr"),
        })
        .unwrap();
        assert_eq!(
            payload,
            serde_json::json!({"word": "chat", "nativeLang": "russian", "learningLang": "french"})
        );
    }

    #[test]
    fn decodes_sentences() {
        let body: ContextResponse = serde_json::from_str(
            r#"{"sentences":[{"text":"Le ==chat== dort.","textTranslate":"Кот спит."}]}"#,
        )
        .unwrap();
        assert_eq!(body.sentences[0].text_translate, "Кот спит.");
    }
}
