use lingo_core::media::filter_image_candidates;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{error_from_response, read_body};
use crate::error::ServiceError;

pub const DEFAULT_MAX_RESULTS: u32 = 5;

#[derive(Debug, Serialize)]
struct PictureRequest<'a> {
    query: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct PictureResponse {
    #[serde(default)]
    pictures: Vec<Picture>,
}

#[derive(Debug, Deserialize)]
struct Picture {
    url: String,
}

/// Image search for picture cards.
#[derive(Clone)]
pub struct PictureService {
    client: Client,
    url: Option<String>,
}

impl PictureService {
    #[must_use]
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Image URLs for `query`, screened for loadable images.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotConfigured` when no URL is set, or the
    /// service's error otherwise.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<String>, ServiceError> {
        let url = self
            .url
            .as_deref()
            .ok_or(ServiceError::NotConfigured("pictures"))?;

        let response = self
            .client
            .post(url)
            .json(&PictureRequest {
                query: query.trim(),
                max_results,
            })
            .send()
            .await?;

        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        let body: PictureResponse = serde_json::from_slice(&body)?;
        let total = body.pictures.len();
        let kept = filter_image_candidates(body.pictures.into_iter().map(|p| p.url));
        debug!(total, kept = kept.len(), "picture results screened");
        Ok(kept)
    }
}
