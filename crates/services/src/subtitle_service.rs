use lingo_core::subtitles::{Cue, extract_video_id};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use storage::SessionStore;
use tracing::info;

use crate::backend::{error_from_response, read_body};
use crate::error::ServiceError;

/// Subtitles fetched for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    pub video_id: String,
    pub language: String,
    pub cues: Vec<Cue>,
}

#[derive(Debug, Serialize)]
struct SubtitleRequest<'a> {
    url: &'a str,
    lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubtitleResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    subtitles: Vec<Cue>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct SubtitleService {
    client: Client,
    url: Option<String>,
    session: SessionStore,
}

impl SubtitleService {
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

    /// Fetch subtitles in the learning language for a YouTube URL.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rejected` for a URL without a video id or when
    /// the service reports a failure, `NotConfigured` when no URL is set.
    pub async fn fetch(&self, video_url: &str) -> Result<SubtitleTrack, ServiceError> {
        let video_id = extract_video_id(video_url)
            .ok_or_else(|| ServiceError::Rejected("not a YouTube video link".into()))?
            .to_owned();
        let url = self
            .url
            .as_deref()
            .ok_or(ServiceError::NotConfigured("subtitles"))?;
        let lang = self.session.learning_language().await;

        let response = self
            .client
            .post(url)
            .json(&SubtitleRequest {
                url: video_url.trim(),
                lang: &lang,
            })
            .send()
            .await?;

        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        let body: SubtitleResponse = serde_json::from_slice(&body)?;
        let track = into_track(video_id, body)?;
        info!(video = %track.video_id, cues = track.cues.len(), "subtitles loaded");
        Ok(track)
    }
}

fn into_track(video_id: String, body: SubtitleResponse) -> Result<SubtitleTrack, ServiceError> {
    if !body.status.is_empty() && body.status != "success" {
        return Err(ServiceError::Rejected(
            body.message.unwrap_or_else(|| body.status.clone()),
        ));
    }
    Ok(SubtitleTrack {
        video_id,
        language: body.language,
        cues: body.subtitles,
    })
}
