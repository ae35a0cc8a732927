use lingo_core::model::{Card, CardId, Difficulty, FolderId, ReviewDraw};
use reqwest::{Method, StatusCode};

use crate::backend::{BackendClient, error_from_response, read_body, send_unit};
use crate::error::{ErrorShape, ServiceError};

#[derive(Clone)]
pub struct ReviewService {
    backend: BackendClient,
}

impl ReviewService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Next due card across all folders.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body is neither a
    /// card nor the "nothing due" answer.
    pub async fn draw_all(&self) -> Result<ReviewDraw, ServiceError> {
        let request = self
            .backend
            .authorized(Method::GET, "/card/get/review-all")
            .await?;
        let (status, body) = read_body(request.send().await?).await?;
        decode_draw(status, &body)
    }

    /// Next due card in one folder.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body is neither a
    /// card nor the "nothing due" answer.
    pub async fn draw_from_folder(&self, folder: FolderId) -> Result<ReviewDraw, ServiceError> {
        let request = self
            .backend
            .authorized(Method::GET, "/card/get/review-folder")
            .await?
            .query(&[("folderId", folder.value())]);
        let (status, body) = read_body(request.send().await?).await?;
        decode_draw(status, &body)
    }

    /// Report how hard the card was; the backend reschedules it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    pub async fn submit(&self, card: CardId, difficulty: Difficulty) -> Result<(), ServiceError> {
        let request = self
            .backend
            .authorized(Method::POST, "/api/space-repetition")
            .await?
            .query(&[
                ("cardId", card.value().to_string()),
                ("difficulty", difficulty.as_str().to_owned()),
            ]);
        send_unit(request).await
    }
}

/// Interpret a review draw response.
///
/// An error-shaped body whose `field` is null means nothing is due, whatever
/// the status code.
///
/// # Errors
///
/// Returns the backend error for field errors and other failures.
pub fn decode_draw(status: StatusCode, body: &[u8]) -> Result<ReviewDraw, ServiceError> {
    if let Some(shape) = ErrorShape::from_body(body) {
        return match shape.field {
            None => Ok(ReviewDraw::NoCardsDue {
                message: shape.message,
            }),
            Some(_) => Err(ServiceError::Api { status, shape }),
        };
    }
    if !status.is_success() {
        return Err(error_from_response(status, body));
    }
    let card: Card = serde_json::from_slice(body)?;
    Ok(ReviewDraw::Card(card))
}
