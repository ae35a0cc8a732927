use lingo_core::model::{Card, CardDraft, CardId, FolderId, Paged};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::backend::{BackendClient, send_json, send_unit};
use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardsPage {
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    current_page: u32,
    #[serde(default)]
    total_pages: u32,
}

impl From<CardsPage> for Paged<Card> {
    fn from(page: CardsPage) -> Self {
        Paged {
            items: page.cards,
            current_page: page.current_page,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CardUpdateBody<'a> {
    card_id: CardId,
    #[serde(flatten)]
    draft: &'a CardDraft,
}

#[derive(Clone)]
pub struct CardService {
    backend: BackendClient,
}

impl CardService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn folder_page(&self, folder: FolderId, page: u32) -> Result<Paged<Card>, ServiceError> {
        let request = self
            .backend
            .authorized(Method::POST, "/card/from-folder")
            .await?
            .query(&[("page", u64::from(page)), ("folderId", folder.value())])
            .json(&json!({}));
        let page: CardsPage = send_json(request).await?;
        Ok(page.into())
    }

    /// One page over every card of the user.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn all_page(&self, page: u32) -> Result<Paged<Card>, ServiceError> {
        let request = self
            .backend
            .authorized(Method::GET, "/card/get/all")
            .await?
            .query(&[("page", page)]);
        let page: CardsPage = send_json(request).await?;
        Ok(page.into())
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn get(&self, id: CardId) -> Result<Card, ServiceError> {
        let request = self
            .backend
            .authorized(Method::POST, "/card/get")
            .await?
            .query(&[("cardId", id.value())]);
        send_json(request).await
    }

    /// Validate and create a card.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Card` when the draft is invalid, or the backend's error.
    pub async fn create(&self, draft: CardDraft) -> Result<(), ServiceError> {
        let card = draft.validate()?;
        let request = self
            .backend
            .authorized(Method::POST, "/card/create")
            .await?
            .json(&card);
        send_unit(request).await?;
        info!(is_image = card.draft().is_image, "card created");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Card` when the draft is invalid, or the backend's error.
    pub async fn update(&self, id: CardId, draft: CardDraft) -> Result<(), ServiceError> {
        let card = draft.validate()?;
        let request = self
            .backend
            .authorized(Method::PATCH, "/card/update")
            .await?
            .query(&[("cardId", id.value())])
            .json(&CardUpdateBody {
                card_id: id,
                draft: card.draft(),
            });
        send_unit(request).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    pub async fn delete(&self, id: CardId) -> Result<(), ServiceError> {
        let request = self
            .backend
            .authorized(Method::DELETE, "/card/delete")
            .await?
            .query(&[("cardId", id.value())]);
        send_unit(request).await?;
        info!(card = %id, "card deleted");
        Ok(())
    }
}
