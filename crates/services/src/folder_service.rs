use lingo_core::model::{Folder, FolderId, FolderName, FolderOverview, Paged};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::backend::{BackendClient, send_json, send_unit};
use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoldersPage {
    #[serde(default)]
    folders: Vec<Folder>,
    #[serde(default)]
    current_page: u32,
    #[serde(default)]
    total_pages: u32,
}

impl From<FoldersPage> for Paged<Folder> {
    fn from(page: FoldersPage) -> Self {
        Paged {
            items: page.folders,
            current_page: page.current_page,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
struct FolderNameBody<'a> {
    name: &'a str,
}

#[derive(Clone)]
pub struct FolderService {
    backend: BackendClient,
}

impl FolderService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// One page of the user's folders.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn page(&self, page: u32) -> Result<Paged<Folder>, ServiceError> {
        let request = self
            .backend
            .authorized(Method::POST, "/folder/get")
            .await?
            .query(&[("page", page)])
            .json(&json!({}));
        let page: FoldersPage = send_json(request).await?;
        Ok(page.into())
    }

    /// Card count and nearest review across every folder.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn overview(&self) -> Result<FolderOverview, ServiceError> {
        let request = self.backend.authorized(Method::GET, "/folder/get/all").await?;
        send_json(request).await
    }

    /// Every folder, unpaginated; used by folder pickers.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn all(&self) -> Result<Vec<Folder>, ServiceError> {
        let request = self
            .backend
            .authorized(Method::GET, "/folder/get/all-folders")
            .await?;
        send_json(request).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Folder` for a blank name, or the backend's error.
    pub async fn create(&self, name: &str) -> Result<(), ServiceError> {
        let name = FolderName::new(name)?;
        let request = self
            .backend
            .authorized(Method::POST, "/folder/create")
            .await?
            .json(&FolderNameBody {
                name: name.as_str(),
            });
        send_unit(request).await?;
        info!(name = name.as_str(), "folder created");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Folder` for a blank name, or the backend's error.
    pub async fn rename(&self, id: FolderId, name: &str) -> Result<(), ServiceError> {
        let name = FolderName::new(name)?;
        let request = self
            .backend
            .authorized(Method::PATCH, "/folder/changeName")
            .await?
            .query(&[("folderId", id.value())])
            .json(&FolderNameBody {
                name: name.as_str(),
            });
        send_unit(request).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    pub async fn delete(&self, id: FolderId) -> Result<(), ServiceError> {
        let request = self
            .backend
            .authorized(Method::DELETE, "/folder/delete")
            .await?
            .query(&[("folderId", id.value())]);
        send_unit(request).await?;
        info!(folder = %id, "folder deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_folder_page() {
        let page: FoldersPage = serde_json::from_str(
            r#"{"folders":[{"id":4,"name":"Verbs","cardCount":12,
                "nearestReviewTime":{"value":3,"unit":"hours"}}],
                "currentPage":1,"totalPages":2}"#,
        )
        .unwrap();
        let paged: Paged<Folder> = page.into();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.items[0].id, FolderId::new(4));
        assert!(paged.has_next());
        assert!(!paged.has_previous());
    }
}
