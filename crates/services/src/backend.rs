//! HTTP plumbing shared by the backend services.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use storage::SessionStore;
use tracing::debug;

use crate::error::{ErrorShape, ServiceError};

/// Base URL plus the session that supplies the token and interface language.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl BackendClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    #[must_use]
    pub fn with_client(http: Client, base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Request carrying only the interface language cookie.
    pub(crate) async fn public(&self, method: Method, path: &str) -> RequestBuilder {
        let lang = self.session.ui_language().await;
        self.http
            .request(method, self.url(path))
            .header(header::COOKIE, format!("lang={}", lang.code()))
    }

    /// Request carrying the bearer token and the language cookie.
    ///
    /// Fails with `ServiceError::Unauthorized` before any network call when no
    /// token is stored.
    pub(crate) async fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ServiceError> {
        let token = self
            .session
            .token()
            .await?
            .ok_or(ServiceError::Unauthorized)?;
        Ok(self.public(method, path).await.bearer_auth(token))
    }

    pub(crate) fn raw(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }
}

/// Send and decode a JSON success body.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ServiceError> {
    let response = request.send().await?;
    let (status, body) = read_body(response).await?;
    if !status.is_success() {
        return Err(error_from_response(status, &body));
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Send and discard any success body.
pub(crate) async fn send_unit(request: RequestBuilder) -> Result<(), ServiceError> {
    let response = request.send().await?;
    let (status, body) = read_body(response).await?;
    if !status.is_success() {
        return Err(error_from_response(status, &body));
    }
    Ok(())
}

pub(crate) async fn read_body(response: Response) -> Result<(StatusCode, Vec<u8>), ServiceError> {
    let status = response.status();
    let body = response.bytes().await?.to_vec();
    debug!(%status, bytes = body.len(), "response received");
    Ok((status, body))
}

/// Map a non-success response onto the uniform error type.
#[must_use]
pub fn error_from_response(status: StatusCode, body: &[u8]) -> ServiceError {
    match ErrorShape::from_body(body) {
        Some(shape) => ServiceError::Api { status, shape },
        None if status == StatusCode::UNAUTHORIZED => ServiceError::Unauthorized,
        None => ServiceError::HttpStatus(status),
    }
}
