use lingo_core::model::{Credentials, LanguageOption, Profile, ProfileUpdate, Registration};
use reqwest::Method;
use serde::Deserialize;
use tracing::{info, warn};

use crate::backend::{BackendClient, error_from_response, read_body, send_json};
use crate::error::ServiceError;

/// Outcome of the route guard for screens that need a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Clone)]
pub struct AuthService {
    backend: BackendClient,
}

impl AuthService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }

    /// Create an account and sign in with the returned token.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Account` for local validation failures, or the
    /// backend's error otherwise.
    pub async fn register(&self, registration: &Registration) -> Result<(), ServiceError> {
        registration.validate()?;
        let request = self
            .backend
            .public(Method::POST, "/auth/register")
            .await
            .json(registration);
        let response: AuthResponse = send_json(request).await?;
        self.store_token(&response.token).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Account` for local validation failures, or the
    /// backend's error otherwise.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ServiceError> {
        credentials.validate()?;
        let request = self
            .backend
            .public(Method::POST, "/auth/login")
            .await
            .json(credentials);
        let response: AuthResponse = send_json(request).await?;
        self.store_token(&response.token).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the token cannot be removed.
    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.backend.session().clear_token().await?;
        info!("signed out");
        Ok(())
    }

    /// Ask the backend whether `token` is still accepted.
    ///
    /// Network failures and non-200 answers both count as invalid.
    pub async fn validate_token(&self, token: &str) -> bool {
        let request = self
            .backend
            .raw(Method::GET, "/api/utils/validate-token")
            .bearer_auth(token);
        match request.send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(err) => {
                warn!(error = %err, "token validation request failed");
                false
            }
        }
    }

    /// Decide whether a protected screen may render.
    ///
    /// No stored token redirects without a network call. A rejected token is
    /// cleared before redirecting.
    pub async fn guard(&self) -> Access {
        let token = match self.backend.session().token().await {
            Ok(Some(token)) => token,
            Ok(None) => return Access::RedirectToLogin,
            Err(err) => {
                warn!(error = %err, "failed to read token");
                return Access::RedirectToLogin;
            }
        };

        if self.validate_token(&token).await {
            return Access::Granted;
        }
        if let Err(err) = self.backend.session().clear_token().await {
            warn!(error = %err, "failed to clear rejected token");
        }
        Access::RedirectToLogin
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn profile(&self) -> Result<Profile, ServiceError> {
        let request = self.backend.authorized(Method::GET, "/profile").await?;
        send_json(request).await
    }

    /// Update the profile. The backend answers with a fresh token, which is stored.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Account` for local validation failures, or the
    /// backend's error otherwise.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ServiceError> {
        update.validate()?;
        let request = self
            .backend
            .authorized(Method::PATCH, "/profile")
            .await?
            .json(update);
        let response = request.send().await?;
        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }
        // An empty body keeps the current token.
        if let Ok(AuthResponse { token }) = serde_json::from_slice::<AuthResponse>(&body) {
            self.store_token(&token).await?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails or the body cannot be decoded.
    pub async fn languages(&self) -> Result<Vec<LanguageOption>, ServiceError> {
        send_json(self.backend.raw(Method::GET, "/api/languages/all")).await
    }

    async fn store_token(&self, token: &str) -> Result<(), ServiceError> {
        if token.trim().is_empty() {
            return Err(ServiceError::EmptyResponse { service: "auth" });
        }
        self.backend.session().set_token(token).await?;
        info!("signed in");
        Ok(())
    }
}
