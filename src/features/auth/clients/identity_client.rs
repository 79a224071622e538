use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};

/// User object as returned by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    pub email: String,
}

/// Session (token pair) as returned by the identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: IdentityUser,
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Error body of a GoTrue-style provider
#[derive(Debug, Deserialize)]
struct ProviderErrorResponse {
    #[serde(default, alias = "msg", alias = "error_description")]
    message: String,
}

/// Client for the external identity provider (GoTrue-compatible
/// email/password API). Sign-up, password grant, refresh and sign-out
/// are all single HTTP calls; token verification happens locally in
/// `SessionValidator`.
pub struct IdentityClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl IdentityClient {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            base_url: config.provider_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a new user account
    ///
    /// Returns Conflict if the email is already registered
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession> {
        let url = format!("{}/signup", self.base_url);

        tracing::debug!("Creating user at identity provider: {}", email);

        let response = self
            .http_client
            .post(&url)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider sign-up request failed: {}", e);
                AppError::ExternalServiceError(format!("Failed to create user: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            let session = response.json::<IdentitySession>().await.map_err(|e| {
                tracing::error!("Failed to parse sign-up response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse sign-up response: {}", e))
            })?;

            tracing::info!("Created user: {}", session.user.id);
            return Ok(session);
        }

        let body = response.text().await.unwrap_or_default();

        // Duplicate registrations come back as 422 from GoTrue
        if status.as_u16() == 422 || body.contains("already registered") {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        Err(Self::provider_error(status.as_u16(), &body))
    }

    /// Exchange email/password credentials for a session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession> {
        let url = format!("{}/token?grant_type=password", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider sign-in request failed: {}", e);
                AppError::ExternalServiceError(format!("Failed to sign in: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<IdentitySession>().await.map_err(|e| {
                tracing::error!("Failed to parse sign-in response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse sign-in response: {}", e))
            });
        }

        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 400 || status.as_u16() == 401 {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Err(Self::provider_error(status.as_u16(), &body))
    }

    /// Exchange a refresh token for a fresh session
    pub async fn refresh(&self, refresh_token: &str) -> Result<IdentitySession> {
        let url = format!("{}/token?grant_type=refresh_token", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider refresh request failed: {}", e);
                AppError::ExternalServiceError(format!("Failed to refresh token: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<IdentitySession>().await.map_err(|e| {
                tracing::error!("Failed to parse refresh response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse refresh response: {}", e))
            });
        }

        if status.as_u16() == 400 || status.as_u16() == 401 {
            return Err(AppError::Unauthorized(
                "Invalid or expired refresh token".to_string(),
            ));
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::provider_error(status.as_u16(), &body))
    }

    /// Revoke the session behind an access token
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/logout", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider sign-out request failed: {}", e);
                AppError::ExternalServiceError(format!("Failed to sign out: {}", e))
            })?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(Self::provider_error(status, &body))
    }

    fn provider_error(status: u16, body: &str) -> AppError {
        let message = serde_json::from_str::<ProviderErrorResponse>(body)
            .ok()
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Identity provider returned HTTP {}", status));

        AppError::ExternalServiceError(message)
    }
}
