use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::clients::{IdentityClient, IdentitySession};
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, MeResponseDto, RefreshTokenRequestDto,
    RefreshTokenResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::services::ProfileService;

/// Service for authentication operations (register, login, logout)
///
/// Account state lives at the external identity provider; this service
/// orchestrates the provider calls and keeps the local profile row in
/// step so reports and the leaderboard can join on it.
pub struct AuthService {
    identity_client: Arc<IdentityClient>,
    profile_service: Arc<ProfileService>,
}

impl AuthService {
    pub fn new(identity_client: Arc<IdentityClient>, profile_service: Arc<ProfileService>) -> Self {
        Self {
            identity_client,
            profile_service,
        }
    }

    /// Register a new user
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let session = self
            .identity_client
            .sign_up(&dto.email, &dto.password)
            .await?;

        self.ensure_profile(&session).await?;

        Ok(session_to_response(session))
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let session = self
            .identity_client
            .sign_in(&dto.email, &dto.password)
            .await?;

        // Accounts registered before this service existed may not have
        // a profile row yet
        self.ensure_profile(&session).await?;

        Ok(session_to_response(session))
    }

    /// Get current user info (for /me endpoint)
    pub async fn get_current_user(&self, user: AuthenticatedUser) -> Result<MeResponseDto> {
        Ok(user.into())
    }

    /// Refresh access token using refresh token
    pub async fn refresh_token(
        &self,
        dto: RefreshTokenRequestDto,
    ) -> Result<RefreshTokenResponseDto> {
        let session = self.identity_client.refresh(&dto.refresh_token).await?;

        Ok(RefreshTokenResponseDto {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            refresh_token: session.refresh_token,
        })
    }

    /// Revoke the current session at the provider
    pub async fn logout(&self, access_token: &str) -> Result<()> {
        self.identity_client.sign_out(access_token).await
    }

    async fn ensure_profile(&self, session: &IdentitySession) -> Result<()> {
        let display_name = default_display_name(&session.user.email);
        self.profile_service
            .ensure_exists(&session.user.id, &display_name)
            .await
    }
}

/// Initial display name for a fresh profile: the local part of the email
fn default_display_name(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("citizen")
        .to_string()
}

fn session_to_response(session: IdentitySession) -> AuthResponseDto {
    AuthResponseDto {
        access_token: session.access_token,
        token_type: session.token_type,
        expires_in: session.expires_in,
        refresh_token: session.refresh_token,
        user: session.user.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display_name() {
        assert_eq!(default_display_name("jane.doe@example.com"), "jane.doe");
        assert_eq!(default_display_name("@example.com"), "citizen");
        assert_eq!(default_display_name("no-at-sign"), "no-at-sign");
    }
}
