use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::clients::IdentityUser;
use crate::features::auth::model::AuthenticatedUser;

/// Request DTO for user registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Request DTO for login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for token refresh
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// User part of an auth response
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthUserDto {
    pub id: String,
    pub email: String,
}

impl From<IdentityUser> for AuthUserDto {
    fn from(user: IdentityUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Response DTO for register/login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponseDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: AuthUserDto,
}

/// Response DTO for token refresh
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshTokenResponseDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

/// Response DTO for the current session (`/api/auth/me`)
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponseDto {
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
    pub is_admin: bool,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        let is_admin = user.is_admin();
        Self {
            id: user.id,
            email: user.email,
            roles: user.roles,
            is_admin,
        }
    }
}
