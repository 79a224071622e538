use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::{
    ProfileResponseDto, ProfileWithReportsDto, UpdateProfileDto,
};
use crate::features::profiles::services::ProfileService;
use crate::shared::types::ApiResponse;

/// Get the signed-in citizen's profile and report history
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Own profile with report history", body = ApiResponse<ProfileWithReportsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_own_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
) -> Result<Json<ApiResponse<ProfileWithReportsDto>>> {
    let profile = service.get_with_reports(&user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Update the signed-in citizen's display name
#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "profiles",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_own_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<ProfileService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = service.update_display_name(&user.id, &dto).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Get a public profile and its report history
#[utoipa::path(
    get,
    path = "/api/profiles/{user_id}",
    params(
        ("user_id" = String, Path, description = "Identity subject id of the profile")
    ),
    responses(
        (status = 200, description = "Public profile with report history", body = ApiResponse<ProfileWithReportsDto>),
        (status = 404, description = "Profile not found")
    ),
    tag = "profiles"
)]
pub async fn get_public_profile(
    State(service): State<Arc<ProfileService>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<ProfileWithReportsDto>>> {
    let profile = service.get_with_reports(&user_id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
