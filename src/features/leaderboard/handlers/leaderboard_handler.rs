use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::leaderboard::dtos::LeaderboardResponseDto;
use crate::features::leaderboard::services::LeaderboardService;
use crate::shared::types::ApiResponse;

/// Get the community leaderboard
///
/// Reporters ranked by attributed report count, descending.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Leaderboard", body = ApiResponse<LeaderboardResponseDto>),
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(service): State<Arc<LeaderboardService>>,
) -> Result<Json<ApiResponse<LeaderboardResponseDto>>> {
    let leaderboard = service.get_leaderboard().await?;
    Ok(Json(ApiResponse::success(Some(leaderboard), None, None)))
}
