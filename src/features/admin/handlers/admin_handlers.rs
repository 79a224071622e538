use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::admin::dtos::{AdminMapDto, AdminProfileDto, AdminReportDto};
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List all reports for moderation
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Reports with reporter and violation type", body = ApiResponse<Vec<AdminReportDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AdminReportDto>>>> {
    let (reports, total) = service
        .list_reports(pagination.offset(), pagination.limit())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Delete a report
#[utoipa::path(
    delete,
    path = "/api/admin/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_report(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_report(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}

/// List all profiles for moderation
#[utoipa::path(
    get,
    path = "/api/admin/profiles",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Profiles with report counts", body = ApiResponse<Vec<AdminProfileDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_profiles(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AdminProfileDto>>>> {
    let (profiles, total) = service
        .list_profiles(pagination.offset(), pagination.limit())
        .await?;
    Ok(Json(ApiResponse::success(
        Some(profiles),
        None,
        Some(Meta { total }),
    )))
}

/// Delete a profile
///
/// Reports submitted by the profile survive anonymously.
#[utoipa::path(
    delete,
    path = "/api/admin/profiles/{id}",
    params(
        ("id" = String, Path, description = "Identity subject id")
    ),
    responses(
        (status = 200, description = "Profile deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Profile not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_profile(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_profile(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Profile deleted".to_string()),
        None,
    )))
}

/// Get map markers for the moderation map
#[utoipa::path(
    get,
    path = "/api/admin/map",
    responses(
        (status = 200, description = "Markers and bounding box", body = ApiResponse<AdminMapDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_map(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<AdminMapDto>>> {
    let map = service.get_map_data().await?;
    Ok(Json(ApiResponse::success(Some(map), None, None)))
}
