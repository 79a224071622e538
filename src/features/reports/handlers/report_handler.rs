use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::reports::dtos::{ReportDetailResponseDto, ReportResponseDto};
use crate::features::reports::handlers::ReportState;
use crate::shared::types::ApiResponse;

/// List the public report feed, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Report feed", body = ApiResponse<Vec<ReportResponseDto>>),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<ReportState>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = state.reports.list_feed().await?;
    Ok(Json(ApiResponse::success(Some(reports), None, None)))
}

/// Get a single report
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report id")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportDetailResponseDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportDetailResponseDto>>> {
    let report = state.reports.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(report), None, None)))
}
