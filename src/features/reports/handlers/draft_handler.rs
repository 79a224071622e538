use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, MaybeUser};
use crate::features::reports::dtos::{
    DraftResponseDto, ReportDetailResponseDto, SetLocationDto, UpdateDraftDto,
};
use crate::features::reports::handlers::ReportState;
use crate::features::reports::models::Coordinates;
use crate::features::reports::services::DraftUpdate;
use crate::shared::types::ApiResponse;

/// Get a report draft
#[utoipa::path(
    get,
    path = "/api/reports/drafts/{id}",
    params(
        ("id" = Uuid, Path, description = "Draft id")
    ),
    responses(
        (status = 200, description = "Draft found", body = ApiResponse<DraftResponseDto>),
        (status = 404, description = "Draft not found or expired")
    ),
    tag = "reports"
)]
pub async fn get_draft(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    let view = state.drafts.get(id).await?;
    Ok(Json(ApiResponse::success(Some(view.into()), None, None)))
}

/// Edit a report draft
///
/// Title, description, violation type, severity and location name can
/// change freely until submission; user edits override any
/// recognition-supplied text.
#[utoipa::path(
    patch,
    path = "/api/reports/drafts/{id}",
    params(
        ("id" = Uuid, Path, description = "Draft id")
    ),
    request_body = UpdateDraftDto,
    responses(
        (status = 200, description = "Draft updated", body = ApiResponse<DraftResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Draft not found or expired")
    ),
    tag = "reports"
)]
pub async fn update_draft(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateDraftDto>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let view = state
        .drafts
        .update(
            id,
            DraftUpdate {
                title: dto.title,
                description: dto.description,
                violation_type_id: dto.violation_type_id,
                severity: dto.severity,
                location_name: dto.location_name,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(Some(view.into()), None, None)))
}

/// Record the device position fix for a draft
///
/// Coordinates are acquired once per flow; they are the one hard
/// precondition for submission.
#[utoipa::path(
    put,
    path = "/api/reports/drafts/{id}/location",
    params(
        ("id" = Uuid, Path, description = "Draft id")
    ),
    request_body = SetLocationDto,
    responses(
        (status = 200, description = "Coordinates recorded", body = ApiResponse<DraftResponseDto>),
        (status = 400, description = "Coordinates out of range"),
        (status = 404, description = "Draft not found or expired"),
        (status = 409, description = "Coordinates already recorded")
    ),
    tag = "reports"
)]
pub async fn set_draft_location(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetLocationDto>,
) -> Result<Json<ApiResponse<DraftResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let view = state
        .drafts
        .set_coordinates(
            id,
            Coordinates {
                latitude: dto.latitude,
                longitude: dto.longitude,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(Some(view.into()), None, None)))
}

/// Discard a report draft (the "retake" path)
#[utoipa::path(
    delete,
    path = "/api/reports/drafts/{id}",
    params(
        ("id" = Uuid, Path, description = "Draft id")
    ),
    responses(
        (status = 200, description = "Draft discarded"),
        (status = 404, description = "Draft not found or expired")
    ),
    tag = "reports"
)]
pub async fn discard_draft(
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.drafts.remove(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Draft discarded".to_string()),
        None,
    )))
}

/// Submit a report draft
///
/// Runs the submission pipeline: validate, upload the frame, resolve
/// its public URL, insert the report row. A session, when present,
/// attributes the report; without one the report is anonymous.
#[utoipa::path(
    post,
    path = "/api/reports/drafts/{id}/submit",
    params(
        ("id" = Uuid, Path, description = "Draft id")
    ),
    responses(
        (status = 201, description = "Report persisted", body = ApiResponse<ReportDetailResponseDto>),
        (status = 400, description = "Draft is missing a required field"),
        (status = 404, description = "Draft not found or expired"),
        (status = 409, description = "A submission is already in progress"),
        (status = 502, description = "Image upload failed")
    ),
    tag = "reports"
)]
pub async fn submit_draft(
    MaybeUser(user): MaybeUser,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<ReportDetailResponseDto>>)> {
    let report = state.submission.submit(id, user.as_ref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Report submitted. Thank you for making the roads safer.".to_string()),
            None,
        )),
    ))
}
