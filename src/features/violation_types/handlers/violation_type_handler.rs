use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::violation_types::dtos::{
    CreateViolationTypeDto, UpdateViolationTypeDto, ViolationTypeResponseDto,
};
use crate::features::violation_types::services::ViolationTypeService;
use crate::shared::types::ApiResponse;

/// List all violation types
///
/// Public: the capture flow needs the catalogue before a citizen has
/// any session.
#[utoipa::path(
    get,
    path = "/api/violation-types",
    responses(
        (status = 200, description = "List of violation types", body = ApiResponse<Vec<ViolationTypeResponseDto>>),
    ),
    tag = "violation-types"
)]
pub async fn list_violation_types(
    State(service): State<Arc<ViolationTypeService>>,
) -> Result<Json<ApiResponse<Vec<ViolationTypeResponseDto>>>> {
    let types = service.list().await?;
    Ok(Json(ApiResponse::success(Some(types), None, None)))
}

/// Get a violation type by id
#[utoipa::path(
    get,
    path = "/api/violation-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Violation type id")
    ),
    responses(
        (status = 200, description = "Violation type found", body = ApiResponse<ViolationTypeResponseDto>),
        (status = 404, description = "Violation type not found")
    ),
    tag = "violation-types"
)]
pub async fn get_violation_type(
    State(service): State<Arc<ViolationTypeService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ViolationTypeResponseDto>>> {
    let vt = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(vt), None, None)))
}

/// Create a violation type (admin)
#[utoipa::path(
    post,
    path = "/api/admin/violation-types",
    request_body = CreateViolationTypeDto,
    responses(
        (status = 201, description = "Violation type created", body = ApiResponse<ViolationTypeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_violation_type(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ViolationTypeService>>,
    AppJson(dto): AppJson<CreateViolationTypeDto>,
) -> Result<(StatusCode, Json<ApiResponse<ViolationTypeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let vt = service.create(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(vt), None, None)),
    ))
}

/// Update a violation type (admin)
#[utoipa::path(
    patch,
    path = "/api/admin/violation-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Violation type id")
    ),
    request_body = UpdateViolationTypeDto,
    responses(
        (status = 200, description = "Violation type updated", body = ApiResponse<ViolationTypeResponseDto>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Violation type not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_violation_type(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ViolationTypeService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateViolationTypeDto>,
) -> Result<Json<ApiResponse<ViolationTypeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let vt = service.update(id, &dto).await?;
    Ok(Json(ApiResponse::success(Some(vt), None, None)))
}

/// Delete a violation type (admin)
#[utoipa::path(
    delete,
    path = "/api/admin/violation-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Violation type id")
    ),
    responses(
        (status = 200, description = "Violation type deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Violation type not found"),
        (status = 409, description = "Violation type still referenced by reports")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_violation_type(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ViolationTypeService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Violation type deleted".to_string()),
        None,
    )))
}
