use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::AppError;
use crate::features::reports::dtos::{CaptureImageDto, CaptureResponseDto, PlateDetectionDto};
use crate::features::reports::handlers::ReportState;
use crate::shared::types::ApiResponse;

const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Capture a violation photo and open a report draft
///
/// Accepts multipart/form-data with an `image` field (JPEG or PNG).
/// The frame is run through the external plate recognition endpoint;
/// its outcome only pre-fills the draft and never blocks the capture.
#[utoipa::path(
    post,
    path = "/api/reports/capture",
    tag = "reports",
    request_body(
        content = CaptureImageDto,
        content_type = "multipart/form-data",
        description = "Captured frame in an `image` field (JPEG or PNG)",
    ),
    responses(
        (status = 201, description = "Draft created", body = ApiResponse<CaptureResponseDto>),
        (status = 400, description = "Missing, oversized or non-image field"),
    )
)]
pub async fn capture_report(
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CaptureResponseDto>>), AppError> {
    let mut image_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                image_data = Some(data.to_vec());
                content_type = Some(ct);
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // Validate required fields
    let image_data =
        image_data.ok_or_else(|| AppError::BadRequest("Image is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    if image_data.is_empty() {
        return Err(AppError::BadRequest("Image is empty".to_string()));
    }

    if image_data.len() > state.max_image_bytes {
        return Err(AppError::BadRequest(format!(
            "Image too large. Maximum size is {} bytes ({} MB)",
            state.max_image_bytes,
            state.max_image_bytes / 1024 / 1024
        )));
    }

    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Image type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }

    // Advisory recognition: failure degrades to manual entry
    let prefill = state.recognition.prefill(&image_data).await;

    let draft = state
        .drafts
        .create(image_data, content_type, prefill.title, prefill.description)
        .await;

    let response = CaptureResponseDto {
        draft: draft.into(),
        plate: prefill.plate.map(|p| PlateDetectionDto {
            text: p.text,
            confidence: p.recognition_confidence,
        }),
        warning: prefill.warning,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}
