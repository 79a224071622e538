use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{Coordinates, DraftView, ReportSeverity};

/// Response DTO for a report draft (never includes the frame bytes)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub violation_type_id: Option<Uuid>,
    pub severity: ReportSeverity,
    pub location_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Seconds until the draft expires and is purged
    pub expires_in_secs: u64,
}

impl From<DraftView> for DraftResponseDto {
    fn from(v: DraftView) -> Self {
        Self {
            id: v.id,
            title: v.title,
            description: v.description,
            violation_type_id: v.violation_type_id,
            severity: v.severity,
            location_name: v.location_name,
            coordinates: v.coordinates,
            expires_in_secs: v.expires_in_secs,
        }
    }
}

/// Multipart form for a capture (documentation only; the handler reads
/// the raw multipart stream)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CaptureImageDto {
    /// The captured frame (JPEG or PNG)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
}

/// Detected plate as reported back from a capture
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlateDetectionDto {
    pub text: String,
    /// Recognition confidence in [0, 1]
    pub confidence: f64,
}

/// Response DTO for a capture: the created draft plus the advisory
/// recognition outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct CaptureResponseDto {
    pub draft: DraftResponseDto,
    /// Top plate candidate, when recognition found one
    pub plate: Option<PlateDetectionDto>,
    /// Non-blocking warning when recognition was unavailable
    pub warning: Option<String>,
}

/// Request DTO for editing a draft
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDraftDto {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description is too long"))]
    pub description: Option<String>,

    pub violation_type_id: Option<Uuid>,

    pub severity: Option<ReportSeverity>,

    #[validate(length(max = 200, message = "Location name is too long"))]
    pub location_name: Option<String>,
}

/// Request DTO for recording the device position fix
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetLocationDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,
}
