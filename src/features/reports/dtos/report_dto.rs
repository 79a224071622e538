use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::{Coordinates, ReportSeverity};

/// Violation type as embedded in report responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ViolationTypeInfo {
    pub name: String,
    pub description: String,
}

/// Response DTO for a report in the public feed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub location_name: Option<String>,
    pub severity: ReportSeverity,
    pub created_at: DateTime<Utc>,
    pub violation_type: ViolationTypeInfo,
}

/// Response DTO for a single report, including coordinates and
/// attribution
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportDetailResponseDto {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub location_name: Option<String>,
    pub severity: ReportSeverity,
    pub violation_type_id: Uuid,
    pub violation_type: ViolationTypeInfo,
    pub coordinates: Coordinates,
    pub created_at: DateTime<Utc>,
}
