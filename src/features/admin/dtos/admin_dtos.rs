use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::reports::models::ReportSeverity;

/// Reporter info embedded in an admin report row; None means the
/// report was submitted anonymously
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminReporterDto {
    pub user_id: String,
    pub display_name: String,
}

/// Report row for the moderation table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminReportDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: ReportSeverity,
    pub violation_type_id: Uuid,
    pub violation_type_name: Option<String>,
    pub reporter: Option<AdminReporterDto>,
    pub created_at: DateTime<Utc>,
}

/// Profile row for the moderation table
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminProfileDto {
    pub id: String,
    pub display_name: String,
    pub updated_at: DateTime<Utc>,
    pub report_count: i64,
}

/// One marker on the moderation map
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapMarkerDto {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: ReportSeverity,
    pub violation_type_name: Option<String>,
    pub location_name: Option<String>,
    pub image_url: String,
}

/// Markers plus their bounding box ([min_lat, min_lon, max_lat, max_lon])
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminMapDto {
    pub markers: Vec<MapMarkerDto>,
    pub total_count: i64,
    pub bounds: Option<[f64; 4]>,
}
