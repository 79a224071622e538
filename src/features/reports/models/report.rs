use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Report severity enum matching database enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportSeverity::Low => write!(f, "low"),
            ReportSeverity::Medium => write!(f, "medium"),
            ReportSeverity::High => write!(f, "high"),
        }
    }
}

/// Database model for a persisted report
///
/// A row always carries coordinates and a resolved image URL; user_id
/// is None for anonymous submissions.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub violation_type_id: Uuid,
    pub severity: ReportSeverity,
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new report
#[derive(Debug)]
pub struct CreateReport {
    pub user_id: Option<String>,
    pub title: String,
    pub description: String,
    pub violation_type_id: Uuid,
    pub severity: ReportSeverity,
    pub location_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
}
