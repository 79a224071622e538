use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::profiles::models::Profile;
use crate::features::reports::models::ReportSeverity;

/// Response DTO for a profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: String,
    pub display_name: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponseDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name,
            updated_at: p.updated_at,
        }
    }
}

/// Request DTO for updating the own profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 80, message = "Display name is required"))]
    pub display_name: String,
}

/// One report in a profile's history
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileReportDto {
    pub id: Uuid,
    pub image_url: String,
    pub location_name: Option<String>,
    pub severity: ReportSeverity,
    pub violation_type_name: String,
    pub created_at: DateTime<Utc>,
}

/// Profile together with the citizen's report history
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileWithReportsDto {
    pub profile: ProfileResponseDto,
    pub reports: Vec<ProfileReportDto>,
}
