use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::violation_types::models::ViolationType;

/// Response DTO for a violation type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ViolationTypeResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<ViolationType> for ViolationTypeResponseDto {
    fn from(t: ViolationType) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
        }
    }
}

/// Request DTO for creating a violation type (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateViolationTypeDto {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

/// Request DTO for updating a violation type (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateViolationTypeDto {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: Option<String>,

    pub description: Option<String>,
}
