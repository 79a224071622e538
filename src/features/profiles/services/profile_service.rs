use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::profiles::dtos::{
    ProfileReportDto, ProfileResponseDto, ProfileWithReportsDto, UpdateProfileDto,
};
use crate::features::profiles::models::Profile;
use crate::features::reports::models::ReportSeverity;

#[derive(Debug, FromRow)]
struct ProfileReportRow {
    id: uuid::Uuid,
    image_url: String,
    location_name: Option<String>,
    severity: ReportSeverity,
    violation_type_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Service for profile operations
pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure a profile row exists for an identity subject
    ///
    /// Called after registration and login; an existing row is left
    /// untouched so a chosen display name survives re-login.
    pub async fn ensure_exists(&self, user_id: &str, display_name: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, display_name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(display_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to ensure profile exists: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    /// Get a profile by identity subject id
    pub async fn get_by_id(&self, user_id: &str) -> Result<ProfileResponseDto> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, display_name, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get profile: {:?}", e);
            AppError::Database(e)
        })?;

        profile
            .map(|p| p.into())
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// Update the display name, bumping updated_at
    pub async fn update_display_name(
        &self,
        user_id: &str,
        dto: &UpdateProfileDto,
    ) -> Result<ProfileResponseDto> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET display_name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, display_name, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&dto.display_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        tracing::info!("Updated display name for profile: {}", user_id);
        Ok(profile.into())
    }

    /// Get a profile together with the citizen's report history,
    /// newest first
    pub async fn get_with_reports(&self, user_id: &str) -> Result<ProfileWithReportsDto> {
        let profile = self.get_by_id(user_id).await?;

        let rows = sqlx::query_as::<_, ProfileReportRow>(
            r#"
            SELECT
                r.id,
                r.image_url,
                r.location_name,
                r.severity,
                vt.name AS violation_type_name,
                r.created_at
            FROM reports r
            JOIN violation_types vt ON vt.id = r.violation_type_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list profile reports: {:?}", e);
            AppError::Database(e)
        })?;

        let reports = rows
            .into_iter()
            .map(|r| ProfileReportDto {
                id: r.id,
                image_url: r.image_url,
                location_name: r.location_name,
                severity: r.severity,
                violation_type_name: r.violation_type_name,
                created_at: r.created_at,
            })
            .collect();

        Ok(ProfileWithReportsDto { profile, reports })
    }
}
