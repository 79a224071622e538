use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    ReportDetailResponseDto, ReportResponseDto, ViolationTypeInfo,
};
use crate::features::reports::models::{Coordinates, CreateReport, Report, ReportSeverity};

#[derive(Debug, FromRow)]
struct ReportWithTypeRow {
    id: Uuid,
    user_id: Option<String>,
    title: String,
    description: String,
    violation_type_id: Uuid,
    severity: ReportSeverity,
    location_name: Option<String>,
    latitude: f64,
    longitude: f64,
    image_url: String,
    created_at: DateTime<Utc>,
    violation_type_name: String,
    violation_type_description: String,
}

/// Service for report persistence and read-side queries
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new report row
    ///
    /// The violation type reference is enforced by the store's foreign
    /// key; an unknown id comes back as a field error rather than a
    /// bare database failure.
    pub async fn create(&self, data: &CreateReport) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                user_id, title, description, violation_type_id, severity,
                location_name, latitude, longitude, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, user_id, title, description, violation_type_id, severity,
                location_name, latitude, longitude, image_url, created_at
            "#,
        )
        .bind(data.user_id.as_deref())
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.violation_type_id)
        .bind(data.severity)
        .bind(data.location_name.as_deref())
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(&data.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    return AppError::Validation(
                        "Selected violation type does not exist".to_string(),
                    );
                }
            }
            tracing::error!("Failed to insert report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report: {} (user: {})",
            report.id,
            report.user_id.as_deref().unwrap_or("anonymous")
        );

        Ok(report)
    }

    /// List the public feed, newest first
    pub async fn list_feed(&self) -> Result<Vec<ReportResponseDto>> {
        let rows = sqlx::query_as::<_, ReportWithTypeRow>(
            r#"
            SELECT
                r.id, r.user_id, r.title, r.description, r.violation_type_id,
                r.severity, r.location_name, r.latitude, r.longitude,
                r.image_url, r.created_at,
                vt.name AS violation_type_name,
                vt.description AS violation_type_description
            FROM reports r
            JOIN violation_types vt ON vt.id = r.violation_type_id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(feed_dto).collect())
    }

    /// Get a report by id, with coordinates and attribution
    pub async fn get_by_id(&self, id: Uuid) -> Result<ReportDetailResponseDto> {
        let row = sqlx::query_as::<_, ReportWithTypeRow>(
            r#"
            SELECT
                r.id, r.user_id, r.title, r.description, r.violation_type_id,
                r.severity, r.location_name, r.latitude, r.longitude,
                r.image_url, r.created_at,
                vt.name AS violation_type_name,
                vt.description AS violation_type_description
            FROM reports r
            JOIN violation_types vt ON vt.id = r.violation_type_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        Ok(detail_dto(row))
    }
}

fn feed_dto(row: ReportWithTypeRow) -> ReportResponseDto {
    ReportResponseDto {
        id: row.id,
        title: row.title,
        description: row.description,
        image_url: row.image_url,
        location_name: row.location_name,
        severity: row.severity,
        created_at: row.created_at,
        violation_type: ViolationTypeInfo {
            name: row.violation_type_name,
            description: row.violation_type_description,
        },
    }
}

fn detail_dto(row: ReportWithTypeRow) -> ReportDetailResponseDto {
    ReportDetailResponseDto {
        id: row.id,
        user_id: row.user_id,
        title: row.title,
        description: row.description,
        image_url: row.image_url,
        location_name: row.location_name,
        severity: row.severity,
        violation_type_id: row.violation_type_id,
        violation_type: ViolationTypeInfo {
            name: row.violation_type_name,
            description: row.violation_type_description,
        },
        coordinates: Coordinates {
            latitude: row.latitude,
            longitude: row.longitude,
        },
        created_at: row.created_at,
    }
}
