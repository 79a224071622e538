use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    AdminMapDto, AdminProfileDto, AdminReportDto, AdminReporterDto, MapMarkerDto,
};
use crate::features::reports::models::ReportSeverity;

#[derive(Debug, FromRow)]
struct AdminReportRow {
    id: Uuid,
    title: String,
    description: String,
    image_url: String,
    location_name: Option<String>,
    latitude: f64,
    longitude: f64,
    severity: ReportSeverity,
    violation_type_id: Uuid,
    violation_type_name: Option<String>,
    user_id: Option<String>,
    reporter_display_name: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct AdminProfileRow {
    id: String,
    display_name: String,
    updated_at: DateTime<Utc>,
    report_count: i64,
}

#[derive(Debug, FromRow)]
struct MapMarkerRow {
    id: Uuid,
    latitude: f64,
    longitude: f64,
    severity: ReportSeverity,
    violation_type_name: Option<String>,
    location_name: Option<String>,
    image_url: String,
}

/// Service for moderation queries and destructive actions
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    /// List all reports with reporter and violation type, paginated
    pub async fn list_reports(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<AdminReportDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count reports: {:?}", e);
                AppError::Database(e)
            })?;

        let rows = sqlx::query_as::<_, AdminReportRow>(
            r#"
            SELECT
                r.id, r.title, r.description, r.image_url, r.location_name,
                r.latitude, r.longitude, r.severity, r.violation_type_id,
                vt.name AS violation_type_name,
                r.user_id,
                p.display_name AS reporter_display_name,
                r.created_at
            FROM reports r
            LEFT JOIN violation_types vt ON vt.id = r.violation_type_id
            LEFT JOIN profiles p ON p.id = r.user_id
            ORDER BY r.created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        let items = rows.into_iter().map(report_dto).collect();
        Ok((items, total))
    }

    /// Delete a report row
    ///
    /// The stored image object is left in place; moderation removes the
    /// record, not the evidence blob.
    pub async fn delete_report(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        tracing::info!("Deleted report: {}", id);
        Ok(())
    }

    // =========================================================================
    // PROFILES
    // =========================================================================

    /// List all profiles with their report counts, paginated
    pub async fn list_profiles(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<AdminProfileDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count profiles: {:?}", e);
                AppError::Database(e)
            })?;

        let rows = sqlx::query_as::<_, AdminProfileRow>(
            r#"
            SELECT
                p.id,
                p.display_name,
                p.updated_at,
                COUNT(r.id) AS report_count
            FROM profiles p
            LEFT JOIN reports r ON r.user_id = p.id
            GROUP BY p.id, p.display_name, p.updated_at
            ORDER BY p.updated_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list profiles: {:?}", e);
            AppError::Database(e)
        })?;

        let items = rows
            .into_iter()
            .map(|r| AdminProfileDto {
                id: r.id,
                display_name: r.display_name,
                updated_at: r.updated_at,
                report_count: r.report_count,
            })
            .collect();

        Ok((items, total))
    }

    /// Delete a profile
    ///
    /// Reports by the profile survive as anonymous rows (the FK sets
    /// their user_id to NULL).
    pub async fn delete_profile(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete profile: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Profile {} not found", id)));
        }

        tracing::info!("Deleted profile: {}", id);
        Ok(())
    }

    // =========================================================================
    // MAP
    // =========================================================================

    const MAP_MARKER_LIMIT: i64 = 1000;

    /// Get map markers for all reports, with their bounding box
    pub async fn get_map_data(&self) -> Result<AdminMapDto> {
        let rows = sqlx::query_as::<_, MapMarkerRow>(
            r#"
            SELECT
                r.id, r.latitude, r.longitude, r.severity,
                vt.name AS violation_type_name,
                r.location_name, r.image_url
            FROM reports r
            LEFT JOIN violation_types vt ON vt.id = r.violation_type_id
            ORDER BY r.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(Self::MAP_MARKER_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch map data: {:?}", e);
            AppError::Database(e)
        })?;

        let markers: Vec<MapMarkerDto> = rows
            .into_iter()
            .map(|r| MapMarkerDto {
                id: r.id,
                latitude: r.latitude,
                longitude: r.longitude,
                severity: r.severity,
                violation_type_name: r.violation_type_name,
                location_name: r.location_name,
                image_url: r.image_url,
            })
            .collect();

        let total_count = markers.len() as i64;
        let bounds = marker_bounds(&markers);

        Ok(AdminMapDto {
            markers,
            total_count,
            bounds,
        })
    }
}

/// Bounding box over a marker set: [min_lat, min_lon, max_lat, max_lon]
fn marker_bounds(markers: &[MapMarkerDto]) -> Option<[f64; 4]> {
    if markers.is_empty() {
        return None;
    }

    let min_lat = markers
        .iter()
        .map(|m| m.latitude)
        .fold(f64::INFINITY, f64::min);
    let min_lon = markers
        .iter()
        .map(|m| m.longitude)
        .fold(f64::INFINITY, f64::min);
    let max_lat = markers
        .iter()
        .map(|m| m.latitude)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_lon = markers
        .iter()
        .map(|m| m.longitude)
        .fold(f64::NEG_INFINITY, f64::max);

    Some([min_lat, min_lon, max_lat, max_lon])
}

fn report_dto(row: AdminReportRow) -> AdminReportDto {
    let reporter = match (row.user_id, row.reporter_display_name) {
        (Some(user_id), Some(display_name)) => Some(AdminReporterDto {
            user_id,
            display_name,
        }),
        _ => None,
    };

    AdminReportDto {
        id: row.id,
        title: row.title,
        description: row.description,
        image_url: row.image_url,
        location_name: row.location_name,
        latitude: row.latitude,
        longitude: row.longitude,
        severity: row.severity,
        violation_type_id: row.violation_type_id,
        violation_type_name: row.violation_type_name,
        reporter,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(lat: f64, lon: f64) -> MapMarkerDto {
        MapMarkerDto {
            id: Uuid::new_v4(),
            latitude: lat,
            longitude: lon,
            severity: ReportSeverity::Low,
            violation_type_name: None,
            location_name: None,
            image_url: "http://example.com/img.jpg".to_string(),
        }
    }

    #[test]
    fn test_marker_bounds_empty() {
        assert_eq!(marker_bounds(&[]), None);
    }

    #[test]
    fn test_marker_bounds_spans_all_markers() {
        let markers = vec![
            marker(22.97, 78.65),
            marker(19.07, 72.87),
            marker(28.61, 77.21),
        ];
        let bounds = marker_bounds(&markers).unwrap();
        assert_eq!(bounds, [19.07, 72.87, 28.61, 78.65]);
    }
}
