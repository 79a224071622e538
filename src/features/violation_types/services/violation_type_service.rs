use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::violation_types::dtos::{
    CreateViolationTypeDto, UpdateViolationTypeDto, ViolationTypeResponseDto,
};
use crate::features::violation_types::models::ViolationType;

/// Service for violation type catalogue operations
pub struct ViolationTypeService {
    pool: PgPool,
}

impl ViolationTypeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all violation types
    pub async fn list(&self) -> Result<Vec<ViolationTypeResponseDto>> {
        let types = sqlx::query_as::<_, ViolationType>(
            r#"
            SELECT id, name, description, created_at
            FROM violation_types
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list violation types: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(types.into_iter().map(|t| t.into()).collect())
    }

    /// Get violation type by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ViolationTypeResponseDto> {
        let vt = sqlx::query_as::<_, ViolationType>(
            r#"
            SELECT id, name, description, created_at
            FROM violation_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get violation type: {:?}", e);
            AppError::Database(e)
        })?;

        vt.map(|t| t.into())
            .ok_or_else(|| AppError::NotFound(format!("Violation type {} not found", id)))
    }

    /// Create a new violation type (admin)
    pub async fn create(&self, dto: &CreateViolationTypeDto) -> Result<ViolationTypeResponseDto> {
        let vt = sqlx::query_as::<_, ViolationType>(
            r#"
            INSERT INTO violation_types (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create violation type: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Created violation type: {} ({})", vt.name, vt.id);
        Ok(vt.into())
    }

    /// Update a violation type (admin)
    pub async fn update(
        &self,
        id: Uuid,
        dto: &UpdateViolationTypeDto,
    ) -> Result<ViolationTypeResponseDto> {
        let vt = sqlx::query_as::<_, ViolationType>(
            r#"
            UPDATE violation_types
            SET name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(id)
        .bind(dto.name.as_deref())
        .bind(dto.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update violation type: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Violation type {} not found", id)))?;

        tracing::info!("Updated violation type: {}", id);
        Ok(vt.into())
    }

    /// Delete a violation type (admin)
    ///
    /// Fails with Conflict while reports still reference the type; the
    /// FK makes orphaning impossible.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM violation_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    return AppError::Conflict(
                        "Violation type is still referenced by existing reports".to_string(),
                    );
                }
            }
            tracing::error!("Failed to delete violation type: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Violation type {} not found",
                id
            )));
        }

        tracing::info!("Deleted violation type: {}", id);
        Ok(())
    }
}
