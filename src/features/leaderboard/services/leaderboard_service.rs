use sqlx::{FromRow, PgPool, Row};

use crate::core::error::{AppError, Result};
use crate::features::leaderboard::dtos::{
    LeaderboardEntryDto, LeaderboardResponseDto, LeaderboardStatsDto,
};

#[derive(Debug, FromRow)]
struct LeaderboardRow {
    user_id: String,
    display_name: String,
    report_count: i64,
}

/// Service for the contribution leaderboard
pub struct LeaderboardService {
    pool: PgPool,
}

impl LeaderboardService {
    const DEFAULT_LIMIT: i64 = 50;

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute the leaderboard: reporters ranked by attributed report
    /// count, strictly descending, ties broken by display name so the
    /// ordering is stable.
    pub async fn get_leaderboard(&self) -> Result<LeaderboardResponseDto> {
        let stats_row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM reports) AS total_reports,
                (SELECT COUNT(DISTINCT user_id) FROM reports WHERE user_id IS NOT NULL)
                    AS active_reporters
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get leaderboard stats: {:?}", e);
            AppError::Database(e)
        })?;

        let stats = LeaderboardStatsDto {
            total_reports: stats_row.get("total_reports"),
            active_reporters: stats_row.get("active_reporters"),
        };

        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT
                p.id AS user_id,
                p.display_name,
                COUNT(r.id) AS report_count
            FROM profiles p
            JOIN reports r ON r.user_id = p.id
            GROUP BY p.id, p.display_name
            ORDER BY COUNT(r.id) DESC, p.display_name ASC
            LIMIT $1
            "#,
        )
        .bind(Self::DEFAULT_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get leaderboard: {:?}", e);
            AppError::Database(e)
        })?;

        let entries = rows
            .into_iter()
            .map(|r| LeaderboardEntryDto {
                user_id: r.user_id,
                display_name: r.display_name,
                report_count: r.report_count,
            })
            .collect();

        Ok(LeaderboardResponseDto { stats, entries })
    }
}
