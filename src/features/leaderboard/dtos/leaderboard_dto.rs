use serde::Serialize;
use utoipa::ToSchema;

/// One reporter on the leaderboard
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntryDto {
    pub user_id: String,
    pub display_name: String,
    pub report_count: i64,
}

/// Community-wide counters shown above the rankings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardStatsDto {
    /// All persisted reports, anonymous ones included
    pub total_reports: i64,
    /// Profiles with at least one attributed report
    pub active_reporters: i64,
}

/// Full leaderboard response
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponseDto {
    pub stats: LeaderboardStatsDto,
    /// Ordered by report_count descending; ties break on display_name
    pub entries: Vec<LeaderboardEntryDto>,
}
