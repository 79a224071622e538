mod leaderboard_service;

pub use leaderboard_service::LeaderboardService;
