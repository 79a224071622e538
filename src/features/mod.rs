pub mod admin;
pub mod auth;
pub mod leaderboard;
pub mod profiles;
pub mod reports;
pub mod violation_types;
