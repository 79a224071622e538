pub mod leaderboard_handler;

pub use leaderboard_handler::*;
