//! Citizen profile feature.
//!
//! Profiles mirror the identity provider's subject ids into a local
//! table so reports and the leaderboard can join on them. A profile row
//! is ensured lazily at registration / first login.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProfileService;
