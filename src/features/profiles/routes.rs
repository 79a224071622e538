use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::profiles::handlers;
use crate::features::profiles::services::ProfileService;

/// Protected routes for the own profile
pub fn protected_routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route(
            "/api/profile",
            get(handlers::get_own_profile).patch(handlers::update_own_profile),
        )
        .with_state(service)
}

/// Public routes for viewing other citizens' profiles
pub fn public_routes(service: Arc<ProfileService>) -> Router {
    Router::new()
        .route("/api/profiles/{user_id}", get(handlers::get_public_profile))
        .with_state(service)
}
