use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create routes for the admin moderation panel
///
/// Caller nests these under /api/admin behind the auth middleware; the
/// handlers additionally require the admin role.
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route(
            "/reports/{id}",
            axum::routing::delete(handlers::delete_report),
        )
        .route("/profiles", get(handlers::list_profiles))
        .route(
            "/profiles/{id}",
            axum::routing::delete(handlers::delete_profile),
        )
        .route("/map", get(handlers::get_map))
        .with_state(service)
}
