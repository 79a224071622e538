use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::violation_types::handlers;
use crate::features::violation_types::services::ViolationTypeService;

/// Create public routes for the violation type catalogue
pub fn routes(service: Arc<ViolationTypeService>) -> Router {
    Router::new()
        .route(
            "/api/violation-types",
            get(handlers::list_violation_types),
        )
        .route(
            "/api/violation-types/{id}",
            get(handlers::get_violation_type),
        )
        .with_state(service)
}

/// Create admin routes for catalogue curation
///
/// Caller nests these under /api/admin behind the auth middleware; the
/// handlers additionally require the admin role.
pub fn admin_routes(service: Arc<ViolationTypeService>) -> Router {
    Router::new()
        .route(
            "/violation-types",
            post(handlers::create_violation_type),
        )
        .route(
            "/violation-types/{id}",
            axum::routing::patch(handlers::update_violation_type)
                .delete(handlers::delete_violation_type),
        )
        .with_state(service)
}
