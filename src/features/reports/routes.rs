use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};

/// Create routes for the reports feature
///
/// All routes are public; the caller layers optional authentication on
/// top so a verified session attributes submissions while anonymous
/// citizens can still report.
pub fn routes(state: ReportState) -> Router {
    Router::new()
        // Capture / draft / submit flow
        .route(
            "/api/reports/capture",
            post(handlers::capture_handler::capture_report),
        )
        .route(
            "/api/reports/drafts/{id}",
            get(handlers::draft_handler::get_draft)
                .patch(handlers::draft_handler::update_draft)
                .delete(handlers::draft_handler::discard_draft),
        )
        .route(
            "/api/reports/drafts/{id}/location",
            axum::routing::put(handlers::draft_handler::set_draft_location),
        )
        .route(
            "/api/reports/drafts/{id}/submit",
            post(handlers::draft_handler::submit_draft),
        )
        // Read side
        .route("/api/reports", get(handlers::report_handler::list_reports))
        .route(
            "/api/reports/{id}",
            get(handlers::report_handler::get_report),
        )
        .with_state(state)
}
