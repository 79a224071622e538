//! Role-based authorization guards.
//!
//! Guards extract the authenticated user and verify the required role
//! claim. The admin capability is a server-verified role on the access
//! token; there is deliberately no email-based fallback.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for checking if user is an administrator.
///
/// Only allows users carrying the "admin" role claim.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_citizen_user, with_admin_auth};
    use axum::http::StatusCode;
    use axum::{extract::Request, middleware::Next, routing::get, Router};
    use axum_test::TestServer;

    async fn admin_only(RequireAdmin(user): RequireAdmin) -> String {
        user.email
    }

    fn router() -> Router {
        Router::new().route("/admin-only", get(admin_only))
    }

    #[tokio::test]
    async fn test_admin_role_is_allowed() {
        let server = TestServer::new(with_admin_auth(router())).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status(StatusCode::OK);
        response.assert_text("moderator@example.com");
    }

    #[tokio::test]
    async fn test_citizen_without_role_is_forbidden() {
        async fn inject_citizen(mut request: Request, next: Next) -> axum::response::Response {
            request.extensions_mut().insert(create_citizen_user());
            next.run(request).await
        }

        let server = TestServer::new(
            router().layer(axum::middleware::from_fn(inject_citizen)),
        )
        .unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();
        let response = server.get("/admin-only").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
