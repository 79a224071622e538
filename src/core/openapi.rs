use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth::{self, dtos as auth_dtos};
use crate::features::leaderboard::{dtos as leaderboard_dtos, handlers as leaderboard_handlers};
use crate::features::profiles::{dtos as profiles_dtos, handlers as profiles_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::violation_types::{
    dtos as violation_types_dtos, handlers as violation_types_handlers,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::refresh_token,
        auth::handlers::get_me,
        auth::handlers::logout,
        // Profiles
        profiles_handlers::get_own_profile,
        profiles_handlers::update_own_profile,
        profiles_handlers::get_public_profile,
        // Violation types
        violation_types_handlers::list_violation_types,
        violation_types_handlers::get_violation_type,
        violation_types_handlers::create_violation_type,
        violation_types_handlers::update_violation_type,
        violation_types_handlers::delete_violation_type,
        // Reports (capture / draft / submit / feed)
        reports_handlers::capture_handler::capture_report,
        reports_handlers::draft_handler::get_draft,
        reports_handlers::draft_handler::update_draft,
        reports_handlers::draft_handler::set_draft_location,
        reports_handlers::draft_handler::discard_draft,
        reports_handlers::draft_handler::submit_draft,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::get_report,
        // Leaderboard
        leaderboard_handlers::get_leaderboard,
        // Admin
        admin_handlers::list_reports,
        admin_handlers::delete_report,
        admin_handlers::list_profiles,
        admin_handlers::delete_profile,
        admin_handlers::get_map,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::RefreshTokenRequestDto,
            auth_dtos::RefreshTokenResponseDto,
            auth_dtos::AuthResponseDto,
            auth_dtos::AuthUserDto,
            auth_dtos::MeResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_dtos::RefreshTokenResponseDto>,
            ApiResponse<auth_dtos::MeResponseDto>,
            // Profiles
            profiles_dtos::ProfileResponseDto,
            profiles_dtos::UpdateProfileDto,
            profiles_dtos::ProfileReportDto,
            profiles_dtos::ProfileWithReportsDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            ApiResponse<profiles_dtos::ProfileWithReportsDto>,
            // Violation types
            violation_types_dtos::ViolationTypeResponseDto,
            violation_types_dtos::CreateViolationTypeDto,
            violation_types_dtos::UpdateViolationTypeDto,
            ApiResponse<Vec<violation_types_dtos::ViolationTypeResponseDto>>,
            ApiResponse<violation_types_dtos::ViolationTypeResponseDto>,
            // Reports
            reports_models::ReportSeverity,
            reports_models::Coordinates,
            reports_dtos::CaptureImageDto,
            reports_dtos::DraftResponseDto,
            reports_dtos::PlateDetectionDto,
            reports_dtos::CaptureResponseDto,
            reports_dtos::UpdateDraftDto,
            reports_dtos::SetLocationDto,
            reports_dtos::ViolationTypeInfo,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportDetailResponseDto,
            ApiResponse<reports_dtos::CaptureResponseDto>,
            ApiResponse<reports_dtos::DraftResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportDetailResponseDto>,
            // Leaderboard
            leaderboard_dtos::LeaderboardEntryDto,
            leaderboard_dtos::LeaderboardStatsDto,
            leaderboard_dtos::LeaderboardResponseDto,
            ApiResponse<leaderboard_dtos::LeaderboardResponseDto>,
            // Admin
            admin_dtos::AdminReporterDto,
            admin_dtos::AdminReportDto,
            admin_dtos::AdminProfileDto,
            admin_dtos::MapMarkerDto,
            admin_dtos::AdminMapDto,
            ApiResponse<Vec<admin_dtos::AdminReportDto>>,
            ApiResponse<Vec<admin_dtos::AdminProfileDto>>,
            ApiResponse<admin_dtos::AdminMapDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "profiles", description = "Citizen profiles and report history"),
        (name = "violation-types", description = "Violation type catalogue (public)"),
        (name = "reports", description = "Report capture, drafts, submission and feed"),
        (name = "leaderboard", description = "Community contribution leaderboard (public)"),
        (name = "admin", description = "Moderation endpoints (admin role only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "SafeRoads API",
        version = "0.1.0",
        description = "API documentation for SafeRoads",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
