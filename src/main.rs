mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth;
use crate::features::auth::clients::IdentityClient;
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::AuthService;
use crate::features::leaderboard::{routes as leaderboard_routes, LeaderboardService};
use crate::features::profiles::{routes as profiles_routes, ProfileService};
use crate::features::reports::handlers::ReportState;
use crate::features::reports::{
    routes as reports_routes, DraftStore, PlateRecognitionClient, ReportService, SubmissionService,
};
use crate::features::violation_types::{routes as violation_types_routes, ViolationTypeService};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize session validation for provider-issued tokens
    let session_validator = Arc::new(auth::SessionValidator::new(&config.auth));
    tracing::info!("Session validator initialized");

    // Initialize identity provider client and auth service
    let identity_client = Arc::new(IdentityClient::new(&config.auth));
    let profile_service = Arc::new(ProfileService::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&identity_client),
        Arc::clone(&profile_service),
    ));
    tracing::info!("Auth service initialized (identity provider: {})", config.auth.provider_url);

    // Initialize storage client for report images
    let storage_client = Arc::new(
        modules::storage::MinIOClient::new(config.storage.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize storage client: {}", e))?,
    );
    tracing::info!(
        "Storage client initialized for bucket: {}",
        storage_client.bucket_name()
    );

    // Initialize the draft store and its expiry sweeper
    let draft_store = Arc::new(DraftStore::new(config.drafts.ttl));
    {
        let drafts = Arc::clone(&draft_store);
        let sweep_interval = config.drafts.sweep_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            loop {
                ticker.tick().await;
                drafts.purge_expired().await;
            }
        });
    }
    tracing::info!(
        "Draft store initialized (ttl: {}s, sweep: {}s)",
        config.drafts.ttl.as_secs(),
        config.drafts.sweep_interval.as_secs()
    );

    // Initialize plate recognition client
    let recognition_client = Arc::new(PlateRecognitionClient::new(&config.recognition));
    if config.recognition.enabled() {
        tracing::info!("Plate recognition enabled: {}", config.recognition.endpoint);
    } else {
        tracing::warn!("Plate recognition disabled (RECOGNITION_ENDPOINT not set)");
    }

    // Initialize report services
    let report_service = Arc::new(ReportService::new(pool.clone()));
    let submission_service = Arc::new(SubmissionService::new(
        Arc::clone(&storage_client),
        Arc::clone(&draft_store),
        Arc::clone(&report_service),
    ));
    tracing::info!("Report services initialized");

    // Initialize Violation Type Service
    let violation_type_service = Arc::new(ViolationTypeService::new(pool.clone()));
    tracing::info!("Violation type service initialized");

    // Initialize Leaderboard Service
    let leaderboard_service = Arc::new(LeaderboardService::new(pool.clone()));
    tracing::info!("Leaderboard service initialized");

    // Initialize Admin Service
    let admin_service = Arc::new(AdminService::new(pool.clone()));
    tracing::info!("Admin service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require a verified session)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&auth_service)))
        .merge(profiles_routes::protected_routes(Arc::clone(
            &profile_service,
        )))
        .nest(
            "/api/admin",
            admin_routes::routes(Arc::clone(&admin_service)).merge(
                violation_types_routes::admin_routes(Arc::clone(&violation_type_service)),
            ),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            session_validator.clone(),
            middleware::auth_middleware,
        ));

    // Report routes run behind optional authentication: a valid bearer
    // token attributes the submission, no token means an anonymous
    // report
    let report_routes = reports_routes::routes(ReportState {
        drafts: Arc::clone(&draft_store),
        recognition: Arc::clone(&recognition_client),
        submission: Arc::clone(&submission_service),
        reports: Arc::clone(&report_service),
        max_image_bytes: config.drafts.max_image_bytes,
    })
    .route_layer(axum::middleware::from_fn_with_state(
        session_validator.clone(),
        middleware::optional_auth_middleware,
    ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(profiles_routes::public_routes(profile_service))
        .merge(violation_types_routes::routes(violation_type_service))
        .merge(leaderboard_routes::routes(leaderboard_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(report_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
