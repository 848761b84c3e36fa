mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::database::{self, MIGRATOR};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::admin::{routes as admin_routes, AdminState};
use crate::features::auth::JwtValidator;
use crate::features::categories::CategoryService;
use crate::features::entities::{routes as entities_routes, EntityPagesState, EntityService, RecordService};
use crate::features::evaluations::EvaluationService;
use crate::features::map::{routes as map_routes, MapService, MapState};
use crate::shared::site::Site;
use crate::shared::templates::TemplateEngine;
use crate::shared::urls::Urls;
use axum::{middleware::from_fn, Router};
use sqlx::PgPool;
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

/// Services shared by the pages and the admin API
struct Services {
    categories: Arc<CategoryService>,
    evaluations: Arc<EvaluationService>,
    entities: Arc<EntityService>,
    records: Arc<RecordService>,
    map: Arc<MapService>,
}

impl Services {
    fn new(pool: &PgPool) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(pool.clone())),
            evaluations: Arc::new(EvaluationService::new(pool.clone())),
            entities: Arc::new(EntityService::new(pool.clone())),
            records: Arc::new(RecordService::new(pool.clone())),
            map: Arc::new(MapService::new(pool.clone())),
        }
    }
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

    // Load configuration (fails fast on a malformed DJEOGRAPHY_CONFIG)
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!(
        "Configuration loaded: {} evaluation levels, {} provinces, pagination={}",
        config.map.eval_levels.len(),
        config.map.provinces.len(),
        config.map.pagination
    );

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let services = Services::new(&pool);
    services
        .evaluations
        .ensure_levels(&config.map.eval_levels)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to ensure evaluation levels: {}", e))?;

    // Initialize auth
    let jwt_validator = Arc::new(JwtValidator::new(
        &config.auth.jwt_secret,
        config.auth.issuer.as_deref(),
        config.auth.jwt_leeway,
    ));
    tracing::info!("Auth configuration initialized");

    let templates = TemplateEngine::new()?;
    let site = Arc::new(Site::new(
        templates,
        config.map.clone(),
        Urls::new(&config.app.base_path),
        config.app.login_url.clone(),
    ));
    tracing::info!(
        "Pages mounted at '{}'",
        if config.app.base_path.is_empty() { "/" } else { config.app.base_path.as_str() }
    );

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

    let app = build_router(&services, site, jwt_validator, &config.app.base_path)
        .merge(swagger)
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
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Simple health check endpoint (no auth required)
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Pages under `base_path`, the admin API and the health check, with the
/// session attached to every request.
fn build_router(
    services: &Services,
    site: Arc<Site>,
    jwt_validator: Arc<JwtValidator>,
    base_path: &str,
) -> Router {
    let pages = Router::new()
        .merge(entities_routes::routes(EntityPagesState {
            entities: Arc::clone(&services.entities),
            categories: Arc::clone(&services.categories),
            evaluations: Arc::clone(&services.evaluations),
            site: Arc::clone(&site),
        }))
        .merge(map_routes::routes(MapState {
            map: Arc::clone(&services.map),
            categories: Arc::clone(&services.categories),
            evaluations: Arc::clone(&services.evaluations),
            site: Arc::clone(&site),
        }));

    // Nesting at the root is not allowed
    let pages = if base_path.is_empty() {
        pages
    } else {
        Router::new().nest(base_path, pages)
    };

    // Protected routes (require a valid session token)
    let protected_routes = Router::new()
        .nest(
            "/api/admin",
            admin_routes::routes(AdminState {
                categories: Arc::clone(&services.categories),
                evaluations: Arc::clone(&services.evaluations),
                entities: Arc::clone(&services.entities),
                records: Arc::clone(&services.records),
                site,
            }),
        )
        .route_layer(axum::middleware::from_fn(
            middleware::require_auth_middleware,
        ));

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(pages)
        .merge(protected_routes)
        .merge(health_route)
        .layer(axum::middleware::from_fn_with_state(
            jwt_validator,
            middleware::session_middleware,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{issue_token, lazy_pool, test_site, TEST_JWT_SECRET};
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use std::time::Duration;

    fn test_server(base_path: &str) -> TestServer {
        let services = Services::new(&lazy_pool());
        let validator = Arc::new(JwtValidator::new(TEST_JWT_SECRET, None, Duration::from_secs(0)));
        let app = build_router(&services, Arc::new(test_site()), validator, base_path);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        test_server("").get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_admin_api_requires_token() {
        let server = test_server("");
        let response = server.get("/api/admin/entities").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    fn session_cookie(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("djeography_session={}", token)).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_token_passes_admin_auth() {
        let token = issue_token(TEST_JWT_SECRET, "user-1", 3600);
        // Rejected by validation, which runs after authentication
        let response = test_server("")
            .post("/api/admin/categories")
            .authorization_bearer(token)
            .json(&serde_json::json!({ "name": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_by_admin_api() {
        let token = issue_token(TEST_JWT_SECRET, "user-1", -3600);
        let response = test_server("")
            .post("/api/admin/categories")
            .authorization_bearer(token)
            .json(&serde_json::json!({ "name": "" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_session_cookie_authenticates_pages() {
        let server = test_server("");

        // Anonymous callers are sent to the login page before the id is looked at
        let response = server.post("/entities/abc/publish/").await;
        response.assert_status(StatusCode::FOUND);

        let token = issue_token(TEST_JWT_SECRET, "user-1", 3600);
        server
            .post("/entities/abc/publish/")
            .add_header(header::COOKIE, session_cookie(&token))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_expired_session_cookie_is_anonymous() {
        let token = issue_token(TEST_JWT_SECRET, "user-1", -3600);
        let response = test_server("")
            .post("/entities/abc/publish/")
            .add_header(header::COOKIE, session_cookie(&token))
            .await;
        response.assert_status(StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_login_redirect_keeps_mount_prefix() {
        let response = test_server("/map").post("/map/entities/9/unpublish/").await;
        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header(header::LOCATION),
            "/accounts/login/?next=/map/entities/9/unpublish/"
        );
    }

    #[tokio::test]
    async fn test_pages_are_mounted_under_prefix() {
        let server = test_server("/map");
        server
            .get("/map/entities/1/publish/")
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
        server
            .get("/entities/1/publish/")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
