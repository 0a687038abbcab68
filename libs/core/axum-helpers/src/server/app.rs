use super::shutdown::{ShutdownCoordinator, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_for_origins, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Path of the interactive API reference
pub const DOCS_PATH: &str = "/docs";

/// Starts the Axum server with graceful shutdown.
///
/// Fails if the listener cannot bind or the server errors while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Combines domain routes with documentation and cross-cutting middleware.
///
/// - `apis` is merged at the root (no prefix); state must already be applied
/// - OpenAPI JSON at [`OPENAPI_JSON_PATH`], Scalar reference at [`DOCS_PATH`]
/// - JSON 404 fallback
/// - request tracing, security headers, CORS and response compression
///
/// CORS follows `server_config.cors_allowed_origins`: empty allows any
/// origin, otherwise only the listed origins. Fails on an invalid origin.
///
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(modifiers(&ResourcePaths))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .merge(resource_router::<Venue, _>(venue_service))
///     .route("/", get(root));
///
/// let router = create_router::<ApiDoc>(api_routes, &server_config)?;
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = cors_layer_for_origins(&server_config.cors_allowed_origins)?;
    let openapi = T::openapi();
    let openapi_json = openapi.clone();

    let router = Router::new()
        .route(
            OPENAPI_JSON_PATH,
            get(move || std::future::ready(Json(openapi_json.clone()))),
        )
        .merge(Scalar::with_url(DOCS_PATH, openapi))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Server with coordinated shutdown and a bounded cleanup phase.
///
/// After a shutdown signal, in-flight requests drain while `cleanup` runs
/// with `shutdown_timeout` as its upper bound.
///
/// ```ignore
/// let cleanup = async move {
///     client.shutdown().await;
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    serve_until_shutdown(listener, router, ShutdownCoordinator::default(), shutdown_timeout, cleanup)
        .await
}

async fn serve_until_shutdown<F>(
    listener: tokio::net::TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_signal = coordinator.clone();
    let cleanup_handle = tokio::spawn(async move {
        cleanup_signal.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}
