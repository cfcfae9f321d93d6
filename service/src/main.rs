#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Router,
};
use edge_headers_api::{
    build_info::BuildInfoProvider,
    config::Config,
    http::{security_headers, security_headers_middleware},
    rest,
};
use tower_http::trace::TraceLayer;

// Health check handler
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    // Set up logging from config
    std::env::set_var("RUST_LOG", &config.logging.level);
    tracing_subscriber::fmt::init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "edge-headers-api starting up"
    );

    let build_info = BuildInfoProvider::from_env();
    let build_info_snapshot = build_info.build_info();
    tracing::info!(
        version = %build_info_snapshot.version,
        git_sha = %build_info_snapshot.git_sha,
        build_time = %build_info_snapshot.build_time,
        "resolved build metadata"
    );

    // The fixed policy, built once and shared across requests
    let headers = security_headers();

    let app = Router::new()
        // Health check route
        .route("/health", get(health_check))
        // Build metadata
        .route("/api/v1/build-info", get(rest::build_info_handler))
        // Edge hook simulation
        .route(
            "/simulate/viewer-response",
            post(rest::simulate_viewer_response),
        )
        .route(
            "/simulate/origin-response",
            post(rest::simulate_origin_response),
        )
        .layer(Extension(build_info))
        .layer(TraceLayer::new_for_http())
        // Outermost: every response leaves with the security headers
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(Extension(headers));

    // Start the server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server at http://{addr}/health");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
