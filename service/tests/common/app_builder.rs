//! Test app builder that mirrors main.rs wiring.
//!
//! This module provides a [`TestAppBuilder`] that constructs an Axum router
//! matching the production configuration in `main.rs`, with each piece
//! individually toggleable so tests can isolate what they exercise.
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::minimal()`] - Health check only
//! - [`TestAppBuilder::full()`] - Everything main.rs wires up

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Router,
};
use edge_headers_api::{
    build_info::BuildInfoProvider,
    http::{security_headers, security_headers_middleware},
    rest,
};

/// Health check handler (mirrors main.rs)
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Route that pre-sets headers the policy must overwrite, plus an unrelated
/// one it must preserve.
async fn stale_headers() -> impl IntoResponse {
    (
        [
            ("x-frame-options", "SAMEORIGIN"),
            ("referrer-policy", "unsafe-url"),
            ("x-request-id", "test-request-id"),
        ],
        "stale",
    )
}

/// Builder for test applications that mirrors main.rs wiring.
#[derive(Default)]
pub struct TestAppBuilder {
    health: bool,
    rest: bool,
    simulate: bool,
    security_headers: bool,
    stale_route: bool,
}

impl TestAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Health check only.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new().with_health()
    }

    /// Everything main.rs wires up.
    #[must_use]
    pub fn full() -> Self {
        Self::new()
            .with_health()
            .with_rest()
            .with_simulate()
            .with_security_headers()
    }

    #[must_use]
    pub fn with_health(mut self) -> Self {
        self.health = true;
        self
    }

    #[must_use]
    pub fn with_rest(mut self) -> Self {
        self.rest = true;
        self
    }

    #[must_use]
    pub fn with_simulate(mut self) -> Self {
        self.simulate = true;
        self
    }

    #[must_use]
    pub fn with_security_headers(mut self) -> Self {
        self.security_headers = true;
        self
    }

    /// Add the stale-headers route for overwrite tests.
    #[must_use]
    pub fn with_stale_route(mut self) -> Self {
        self.stale_route = true;
        self
    }

    /// Assemble the router with the same layer ordering as main.rs.
    #[must_use]
    pub fn build(self) -> Router {
        let mut app = Router::new();

        if self.health {
            app = app.route("/health", get(health_check));
        }

        if self.rest {
            app = app.route("/api/v1/build-info", get(rest::build_info_handler));
        }

        if self.simulate {
            app = app
                .route(
                    "/simulate/viewer-response",
                    post(rest::simulate_viewer_response),
                )
                .route(
                    "/simulate/origin-response",
                    post(rest::simulate_origin_response),
                );
        }

        if self.stale_route {
            app = app.route("/stale", get(stale_headers));
        }

        let mut app = app.layer(Extension(BuildInfoProvider::from_lookup(|_| None)));

        if self.security_headers {
            app = app
                .layer(middleware::from_fn(security_headers_middleware))
                .layer(Extension(security_headers()));
        }

        app
    }
}
