//! # relay_api
//!
//! HTTP surface of the assistant relay.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use relay_core::Orchestrator;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::ApiConfig;
use crate::handlers::relay;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Drives conversation turns against the remote assistant service.
    pub orchestrator: Arc<Orchestrator>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Headers attached to every response, including errors and preflights.
pub const CORS_HEADERS: [(header::HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (header::CONTENT_TYPE, "application/json"),
];

/// Builds the Axum router. Every path is served by the relay dispatcher.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new().fallback(relay::relay_handler);

    // The headers are fixed, so they are set on the way out rather than via
    // CorsLayer, which only answers real preflights.
    for (name, value) in CORS_HEADERS {
        app = app.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    app.with_state(state)
}
