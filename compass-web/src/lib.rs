//! Compass Web Server
//!
//! HTTP shell over the access core. The server hosts one process-wide
//! session: whoever logs in through the API is the identity every portal
//! request is checked against.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

// Re-export main types
pub use server::{CompassServer, CompassServerBuilder};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use compass_core::CompassError;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.server.dev_mode {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:8080"),
                HeaderValue::from_static("http://127.0.0.1:8080"),
            ])
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE])
    };

    Router::new()
        .merge(routes::page_routes(&state))
        .nest("/api", routes::api_routes())
        .merge(routes::portal_routes(&state))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(64 * 1024)),
        )
        .with_state(state)
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CompassError),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;
