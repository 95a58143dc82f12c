//! # stencil_api
//!
//! HTTP interface for the Stencil template engine.
//!
//! Thin plumbing only: routing, payload (de)serialization, and error-to-status
//! mapping live here; all template logic is in `stencil_core`.
//!
//! ## Routes
//!
//! ```text
//! POST   /templates        -> create a template
//! GET    /templates        -> list templates
//! GET    /templates/{id}   -> fetch one template
//! PUT    /templates/{id}   -> partial update
//! DELETE /templates/{id}   -> delete (cascades inputs)
//! POST   /render/{name}    -> render by name
//! GET    /healthz          -> liveness probe
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{ApiError, ApiResult};
pub use response::DataResponse;
pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route(
            "/templates",
            get(handlers::list_templates).post(handlers::create_template),
        )
        .route(
            "/templates/{id}",
            get(handlers::get_template)
                .put(handlers::update_template)
                .delete(handlers::delete_template),
        )
        .route("/render/{name}", post(handlers::render_template))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}

/// Bind and serve the API until the task is cancelled.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, router(state)).await
}
