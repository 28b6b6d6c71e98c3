//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: builds the directory client, token codec and orchestrator
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and their validation
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{AppServices, StartupError};

/// Build the full HTTP router against the configured directory service.
pub fn build_app(config: &AppConfig) -> Result<Router, StartupError> {
    let services = services::build_services(config)?;
    Ok(router(Arc::new(services)))
}

/// Router over already-built services (tests plug in their own directory).
pub fn router(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/auth", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(services)),
        )
}
