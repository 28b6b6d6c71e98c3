use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod system;

/// Router for the `/api/auth` endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/validate", get(auth::validate))
        .route("/health", get(system::service_health))
}
