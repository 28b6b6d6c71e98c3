use axum::http::StatusCode;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn service_health() -> &'static str {
    "Auth Service is running!"
}
