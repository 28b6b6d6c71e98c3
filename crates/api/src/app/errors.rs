use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::extract::rejection::JsonRejection;
use serde_json::json;

use passgate_core::{AuthError, AuthErrorKind};

/// Map an orchestration failure onto an HTTP response.
///
/// `credentials_status` is the status for `InvalidCredentials`, which differs
/// per endpoint (`409` for a duplicate registration, `401` for a bad login).
pub fn auth_error_to_response(
    err: &AuthError,
    credentials_status: StatusCode,
) -> axum::response::Response {
    match err.kind() {
        AuthErrorKind::InvalidCredentials => {
            json_error(credentials_status, "invalid_credentials", err.message())
        }
        AuthErrorKind::PendingApproval => {
            json_error(StatusCode::FORBIDDEN, "pending_approval", err.message())
        }
        AuthErrorKind::DirectoryUnavailable => {
            json_error(StatusCode::BAD_GATEWAY, "directory_unavailable", err.message())
        }
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
