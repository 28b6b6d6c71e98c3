use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Extension, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use passgate_auth::ValidationResult;

use crate::app::dto::{LoginRequest, RegisterRequest, ValidateTokenQuery};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(resp) = body.validate() {
        return resp;
    }

    match services.auth.register(&body.into_directory_request()).await {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => errors::auth_error_to_response(&e, StatusCode::CONFLICT),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(resp) = body.validate() {
        return resp;
    }

    match services.auth.login(&body.into_directory_request()).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => errors::auth_error_to_response(&e, StatusCode::UNAUTHORIZED),
    }
}

/// Token introspection for gateways and other services.
pub async fn validate(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ValidateTokenQuery>, QueryRejection>,
) -> axum::response::Response {
    // A query string that cannot be decoded carries no usable token.
    let result = match query {
        Ok(Query(query)) => services
            .auth
            .validate_token(query.token.as_deref().unwrap_or_default()),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "undecodable validate query");
            ValidationResult::invalid("malformed query string")
        }
    };

    let status = if result.valid {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(result)).into_response()
}
