use serde::Deserialize;

use passgate_auth::{CreateUserRequest, ValidateCredentialsRequest};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateTokenQuery {
    pub token: Option<String>,
}

// -------------------------
// Validation / mapping helpers
// -------------------------

fn require(field: &'static str, value: &str) -> Result<(), axum::response::Response> {
    if value.trim().is_empty() {
        return Err(errors::json_error(
            axum::http::StatusCode::BAD_REQUEST,
            "validation_error",
            format!("{field} must not be blank"),
        ));
    }
    Ok(())
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), axum::response::Response> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("role", &self.role)?;
        if !self.email.contains('@') {
            return Err(errors::json_error(
                axum::http::StatusCode::BAD_REQUEST,
                "validation_error",
                "email must be a valid email address",
            ));
        }
        Ok(())
    }

    pub fn into_directory_request(self) -> CreateUserRequest {
        CreateUserRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            role: self.role.trim().to_string(),
        }
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), axum::response::Response> {
        require("username", &self.username)?;
        require("password", &self.password)
    }

    pub fn into_directory_request(self) -> ValidateCredentialsRequest {
        ValidateCredentialsRequest {
            username: self.username.trim().to_string(),
            password: self.password,
        }
    }
}
