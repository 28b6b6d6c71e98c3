//! Capability port for the external user-directory service.
//!
//! The directory owns usernames, credentials, roles and the approval
//! workflow. This crate only needs two operations from it, and only needs the
//! raw outcome (status + body): interpreting that outcome is the
//! orchestrator's job, so adapters stay thin.

use serde::Serialize;
use thiserror::Error;

/// Payload of the directory's create-user endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Payload of the directory's credential-check endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ValidateCredentialsRequest {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl core::fmt::Debug for ValidateCredentialsRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValidateCredentialsRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A response received from the directory, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResponse {
    /// HTTP status code.
    pub status: u16,

    /// Transport-level status line, e.g. `"409 Conflict"`.
    pub status_line: String,

    /// Raw body; `None` when the response carried no (or a blank) body.
    pub body: Option<String>,
}

impl DirectoryResponse {
    pub fn new(status: u16, status_line: impl Into<String>, body: Option<String>) -> Self {
        Self {
            status,
            status_line: status_line.into(),
            body: body.filter(|b| !b.trim().is_empty()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// The directory call produced no response at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("directory transport error: {0}")]
    Transport(String),

    #[error("directory call timed out")]
    Timeout,
}

/// Outbound contract of the user-directory service.
///
/// Implementations must not retry and must not interpret status codes: every
/// response that arrives is returned as `Ok`.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a user. Expected statuses: `201` created, `409` conflict, `5xx`.
    async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<DirectoryResponse, DirectoryError>;

    /// Check credentials. Expected statuses: `200` ok, `401` unauthorized, `5xx`.
    async fn validate_credentials(
        &self,
        request: &ValidateCredentialsRequest,
    ) -> Result<DirectoryResponse, DirectoryError>;
}
