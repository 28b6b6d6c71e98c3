//! Register/login orchestration and token introspection.
//!
//! ```text
//! request
//!   ↓
//! 1. Directory call (bounded by `call_timeout`)
//!   ↓
//! 2. Interpret status + body (fixed decision table)
//!   ↓
//! 3. Pending-approval gate
//!   ↓
//! 4. Token issuance
//! ```
//!
//! Every directory outcome leaves this module as either an [`AuthResult`] or
//! one of the three [`AuthError`] kinds; nothing propagates unmapped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use passgate_core::{AuthError, AuthOutcome, Identity, UserId};

use crate::codec::{Token, TokenCodec};
use crate::directory::{
    CreateUserRequest, DirectoryError, DirectoryResponse, UserDirectory, ValidateCredentialsRequest,
};
use crate::message::extract_error_message;

pub const USER_SERVICE_UNAVAILABLE: &str = "User service is unavailable";
pub const DUPLICATE_USER: &str = "Username or email already exists";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const VALIDATE_FAILED: &str = "Failed to validate user";
pub const REGISTERED_PENDING_APPROVAL: &str = "account created and is pending approval";
pub const LOGIN_PENDING_APPROVAL: &str = "account is pending approval";
pub const TOKEN_VALID: &str = "Token is valid";

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_CONFLICT: u16 = 409;

/// Successful register/login: a fresh token plus the directory's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResult {
    pub token: Token,
    pub user: Identity,
}

/// Outcome of token introspection. Never an error: failures are `valid: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub message: String,
}

impl ValidationResult {
    /// A negative result carrying `reason` as its diagnostic.
    pub fn invalid(reason: impl core::fmt::Display) -> Self {
        Self {
            valid: false,
            username: None,
            role: None,
            user_id: None,
            message: format!("Token is invalid or expired: {reason}"),
        }
    }
}

/// Coordinates the directory with token issuance.
///
/// Holds no per-request state; clone freely and share across tasks.
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    codec: Arc<TokenCodec>,
    call_timeout: Duration,
}

impl AuthService {
    pub fn new(directory: Arc<dyn UserDirectory>, codec: TokenCodec, call_timeout: Duration) -> Self {
        Self {
            directory,
            codec: Arc::new(codec),
            call_timeout,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Create the user in the directory and, if it is usable, log it in.
    pub async fn register(&self, request: &CreateUserRequest) -> AuthOutcome<AuthResult> {
        tracing::info!(username = %request.username, "registering user");

        let response = self
            .call_directory(self.directory.create_user(request))
            .await?;

        match response.status {
            STATUS_CREATED => {
                let identity = parse_identity(&response).ok_or_else(|| {
                    tracing::error!(status = response.status, "directory returned no usable user on create");
                    AuthError::directory_unavailable(CREATE_FAILED)
                })?;
                let result = self.issue_for(identity, REGISTERED_PENDING_APPROVAL)?;
                tracing::info!(username = %result.user.username, "user registered");
                Ok(result)
            }
            STATUS_CONFLICT => {
                tracing::warn!(username = %request.username, "username or email already taken");
                Err(AuthError::invalid_credentials(DUPLICATE_USER))
            }
            _ if response.is_success() => {
                tracing::error!(status = response.status, "unexpected success status on create");
                Err(AuthError::directory_unavailable(CREATE_FAILED))
            }
            _ => {
                let message = extract_error_message(response.body(), &response.status_line);
                tracing::error!(status = response.status, %message, "directory rejected create");
                Err(AuthError::directory_unavailable(format!(
                    "Failed to communicate with user service: {message}"
                )))
            }
        }
    }

    /// Check credentials with the directory and issue a token.
    pub async fn login(&self, request: &ValidateCredentialsRequest) -> AuthOutcome<AuthResult> {
        tracing::info!(username = %request.username, "login attempt");

        let response = self
            .call_directory(self.directory.validate_credentials(request))
            .await?;

        match response.status {
            STATUS_OK => {
                let identity = parse_identity(&response).ok_or_else(|| {
                    tracing::error!(status = response.status, "directory returned no usable user on validate");
                    AuthError::directory_unavailable(VALIDATE_FAILED)
                })?;
                let result = self.issue_for(identity, LOGIN_PENDING_APPROVAL)?;
                tracing::info!(username = %result.user.username, "user logged in");
                Ok(result)
            }
            STATUS_UNAUTHORIZED => {
                let fallback = if response.status_line.trim().is_empty() {
                    INVALID_CREDENTIALS
                } else {
                    response.status_line.as_str()
                };
                let message = extract_error_message(response.body(), fallback);
                tracing::warn!(username = %request.username, %message, "authentication failed");
                Err(AuthError::invalid_credentials(message))
            }
            _ if response.is_success() => {
                tracing::error!(status = response.status, "unexpected success status on validate");
                Err(AuthError::directory_unavailable(VALIDATE_FAILED))
            }
            _ => {
                let message = extract_error_message(response.body(), &response.status_line);
                tracing::error!(status = response.status, %message, "directory rejected validate");
                Err(AuthError::directory_unavailable(message))
            }
        }
    }

    /// Introspect a token. Pure: never touches the directory.
    ///
    /// Signature and expiry are checked together, so an expired token is
    /// never reported valid.
    pub fn validate_token(&self, token: &str) -> ValidationResult {
        match self.codec.verify(token) {
            Ok(claims) => ValidationResult {
                valid: true,
                username: Some(claims.sub),
                role: Some(claims.role.as_str().to_string()),
                user_id: Some(claims.user_id),
                message: TOKEN_VALID.to_string(),
            },
            Err(e) => {
                tracing::debug!(reason = %e, "token rejected");
                ValidationResult::invalid(e)
            }
        }
    }

    async fn call_directory<F>(&self, call: F) -> AuthOutcome<DirectoryResponse>
    where
        F: Future<Output = Result<DirectoryResponse, DirectoryError>>,
    {
        let outcome = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(DirectoryError::Timeout),
        };

        outcome.map_err(|e| {
            tracing::error!(error = %e, "error communicating with user service");
            AuthError::directory_unavailable(USER_SERVICE_UNAVAILABLE)
        })
    }

    fn issue_for(&self, identity: Identity, pending_message: &str) -> AuthOutcome<AuthResult> {
        if !identity.is_approved() {
            tracing::info!(username = %identity.username, "account pending approval; no token issued");
            return Err(AuthError::pending_approval(pending_message));
        }

        let token = self
            .codec
            .issue(&identity.username, &identity.role, identity.id)
            .map_err(|e| {
                tracing::error!(error = %e, "token issuance failed");
                AuthError::directory_unavailable("Failed to issue token")
            })?;

        Ok(AuthResult {
            token,
            user: identity,
        })
    }
}

fn parse_identity(response: &DirectoryResponse) -> Option<Identity> {
    let body = response.body()?;
    match serde_json::from_str::<Identity>(body) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::warn!(error = %e, "malformed user payload from directory");
            None
        }
    }
}
