//! Error taxonomy surfaced to callers of the authentication flows.

use thiserror::Error;

/// Result type returned by register/login orchestration.
pub type AuthOutcome<T> = Result<T, AuthError>;

/// Caller-facing authentication failure.
///
/// Every failure of a directory round trip is translated into exactly one of
/// these kinds before it leaves the orchestrator. Messages are safe to show to
/// end users: they never carry stack traces or transport internals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad login or duplicate registration (user-correctable).
    #[error("{0}")]
    InvalidCredentials(String),

    /// The identity exists but is not yet approved; no token was issued.
    #[error("{0}")]
    PendingApproval(String),

    /// Transport failure or an unexpected directory response.
    #[error("{0}")]
    DirectoryUnavailable(String),
}

/// Discriminant of [`AuthError`], for mapping to transport status codes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    InvalidCredentials,
    PendingApproval,
    DirectoryUnavailable,
}

impl AuthError {
    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::InvalidCredentials(msg.into())
    }

    pub fn pending_approval(msg: impl Into<String>) -> Self {
        Self::PendingApproval(msg.into())
    }

    pub fn directory_unavailable(msg: impl Into<String>) -> Self {
        Self::DirectoryUnavailable(msg.into())
    }

    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::InvalidCredentials(_) => AuthErrorKind::InvalidCredentials,
            Self::PendingApproval(_) => AuthErrorKind::PendingApproval,
            Self::DirectoryUnavailable(_) => AuthErrorKind::DirectoryUnavailable,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidCredentials(m)
            | Self::PendingApproval(m)
            | Self::DirectoryUnavailable(m) => m.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = AuthError::invalid_credentials("Username or email already exists");
        assert_eq!(err.to_string(), "Username or email already exists");
        assert_eq!(err.message(), "Username or email already exists");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            AuthError::pending_approval("x").kind(),
            AuthErrorKind::PendingApproval
        );
        assert_eq!(
            AuthError::directory_unavailable("x").kind(),
            AuthErrorKind::DirectoryUnavailable
        );
        assert_eq!(
            AuthError::invalid_credentials("x").kind(),
            AuthErrorKind::InvalidCredentials
        );
    }
}
