use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use passgate_core::UserId;

use crate::Role;

/// Claims embedded in an access token.
///
/// Only [`crate::TokenCodec`] constructs or parses these; everything else
/// receives them from a successful verification. Timestamps are carried as
/// whole unix seconds (`iat` / `exp`) on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the username the token was issued to.
    pub sub: String,

    pub role: Role,

    #[serde(rename = "userId")]
    pub user_id: UserId,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    pub fn username(&self) -> &str {
        &self.sub
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum TimeWindowError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Check the validity window of already-authenticated claims.
///
/// A token is still valid at the exact instant it expires. `iat` is not
/// compared with `now`, so a verifier whose clock lags the issuer still
/// accepts fresh tokens.
pub(crate) fn check_time_window(
    claims: &TokenClaims,
    now: DateTime<Utc>,
) -> Result<(), TimeWindowError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TimeWindowError::InvalidTimeWindow);
    }
    if now > claims.expires_at {
        return Err(TimeWindowError::Expired);
    }
    Ok(())
}
