//! Signed, time-bounded access tokens.
//!
//! Tokens are compact JWTs signed with HMAC-SHA256. The signature covers the
//! header and every claim (subject, role, user id, `iat`, `exp`), so none of
//! them can change without invalidating the token.
//!
//! Expiry is checked by this module against an explicit `now` rather than by
//! `jsonwebtoken`'s built-in `exp` validation, so that the clock is injectable
//! and the boundary rules live in one place ([`crate::claims`]).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use passgate_core::UserId;

use crate::claims::{TokenClaims, check_time_window};
use crate::Role;

/// Smallest accepted HMAC key, in bytes (the SHA-256 block output size).
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime, in seconds (100 years).
pub const MAX_TTL_SECS: i64 = 100 * 365 * 86_400;

/// An encoded access token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Startup-time codec construction failure, or an encoding fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("signing key is too short ({len} bytes, need at least {MIN_SECRET_LEN})")]
    WeakKey { len: usize },

    #[error("token ttl must be positive and at most {MAX_TTL_SECS} seconds")]
    InvalidTtl,

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// A token failed verification.
///
/// Carries a diagnostic only. Signature mismatch, malformed input and expiry
/// are deliberately not distinguishable by type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct InvalidToken {
    reason: String,
}

impl InvalidToken {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<jsonwebtoken::errors::Error> for InvalidToken {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => Self::new("signature mismatch"),
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                Self::new("unsupported signing algorithm")
            }
            ErrorKind::MissingRequiredClaim(claim) => Self::new(format!("missing claim '{claim}'")),
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::new("malformed token"),
            _ => Self::new(err.to_string()),
        }
    }
}

/// Issues and verifies access tokens with a process-wide symmetric key.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, CodecError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(CodecError::WeakKey { len: secret.len() });
        }
        if ttl <= Duration::zero() || ttl > Duration::seconds(MAX_TTL_SECS) {
            return Err(CodecError::InvalidTtl);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Issue a token valid from now for the configured TTL.
    pub fn issue(&self, username: &str, role: &str, user_id: UserId) -> Result<Token, CodecError> {
        self.issue_at(username, role, user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// `now` is truncated to whole seconds, matching the wire precision.
    pub fn issue_at(
        &self,
        username: &str,
        role: &str,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Token, CodecError> {
        let issued_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        let claims = TokenClaims {
            sub: username.to_string(),
            role: Role::from(role),
            user_id,
            issued_at,
            expires_at: issued_at
                .checked_add_signed(self.ttl)
                .ok_or_else(|| CodecError::Encoding("expiry out of range".to_string()))?,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(Token)
            .map_err(|e| CodecError::Encoding(e.to_string()))
    }

    /// Verify signature, structure and validity window against the current time.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, InvalidToken> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, InvalidToken> {
        let claims = self.extract_claims(token)?;
        check_time_window(&claims, now).map_err(|e| InvalidToken::new(e.to_string()))?;
        Ok(claims)
    }

    /// Decode claims after checking the signature only.
    ///
    /// Does **not** enforce expiry; use [`TokenCodec::verify`] unless the
    /// token has already been verified.
    pub fn extract_claims(&self, token: &str) -> Result<TokenClaims, InvalidToken> {
        let token = token.trim();
        if token.is_empty() {
            return Err(InvalidToken::new("empty token"));
        }

        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn codec(ttl_secs: i64) -> TokenCodec {
        TokenCodec::new(SECRET, Duration::seconds(ttl_secs)).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn rejects_short_keys_and_empty_ttl() {
        assert_eq!(
            TokenCodec::new(b"short", Duration::seconds(60)).unwrap_err(),
            CodecError::WeakKey { len: 5 }
        );
        assert_eq!(
            TokenCodec::new(SECRET, Duration::zero()).unwrap_err(),
            CodecError::InvalidTtl
        );
    }

    #[test]
    fn oversized_ttl_is_rejected_at_construction() {
        for secs in [MAX_TTL_SECS + 1, 10_000_000_000_000] {
            assert_eq!(
                TokenCodec::new(SECRET, Duration::seconds(secs)).unwrap_err(),
                CodecError::InvalidTtl
            );
        }

        let longest = codec(MAX_TTL_SECS);
        let token = longest.issue("alice", "MEMBER", UserId::new(9)).unwrap();
        assert!(longest.verify(token.as_str()).is_ok());
    }

    #[test]
    fn verifier_clock_behind_issuer_is_accepted() {
        let codec = codec(3600);
        let token = codec.issue_at("alice", "MEMBER", UserId::new(9), t0()).unwrap();

        let claims = codec.verify_at(token.as_str(), t0() - Duration::seconds(1)).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(codec.verify_at(token.as_str(), t0() - Duration::minutes(5)).is_ok());
    }

    #[test]
    fn expiry_boundaries() {
        let codec = codec(3600);
        let token = codec.issue_at("alice", "MEMBER", UserId::new(9), t0()).unwrap();

        assert!(codec.verify_at(token.as_str(), t0()).is_ok());
        assert!(codec.verify_at(token.as_str(), t0() + Duration::seconds(3600)).is_ok());

        let err = codec
            .verify_at(token.as_str(), t0() + Duration::seconds(3601))
            .unwrap_err();
        assert_eq!(err.reason(), "token has expired");
    }

    #[test]
    fn extract_claims_ignores_expiry() {
        let codec = codec(60);
        let token = codec.issue_at("alice", "MEMBER", UserId::new(9), t0()).unwrap();

        // Long past expiry against the real clock.
        assert!(codec.verify(token.as_str()).is_err());
        let claims = codec.extract_claims(token.as_str()).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[test]
    fn fresh_token_verifies_against_wall_clock() {
        let codec = codec(60);
        let token = codec.issue("bob", "ADMIN", UserId::new(1)).unwrap();
        let claims = codec.verify(token.as_str()).unwrap();
        assert_eq!(claims.expires_at - claims.issued_at, Duration::seconds(60));
    }

    #[test]
    fn any_tampered_character_is_rejected() {
        let codec = codec(3600);
        let token = codec.issue_at("alice", "MEMBER", UserId::new(9), t0()).unwrap();
        let original = token.as_str();

        for (idx, ch) in original.char_indices() {
            if ch == '.' {
                continue;
            }
            let replacement = if ch == 'A' { 'B' } else { 'A' };
            let mut tampered = original.to_string();
            tampered.replace_range(idx..idx + 1, &replacement.to_string());

            assert!(
                codec.verify_at(&tampered, t0()).is_err(),
                "tampering at index {idx} went undetected"
            );
        }
    }

    #[test]
    fn foreign_key_is_a_signature_mismatch() {
        let ours = codec(3600);
        let theirs = TokenCodec::new(b"ffffffffffffffffffffffffffffffff", Duration::seconds(3600)).unwrap();
        let token = theirs.issue_at("alice", "MEMBER", UserId::new(9), t0()).unwrap();

        let err = ours.verify_at(token.as_str(), t0()).unwrap_err();
        assert_eq!(err.reason(), "signature mismatch");
    }

    #[test]
    fn garbage_is_invalid_not_a_panic() {
        let codec = codec(3600);
        for input in ["", "   ", "abc", "a.b.c", "...", "eyJhbGciOiJub25lIn0.e30."] {
            assert!(codec.verify_at(input, t0()).is_err(), "accepted {input:?}");
        }
    }

    proptest! {
        #[test]
        fn issue_then_verify_round_trips(
            username in "[a-zA-Z0-9_.@-]{1,32}",
            role in "[A-Z_]{1,16}",
            id in any::<i64>(),
        ) {
            let codec = codec(600);
            let token = codec.issue_at(&username, &role, UserId::new(id), t0()).unwrap();

            let claims = codec.verify_at(token.as_str(), t0()).unwrap();
            prop_assert_eq!(claims.username(), username.as_str());
            prop_assert_eq!(claims.role.as_str(), role.as_str());
            prop_assert_eq!(claims.user_id, UserId::new(id));

            let extracted = codec.extract_claims(token.as_str()).unwrap();
            prop_assert_eq!(extracted, claims);
        }
    }
}
