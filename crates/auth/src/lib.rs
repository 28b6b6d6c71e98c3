//! `passgate-auth` — token lifecycle and register/login orchestration.
//!
//! This crate is decoupled from HTTP: the user directory is reached through
//! the [`UserDirectory`] port, and callers map [`passgate_core::AuthError`]
//! kinds onto their own status codes.

pub mod claims;
pub mod codec;
pub mod directory;
pub mod message;
pub mod roles;
pub mod service;

pub use claims::TokenClaims;
pub use codec::{CodecError, InvalidToken, MAX_TTL_SECS, MIN_SECRET_LEN, Token, TokenCodec};
pub use directory::{
    CreateUserRequest, DirectoryError, DirectoryResponse, UserDirectory, ValidateCredentialsRequest,
};
pub use message::extract_error_message;
pub use roles::Role;
pub use service::{AuthResult, AuthService, ValidationResult};
