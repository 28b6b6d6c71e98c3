//! `passgate-core` — domain primitives shared by every layer.
//!
//! This crate contains **pure domain** types (no IO, no transport concerns).

pub mod error;
pub mod id;
pub mod identity;

pub use error::{AuthError, AuthErrorKind, AuthOutcome};
pub use id::UserId;
pub use identity::Identity;
