//! Adapters for the [`passgate_auth::UserDirectory`] port.
//!
//! - [`HttpUserDirectory`]: the real directory service over HTTP.
//! - [`InMemoryUserDirectory`]: a stand-in for tests and local development.

pub mod http;
pub mod in_memory;

pub use http::{DirectoryConfig, HttpUserDirectory};
pub use in_memory::InMemoryUserDirectory;

/// Path of the directory's create-user endpoint.
pub const CREATE_USER_PATH: &str = "/api/users/internal/create";

/// Path of the directory's credential-check endpoint.
pub const VALIDATE_CREDENTIALS_PATH: &str = "/api/users/internal/validate";
