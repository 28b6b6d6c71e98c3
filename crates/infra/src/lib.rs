//! Infrastructure layer: adapters for external services.

pub mod directory;

pub use directory::{DirectoryConfig, HttpUserDirectory, InMemoryUserDirectory};
