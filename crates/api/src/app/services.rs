use std::sync::Arc;

use thiserror::Error;

use passgate_auth::{AuthService, CodecError, DirectoryError, TokenCodec, UserDirectory};
use passgate_infra::HttpUserDirectory;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("token signing configuration: {0}")]
    Codec(#[from] CodecError),

    #[error("user directory client: {0}")]
    Directory(#[from] DirectoryError),
}

/// Everything the handlers need; built once, shared read-only.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
}

pub fn build_services(config: &AppConfig) -> Result<AppServices, StartupError> {
    let directory = Arc::new(HttpUserDirectory::new(&config.directory)?);
    with_directory(config, directory)
}

/// Wire the orchestrator around an arbitrary directory implementation.
pub fn with_directory(
    config: &AppConfig,
    directory: Arc<dyn UserDirectory>,
) -> Result<AppServices, StartupError> {
    let codec = TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl)?;
    let auth = AuthService::new(directory, codec, config.directory.timeout);
    Ok(AppServices { auth })
}
