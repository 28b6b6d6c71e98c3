use anyhow::Context;

use passgate_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    passgate_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        directory = %config.directory.base_url,
        directory_timeout_ms = config.directory.timeout.as_millis() as u64,
        token_ttl_secs = config.token_ttl.num_seconds(),
        "configuration loaded"
    );

    let app = passgate_api::app::build_app(&config).context("failed to initialise services")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
