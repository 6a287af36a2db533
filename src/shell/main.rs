use schedule_import::shell::{self, config::AppConfig, http::router};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("schedule_import=info,tower_http=info")),
        )
        .init();

    let shutdown = CancellationToken::new();
    let app = shell::build(&config, shutdown.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, upload_dir = %config.upload_dir.display(), "listening");

    let signal = shutdown.clone();
    axum::serve(listener, router(app.state))
        .with_graceful_shutdown(async move {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::error!(%error, "cannot listen for shutdown signal");
            }
            signal.cancel();
        })
        .await?;

    shutdown.cancel();
    app.workers.join().await;
    tracing::info!("stopped");
    Ok(())
}
