//! FinStock - stock quotes and watchlists in the terminal.

use anyhow::Context;
use finstock::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The TUI owns stdout, so logs go to a daily file
    let log_dir = finstock::config::log_dir().context("resolving log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "finstock.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finstock=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    let config = Config::load_or_default().context("loading configuration")?;
    tracing::info!(base_url = %config.api.base_url, "Starting FinStock");

    let mut app = App::new(config).await.context("starting terminal UI")?;
    app.run().await?;

    tracing::info!("Exiting");
    Ok(())
}
