use anyhow::Context;
use clap::Parser;
use flapi::adapters::metrics_handler::MetricsCollector;
use flapi::cli::Cli;
use flapi::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flapi=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!(
        max_amount = settings.generation.max_amount,
        seeded = settings.generation.seed.is_some(),
        "Starting Flapi mock data server on {}:{}",
        host,
        port
    );

    let metrics = Arc::new(MetricsCollector::new()?);
    let app = flapi::create_app(Arc::new(settings), metrics);

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
