use anyhow::{Context, Result};
use clap::Parser;
use interview_engine::{create_router, AppState, Config, MemoryReportStore, NatsClient, SessionManager};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "interview-engine", version, about = "Real-time interview scoring service")]
struct Args {
    /// Config file base name (".toml" is implied)
    #[arg(long, default_value = "config/interview-engine")]
    config: String,

    /// Override the HTTP port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let mut engine = SessionManager::new(&cfg);
    let mut nats = None;

    if let Some(url) = cfg.nats.url.as_deref() {
        match NatsClient::connect(url, cfg.nats.subject_prefix.clone()).await {
            Ok(client) => {
                let client = Arc::new(client);
                engine = engine.with_store(client.clone());
                nats = Some(client);
            }
            Err(e) => warn!("NATS unavailable, keeping reports in memory: {:#}", e),
        }
    }
    if nats.is_none() {
        engine = engine.with_store(Arc::new(MemoryReportStore::new()));
    }

    let engine = Arc::new(engine);
    if let Some(client) = nats {
        client.forward_updates(engine.subscribe());
    }

    let app = create_router(AppState::new(engine));
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
