use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hltb_app::{AppState, router};
use hltb_common::observability::init_logging;
use hltb_config::{HltbConfig, HltbConfigLoader};
use hltb_web::HltbClient;
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "hltb.yaml";

/// HowLongToBeat completion-time lookup service.
#[derive(Debug, Parser)]
#[command(name = "hltb", version, about)]
struct Cli {
    /// YAML config file. Without it `hltb.yaml` is read if present.
    #[arg(long, env = "HLTB_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port; overrides config and `PORT`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Config: defaults < PORT < file < HLTB_* env < --port
    let loader = match &cli.config {
        Some(path) => HltbConfigLoader::new().with_file(path),
        None => HltbConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg: HltbConfig = loader.load().context("loading configuration")?;
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }

    // 2) Logging
    let log_path = init_logging(cfg.logging.to_log_config("hltb"))?;

    // 3) Lookup client + HTTP server
    let client = HltbClient::from_config(&cfg.scraper)?;
    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(
        addr = %listener.local_addr()?,
        backend = ?cfg.scraper.backend,
        log_file = %log_path.display(),
        "server.listening"
    );

    axum::serve(listener, router(AppState::new(client)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server.stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("server.shutdown.requested");
}
