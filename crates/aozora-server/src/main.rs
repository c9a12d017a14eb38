use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aozora_local::{ArchiveFetcher, TextLoader};
use aozora_server::{app, AppState, Catalog};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "aozora-server")]
#[command(about = "Typing-practice web server for Aozora Bunko excerpts", long_about = None)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "AOZORA_ADDR", default_value = "127.0.0.1:5000")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let state = Arc::new(AppState {
        catalog: Catalog::aozora(),
        loader: TextLoader::new(ArchiveFetcher::new()?),
    });

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    tracing::info!(addr = %cli.addr, "listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server exited");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
