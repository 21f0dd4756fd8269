// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use practice_relay::{create_router, AppState, RelayConfig};

#[derive(Parser)]
#[command(name = "practice-relay")]
#[command(about = "Spoken-practice feedback relay for a generative-language API")]
#[command(version)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RelayConfig::from_env();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Startup continues without a credential; calls fail upstream instead
    for warning in config.validate() {
        warn!("{}", warning);
    }

    info!("Model: {}", config.model);
    info!("Auth mode: {}", config.auth_mode);
    info!("Rate limit: {} requests/min per caller", config.rate_limit_per_minute);

    let bind_address = config.bind_address();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Practice server listening on {}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
