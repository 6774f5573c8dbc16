//! HTTP server exposing the attendance eligibility engine.

use std::net::SocketAddr;

use clap::Parser;
use tracing::info;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;

/// Attendance engine server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing rules.yaml, payroll.yaml and client.yaml
    #[arg(short, long, default_value = "./config/default")]
    config: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::load(&args.config)?;
    info!(
        config_dir = %args.config,
        radius_m = config.default_rules().radius_meters,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let addr: SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
