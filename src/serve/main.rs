//! HTTP server for planning attribute lookups and address geocoding.
//!
//! Serves the point aggregator, the lat/lon planning summary and the
//! Nominatim pass-through from a single router.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use planproxy::config::{Config, DeploymentInfo};
use planproxy::server::{serve, AppState};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "Planning attribute and geocode proxy server")]
struct Args {
    /// Listen host
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Optional TOML file overriding upstream settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    info!("Planproxy server");
    info!("Map service: {}", config.map_service.base_url);
    info!("Geocoder: {}", config.geocoder.url);

    let state = AppState::new(&config, DeploymentInfo::from_env())?;
    serve(state, SocketAddr::new(args.host, args.port)).await
}
