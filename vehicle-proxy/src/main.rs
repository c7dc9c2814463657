use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vehicle_proxy::config::ProxyConfig;
use vehicle_proxy::routes::create_router;
use vehicle_proxy::server::run_server;
use vehicle_proxy::upstream::VehicleDataClient;

const DEFAULT_LOG_FILTER: &str = "vehicle_proxy=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ProxyConfig::parse();
    info!(
        endpoint = %config.endpoint,
        package = %config.package_name,
        timeout_secs = config.timeout_secs,
        "Starting vehicle proxy"
    );

    let client = VehicleDataClient::new(&config).context("Failed to build upstream HTTP client")?;
    run_server(config.port, create_router(client))
        .await
        .context("Vehicle proxy server failed")?;

    Ok(())
}
