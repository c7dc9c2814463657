use std::fmt;
use std::time::Duration;

use clap::Parser;
use constants::network::{DEFAULT_PACKAGE_NAME, DEFAULT_PROXY_PORT, DEFAULT_UPSTREAM_ENDPOINT};

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Command line and environment configuration.
#[derive(Clone, Parser)]
#[command(name = "vehicle-proxy")]
#[command(about = "Registration lookup proxy for the Golf configurator")]
#[command(version)]
pub struct ProxyConfig {
    /// Port to listen on
    #[arg(long, env = "VEHICLE_PROXY_PORT", default_value_t = DEFAULT_PROXY_PORT)]
    pub port: u16,

    /// Vehicle-data lookup endpoint
    #[arg(long, env = "VDG_ENDPOINT", default_value = DEFAULT_UPSTREAM_ENDPOINT)]
    pub endpoint: String,

    /// Data package requested from the vehicle-data API
    #[arg(long, env = "VDG_PACKAGE_NAME", default_value = DEFAULT_PACKAGE_NAME)]
    pub package_name: String,

    /// Vehicle-data API key
    #[arg(long, env = "VDG_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "VEHICLE_PROXY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl ProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Keeps the key out of logs.
impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("port", &self.port)
            .field("endpoint", &self.endpoint)
            .field("package_name", &self.package_name)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
