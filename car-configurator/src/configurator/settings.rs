use bevy::prelude::*;
use constants::network::DEFAULT_PROXY_URL;

/// Environment variable overriding the proxy location in native builds.
#[cfg(not(target_arch = "wasm32"))]
const PROXY_URL_ENV: &str = "CONFIGURATOR_PROXY_URL";

/// Runtime configuration for the configurator.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ConfiguratorSettings {
    /// Base URL of the vehicle proxy, without the route.
    pub proxy_url: String,
}

impl Default for ConfiguratorSettings {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
        }
    }
}

impl ConfiguratorSettings {
    pub fn with_proxy_override(override_url: Option<String>) -> Self {
        match override_url.map(|url| url.trim().to_string()) {
            Some(url) if !url.is_empty() => Self { proxy_url: url },
            _ => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let settings = Self::with_proxy_override(std::env::var(PROXY_URL_ENV).ok());
        info!("Vehicle proxy at {}", settings.proxy_url);
        settings
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_replaces_default() {
        let settings = ConfiguratorSettings::with_proxy_override(Some(" http://10.0.0.2:8080 ".into()));
        assert_eq!(settings.proxy_url, "http://10.0.0.2:8080");
    }

    #[test]
    fn test_blank_override_keeps_default() {
        assert_eq!(
            ConfiguratorSettings::with_proxy_override(Some("  ".into())),
            ConfiguratorSettings::default()
        );
        assert_eq!(
            ConfiguratorSettings::with_proxy_override(None).proxy_url,
            DEFAULT_PROXY_URL
        );
    }
}
