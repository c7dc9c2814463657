use axum::body::Bytes;
use constants::network::REGISTRATION_PARAM;
use serde::de::IgnoredAny;
use tracing::{debug, info};

use crate::config::ProxyConfig;
use crate::error::ProxyError;

#[derive(Clone)]
pub struct VehicleDataClient {
    client: reqwest::Client,
    endpoint: String,
    package_name: String,
    api_key: String,
}

impl VehicleDataClient {
    pub fn new(config: &ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            package_name: config.package_name.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch the record for `vrm` and return the body untouched once it is
    /// known to be JSON. The upstream status is not inspected.
    pub async fn lookup(&self, vrm: &str) -> Result<Bytes, ProxyError> {
        info!(endpoint = %self.endpoint, "Fetching vehicle data");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("packagename", self.package_name.as_str()),
                ("apikey", self.api_key.as_str()),
                (REGISTRATION_PARAM, vrm),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body)?;

        debug!(%status, body = %String::from_utf8_lossy(&body), "Upstream responded");
        Ok(body)
    }
}
