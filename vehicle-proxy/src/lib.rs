//! Registration lookup proxy for the configurator.
//!
//! Serves `GET /api/vehicle?vrm=...`, forwards the registration to the
//! vehicle-data API with the configured credentials and relays the JSON body.
//! The API key only ever lives in this process's configuration.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

/// Client for the third-party vehicle-data API.
pub mod upstream;
