//! Core application setup.
//!
//! Builds the Bevy app with its plugins, window and showroom scene for both
//! native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Registers the loading, configurator and RPC plugins and spawns the
/// camera, lights and ground at startup.
pub mod app_setup;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
