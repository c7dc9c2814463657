//! Shared configuration for the configurator engine and the vehicle proxy.
//!
//! Engine-agnostic values only: asset paths keyed by trim, the paint palette,
//! scene rig numbers and network defaults. Nothing here depends on bevy so the
//! proxy can link it without pulling in the renderer.

/// Network defaults shared by the lookup client and the proxy server.
pub mod network;

/// Paint material naming and the fixed colour-name palette.
pub mod paint;

/// Camera, lighting and ground values for the showroom scene.
pub mod scene;

/// Trim enumeration, supported vehicle rules and per-trim asset paths.
pub mod vehicle;

pub use vehicle::Trim;
