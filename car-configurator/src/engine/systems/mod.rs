//! Runtime diagnostics.
//!
//! Frame rate reporting to the host page over RPC and the native overlay.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the frontend via RPC and updates the native overlay.
pub mod fps_tracking;
