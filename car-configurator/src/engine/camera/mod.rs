//! Orbit camera around the showroom car.
//!
//! Left drag rotates, the wheel zooms within fixed limits, panning is
//! disabled and motion is damped.

/// Orbit camera resource, spawn helper and controller system.
pub mod orbit_camera;
