//! Static showroom: lights, ground plane and image-based environment.

/// Prefiltered environment cubemaps for reflections on the paint.
pub mod environment;

/// Ground plane receiving the car's shadow.
pub mod ground;

/// Ambient term plus key, rim and fill directional lights.
pub mod lighting;
