use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;
use constants::scene::{ENVIRONMENT_DIFFUSE_MAP, ENVIRONMENT_SPECULAR_MAP};

/// Image-based lighting strength in cd/m².
const ENVIRONMENT_INTENSITY: f32 = 900.0;

/// Environment light for the camera, loading both prefiltered cubemaps.
pub fn environment_map_light(asset_server: &AssetServer) -> EnvironmentMapLight {
    EnvironmentMapLight {
        diffuse_map: asset_server.load(ENVIRONMENT_DIFFUSE_MAP),
        specular_map: asset_server.load(ENVIRONMENT_SPECULAR_MAP),
        intensity: ENVIRONMENT_INTENSITY,
        ..default()
    }
}
