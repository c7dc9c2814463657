/// Canvas the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "#configurator-canvas";

/// sRGB background, also used for the ground plane.
pub const BACKGROUND_RGB: [u8; 3] = [0x11, 0x11, 0x11];

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: [f32; 3] = [2.0, 1.6, 4.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 1.1, 0.0];

/// Orbit zoom limits in metres from the target.
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 6.0;

/// Uniform scale applied to every loaded model.
pub const MODEL_SCALE: f32 = 1.2;

/// Positioned light with a renderer-neutral intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub position: [f32; 3],
    pub intensity: f32,
}

pub const AMBIENT_INTENSITY: f32 = 0.6;

pub const KEY_LIGHT: LightRig = LightRig {
    position: [4.0, 5.0, 3.0],
    intensity: 1.2,
};

pub const RIM_LIGHT: LightRig = LightRig {
    position: [-3.0, 2.0, -2.0],
    intensity: 0.7,
};

pub const FILL_LIGHT: LightRig = LightRig {
    position: [2.0, 3.0, -4.0],
    intensity: 0.4,
};

pub const GROUND_SIZE: f32 = 20.0;
pub const GROUND_METALLIC: f32 = 0.6;
pub const GROUND_ROUGHNESS: f32 = 0.8;

/// Prefiltered cubemaps baked from `autoshop_01_1k.hdr`.
pub const ENVIRONMENT_DIFFUSE_MAP: &str = "textures/environment/autoshop_01_1k_diffuse.ktx2";
pub const ENVIRONMENT_SPECULAR_MAP: &str = "textures/environment/autoshop_01_1k_specular.ktx2";
