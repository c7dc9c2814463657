use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;
use constants::scene::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_POSITION, CAMERA_TARGET,
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
};

const ROTATE_SENSITIVITY: f32 = 0.005;
const ZOOM_STEP: f32 = 0.1;
const PITCH_LIMIT: f32 = 1.55;
const DAMPING: f32 = 12.0;

/// Desired orbit around a fixed target. The camera transform eases towards it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let horizontal = Vec2::new(offset.x, offset.z).length();

        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: offset.y.atan2(horizontal),
            distance,
        }
    }

    /// Camera position for the current yaw, pitch and distance.
    pub fn translation(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ROTATE_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ROTATE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive `amount` moves closer. Distance stays within the orbit limits.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance * (1.0 - amount * ZOOM_STEP))
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(Vec3::from(CAMERA_POSITION), Vec3::from(CAMERA_TARGET))
    }
}

pub fn spawn_camera(commands: &mut Commands, environment: EnvironmentMapLight) {
    let orbit = OrbitCamera::default();

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Transform::from_translation(orbit.translation()).looking_at(orbit.target, Vec3::Y),
        environment,
    ));
    commands.insert_resource(orbit);
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(mouse_delta);
    }

    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.01,
        })
        .sum();
    if scroll.abs() > f32::EPSILON {
        orbit.zoom(scroll);
    }

    let lerp_speed = (DAMPING * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform
        .translation
        .lerp(orbit.translation(), lerp_speed);
    camera_transform.look_at(orbit.target, Vec3::Y);
}
