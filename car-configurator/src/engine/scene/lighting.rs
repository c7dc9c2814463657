use bevy::prelude::*;
use constants::scene::{AMBIENT_INTENSITY, FILL_LIGHT, KEY_LIGHT, LightRig, RIM_LIGHT};

/// Brightness of a unit-intensity ambient light.
const AMBIENT_BRIGHTNESS_SCALE: f32 = 500.0;
/// Illuminance in lux of a unit-intensity directional light.
const DIRECTIONAL_LUX_SCALE: f32 = 10_000.0;

pub fn ambient_light() -> AmbientLight {
    AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_SCALE,
        ..default()
    }
}

fn directional_light(rig: LightRig) -> (DirectionalLight, Transform) {
    (
        DirectionalLight {
            illuminance: rig.intensity * DIRECTIONAL_LUX_SCALE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from(rig.position)).looking_at(Vec3::ZERO, Vec3::Y),
    )
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(ambient_light());

    for (name, rig) in [("key", KEY_LIGHT), ("rim", RIM_LIGHT), ("fill", FILL_LIGHT)] {
        commands.spawn((Name::new(format!("{name} light")), directional_light(rig)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_light_points_at_origin() {
        let (light, transform) = directional_light(KEY_LIGHT);

        assert!(light.shadows_enabled);
        assert_eq!(light.illuminance, 12_000.0);
        let towards_origin = -Vec3::from(KEY_LIGHT.position).normalize();
        assert!(transform.forward().dot(towards_origin) > 0.999);
    }

    #[test]
    fn test_lights_keep_their_relative_strength() {
        let key = directional_light(KEY_LIGHT).0.illuminance;
        let rim = directional_light(RIM_LIGHT).0.illuminance;
        let fill = directional_light(FILL_LIGHT).0.illuminance;

        assert!(key > rim && rim > fill);
    }
}
