use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use constants::scene::{BACKGROUND_RGB, GROUND_METALLIC, GROUND_ROUGHNESS, GROUND_SIZE};

pub fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let [r, g, b] = BACKGROUND_RGB;

    commands.spawn((
        Name::new("ground"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(r, g, b),
            metallic: GROUND_METALLIC,
            perceptual_roughness: GROUND_ROUGHNESS,
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
    ));
}
