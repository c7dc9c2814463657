use bevy::gltf::GltfMaterialName;
use bevy::prelude::*;
use constants::paint::PAINT_MATERIAL_NAME;

/// Parse a `#rrggbb` paint value. The leading `#` is optional.
pub fn parse_hex_colour(hex: &str) -> Option<Color> {
    Srgba::hex(hex.trim()).ok().map(Color::from)
}

/// Set the base colour of the captured paint material.
///
/// Returns `false` without touching anything when no paint is captured or the
/// handle no longer resolves.
pub fn apply_paint_colour(
    materials: &mut Assets<StandardMaterial>,
    paint: Option<&Handle<StandardMaterial>>,
    colour: Color,
) -> bool {
    let Some(material) = paint.and_then(|handle| materials.get_mut(handle)) else {
        return false;
    };
    material.base_color = colour;
    true
}

/// First material named as the body paint anywhere below `root`.
pub fn find_paint_material(
    root: Entity,
    children: &Query<&Children>,
    materials: &Query<(&MeshMaterial3d<StandardMaterial>, &GltfMaterialName)>,
) -> Option<Handle<StandardMaterial>> {
    children
        .iter_descendants(root)
        .filter_map(|entity| materials.get(entity).ok())
        .find(|(_, name)| name.0 == PAINT_MATERIAL_NAME)
        .map(|(material, _)| material.0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_parse_hex_colour() {
        assert_eq!(parse_hex_colour("#c93030"), Some(Color::srgb_u8(0xc9, 0x30, 0x30)));
        assert_eq!(parse_hex_colour("2e4cad"), Some(Color::srgb_u8(0x2e, 0x4c, 0xad)));
        assert_eq!(parse_hex_colour("not a colour"), None);
        assert_eq!(parse_hex_colour(""), None);
    }

    #[test]
    fn test_apply_without_paint_material_changes_nothing() {
        let mut materials = Assets::<StandardMaterial>::default();
        let other = materials.add(StandardMaterial::default());
        let before = materials.get(&other).map(|m| m.base_color);

        assert!(!apply_paint_colour(&mut materials, None, Color::BLACK));
        assert_eq!(materials.get(&other).map(|m| m.base_color), before);
    }

    #[test]
    fn test_apply_updates_captured_material() {
        let mut materials = Assets::<StandardMaterial>::default();
        let paint = materials.add(StandardMaterial::default());
        let red = Color::srgb_u8(0xc9, 0x30, 0x30);

        assert!(apply_paint_colour(&mut materials, Some(&paint), red));
        assert_eq!(materials.get(&paint).map(|m| m.base_color), Some(red));
    }

    #[test]
    fn test_find_paint_material_in_nested_meshes() {
        let mut materials = Assets::<StandardMaterial>::default();
        let glass = materials.add(StandardMaterial::default());
        let paint = materials.add(StandardMaterial::default());

        let mut world = World::new();
        let root = world
            .spawn(Name::new("car"))
            .with_children(|car| {
                car.spawn((
                    MeshMaterial3d(glass.clone()),
                    GltfMaterialName("glass".to_string()),
                ));
                car.spawn(Name::new("body")).with_children(|body| {
                    body.spawn((
                        MeshMaterial3d(paint.clone()),
                        GltfMaterialName(PAINT_MATERIAL_NAME.to_string()),
                    ));
                });
            })
            .id();

        let found = world
            .run_system_once(
                move |children: Query<&Children>,
                      named: Query<(&MeshMaterial3d<StandardMaterial>, &GltfMaterialName)>| {
                    find_paint_material(root, &children, &named)
                },
            )
            .unwrap();

        assert_eq!(found, Some(paint));
    }

    #[test]
    fn test_find_paint_material_absent() {
        let mut world = World::new();
        let root = world
            .spawn(Name::new("spoiler"))
            .with_children(|part| {
                part.spawn(GltfMaterialName("carbon".to_string()));
            })
            .id();

        let found = world
            .run_system_once(
                move |children: Query<&Children>,
                      named: Query<(&MeshMaterial3d<StandardMaterial>, &GltfMaterialName)>| {
                    find_paint_material(root, &children, &named)
                },
            )
            .unwrap();

        assert_eq!(found, None);
    }
}
