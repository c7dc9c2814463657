use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::assets::scene_state::{SceneState, Slot, SlotModel};

/// Fired once a slot model's hierarchy exists in the world.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelReady {
    pub slot: Slot,
    pub entity: Entity,
    pub generation: u64,
}

/// Observer for spawned scenes: drops superseded models, makes every mesh
/// cast and receive shadows, then announces the model.
pub fn on_scene_instance_ready(
    trigger: Trigger<SceneInstanceReady>,
    models: Query<&SlotModel>,
    children: Query<&Children>,
    meshes: Query<(), With<Mesh3d>>,
    scene_state: Res<SceneState>,
    mut commands: Commands,
    mut ready_events: EventWriter<ModelReady>,
) {
    let root = trigger.target();
    let Ok(model) = models.get(root) else {
        return;
    };

    if !scene_state.is_current(model.slot, model.generation) {
        debug!(
            "Discarding superseded {} model (#{})",
            model.slot.as_str(),
            model.generation
        );
        return;
    }

    let mesh_count = enable_mesh_shadows(&mut commands, root, &children, &meshes);
    info!(
        "{} model ready with {} meshes",
        model.slot.as_str(),
        mesh_count
    );

    ready_events.write(ModelReady {
        slot: model.slot,
        entity: root,
        generation: model.generation,
    });
}

/// Strip shadow opt-outs from every mesh below `root`.
pub fn enable_mesh_shadows(
    commands: &mut Commands,
    root: Entity,
    children: &Query<&Children>,
    meshes: &Query<(), With<Mesh3d>>,
) -> usize {
    let mut mesh_count = 0;
    for descendant in children.iter_descendants(root) {
        if meshes.contains(descendant) {
            commands
                .entity(descendant)
                .remove::<(NotShadowCaster, NotShadowReceiver)>();
            mesh_count += 1;
        }
    }
    mesh_count
}
