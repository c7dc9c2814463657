use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::scene::MODEL_SCALE;
use constants::vehicle::car_model_path;

use crate::engine::assets::scene_state::{CarLoadPlan, SceneState, Slot, SlotModel};

/// Start loading `path` into `slot`.
///
/// `None` is an unknown trim and leaves the slot untouched. The previous
/// occupant stays in the scene until the new model has loaded.
pub fn begin_slot_load(
    state: &mut SceneState,
    slot: Slot,
    path: Option<&'static str>,
    load: impl FnOnce(&'static str) -> Handle<Scene>,
) -> Option<u64> {
    let Some(path) = path else {
        debug!("No {} model for the selected trim", slot.as_str());
        return None;
    };

    let generation = state.slot_mut(slot).begin(path, load(path));
    info!("Loading {} model: {} (#{})", slot.as_str(), path, generation);
    Some(generation)
}

/// Full reset for a car swap: every slot is emptied and the new body requested.
///
/// Returns the entities to despawn. Splitter and spoiler follow once the body
/// has spawned, driven by the plan stored in the scene state.
pub fn begin_car_swap(
    state: &mut SceneState,
    plan: CarLoadPlan,
    load: impl FnOnce(&'static str) -> Handle<Scene>,
) -> Vec<Entity> {
    let released = state.reset_for_car(plan);
    begin_slot_load(state, Slot::Car, Some(car_model_path(plan.trim)), load);
    released
}

/// Empty a slot immediately, cancelling any load still in flight.
pub fn clear_slot(state: &mut SceneState, slot: Slot) -> Option<Entity> {
    let released = state.slot_mut(slot).clear();
    if released.is_some() {
        info!("Removed {} model", slot.as_str());
    }
    released
}

/// Despawn model roots together with their mesh hierarchies.
pub fn despawn_models(commands: &mut Commands, entities: impl IntoIterator<Item = Entity>) {
    for entity in entities {
        commands.entity(entity).despawn();
    }
}

/// Load a scene through the asset server. Model files hold a single scene.
pub fn load_model_scene(asset_server: &AssetServer, path: &'static str) -> Handle<Scene> {
    asset_server.load(GltfAssetLabel::Scene(0).from_asset(path))
}

/// Spawn finished loads and drop failed ones.
pub fn poll_pending_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut state: ResMut<SceneState>,
) {
    for slot in Slot::ALL {
        let slot_state = state.slot_mut(slot);
        let Some(load_state) = slot_state
            .pending()
            .map(|pending| asset_server.get_load_state(&pending.scene))
        else {
            continue;
        };

        match load_state {
            Some(LoadState::Loaded) => {
                let Some(pending) = slot_state.take_pending() else {
                    continue;
                };

                let entity = commands
                    .spawn((
                        Name::new(format!("{} model", slot.as_str())),
                        SceneRoot(pending.scene),
                        Transform::from_scale(Vec3::splat(MODEL_SCALE)),
                        SlotModel {
                            slot,
                            generation: pending.generation,
                        },
                    ))
                    .id();

                match slot_state.install(pending.generation, entity) {
                    Ok(previous) => despawn_models(&mut commands, previous),
                    Err(stale) => despawn_models(&mut commands, Some(stale)),
                }
            }
            Some(LoadState::Failed(error)) => {
                if let Some(pending) = slot_state.take_pending() {
                    warn!(
                        "Failed to load {} model {}: {}",
                        slot.as_str(),
                        pending.path,
                        error
                    );
                }
                // Parts never follow a body that failed to load.
                if slot == Slot::Car {
                    state.take_car_plan();
                }
            }
            _ => {}
        }
    }
}
