//! Model loading for the configurator slots.
//!
//! Requests glTF scenes through the asset server, spawns them once loaded and
//! announces each model when its hierarchy is ready. Superseded loads are
//! dropped at every stage by comparing slot generations.

use bevy::prelude::*;

use crate::engine::assets::scene_state::SceneState;

/// Announcement that a slot model finished spawning, with shadow flags applied.
pub mod model_ready;

/// Slot requests, car swaps and the per-frame load poll.
///
/// Installs finished loads and releases whatever they replace.
pub mod slot_loader;

use model_ready::{ModelReady, on_scene_instance_ready};
use slot_loader::poll_pending_loads;

pub struct ModelLoadingPlugin;

impl Plugin for ModelLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneState>()
            .add_event::<ModelReady>()
            .add_systems(Update, poll_pending_loads)
            .add_observer(on_scene_instance_ready);
    }
}
