//! Configurator behaviour layered on the engine.
//!
//! Maps page controls (variant, paint, part toggles, registration lookup) to
//! slot loads and paint updates, and keeps the page informed through RPC
//! notifications.

use bevy::prelude::*;
use constants::Trim;

/// Action handling, lookup evaluation and the car-load continuation.
pub mod controller;

/// Registration lookup through the vehicle proxy.
///
/// Requests run off the schedule and report back through an inbox; only the
/// newest request can settle the lookup state.
pub mod lookup;

/// Paint capture and colour application.
pub mod paint;

pub mod settings;

/// Native keyboard shortcuts.
pub mod shortcuts;

use controller::{
    ActionSource, ConfiguratorAction, ConfiguratorEvent, ConfiguratorUi,
    handle_configurator_actions, handle_lookup_completed, handle_model_ready,
};
use lookup::{LookupCompleted, LookupState, poll_lookup_results};
use settings::ConfiguratorSettings;
use shortcuts::handle_configurator_shortcuts;

pub struct ConfiguratorPlugin;

impl Plugin for ConfiguratorPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ConfiguratorSettings::from_env())
            .init_resource::<ConfiguratorUi>()
            .init_resource::<LookupState>()
            .add_event::<ConfiguratorEvent>()
            .add_event::<LookupCompleted>()
            .add_systems(Startup, load_default_car)
            .add_systems(
                Update,
                (
                    handle_configurator_shortcuts,
                    handle_configurator_actions,
                    poll_lookup_results,
                    handle_lookup_completed,
                    handle_model_ready,
                )
                    .chain(),
            );
    }
}

fn load_default_car(mut events: EventWriter<ConfiguratorEvent>) {
    events.write(ConfiguratorEvent {
        action: ConfiguratorAction::SelectVariant(Trim::default().as_str().to_string()),
        source: ActionSource::Startup,
    });
}
