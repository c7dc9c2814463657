use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use constants::scene::BACKGROUND_RGB;

use crate::configurator::ConfiguratorPlugin;
use crate::engine::camera::orbit_camera::{camera_controller, spawn_camera};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::ModelLoadingPlugin;
use crate::engine::scene::environment::environment_map_light;
use crate::engine::scene::ground::spawn_ground;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};

pub fn create_app() -> App {
    let mut app = App::new();
    let [r, g, b] = BACKGROUND_RGB;

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(WebRpcPlugin)
        .add_plugins(ModelLoadingPlugin)
        .add_plugins(ConfiguratorPlugin)
        .insert_resource(ClearColor(Color::srgb_u8(r, g, b)));

    app.add_systems(Startup, setup)
        .add_systems(Update, (camera_controller, fps_notification_system));

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system spawning the static showroom.
fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    info!("Starting Golf configurator");

    spawn_camera(&mut commands, environment_map_light(&asset_server));
    spawn_lighting(&mut commands);
    spawn_ground(&mut commands, &mut meshes, &mut materials);

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_fps_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
