use bevy::prelude::*;
use bevy::window::PresentMode;
#[cfg(target_arch = "wasm32")]
use constants::scene::CANVAS_SELECTOR;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Golf Configurator".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
