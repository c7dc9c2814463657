#[cfg(not(target_arch = "wasm32"))]
use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use constants::Trim;
use constants::paint::PAINT_PALETTE;

#[cfg(not(target_arch = "wasm32"))]
use crate::configurator::controller::{
    ActionSource, ConfiguratorAction, ConfiguratorEvent, ConfiguratorUi,
};

/// Palette entry after `current`, wrapping around. Colours outside the
/// palette restart from its first entry.
pub fn next_palette_hex(current: &str) -> &'static str {
    let next = PAINT_PALETTE
        .iter()
        .position(|(_, hex)| hex.eq_ignore_ascii_case(current))
        .map_or(0, |index| (index + 1) % PAINT_PALETTE.len());
    PAINT_PALETTE[next].1
}

/// Keyboard stand-ins for the page controls in native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_configurator_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    ui: Res<ConfiguratorUi>,
    mut events: EventWriter<ConfiguratorEvent>,
) {
    let mut send = |action| {
        events.write(ConfiguratorEvent {
            action,
            source: ActionSource::Keyboard,
        });
    };

    for (key, trim) in [
        (KeyCode::Digit1, Trim::Base),
        (KeyCode::Digit2, Trim::Gti),
        (KeyCode::Digit3, Trim::R),
    ] {
        if keyboard.just_pressed(key) {
            send(ConfiguratorAction::SelectVariant(trim.as_str().to_string()));
        }
    }

    if keyboard.just_pressed(KeyCode::KeyS) {
        send(ConfiguratorAction::ToggleSplitter(!ui.show_splitter));
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        send(ConfiguratorAction::ToggleSpoiler(!ui.show_spoiler));
    }

    if keyboard.just_pressed(KeyCode::KeyC) {
        send(ConfiguratorAction::SetColour(
            next_palette_hex(&ui.colour_hex).to_string(),
        ));
    }
}

/// Placeholder system for WASM builds where the page drives everything over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_configurator_shortcuts() {}
