use bevy::ecs::system::SystemParam;
use bevy::gltf::GltfMaterialName;
use bevy::prelude::*;
use constants::Trim;
use constants::paint::{DEFAULT_PAINT_HEX, PAINT_MATERIAL_NAME, colour_name_to_hex};
use constants::vehicle::{is_supported_vehicle, spoiler_path, splitter_path};
use serde_json::{Value, json};

use crate::configurator::lookup::{
    LookupCompleted, LookupState, LookupStatus, VehicleLookup, normalise_registration,
    spawn_lookup,
};
use crate::configurator::paint::{apply_paint_colour, find_paint_material, parse_hex_colour};
use crate::configurator::settings::ConfiguratorSettings;
use crate::engine::assets::scene_state::{CarLoadPlan, SceneState, Slot};
use crate::engine::loading::model_ready::ModelReady;
use crate::engine::loading::slot_loader::{
    begin_car_swap, begin_slot_load, clear_slot, despawn_models, load_model_scene,
};
use crate::rpc::web_rpc::WebRpcInterface;

pub const EMPTY_REGISTRATION_ALERT: &str = "Please enter a registration number";
pub const UNSUPPORTED_VEHICLE_ALERT: &str = "Only VW Golfs are supported right now.";
pub const LOOKUP_FAILED_ALERT: &str = "Could not retrieve vehicle details";

/// User intent, independent of where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfiguratorAction {
    SelectVariant(String),
    SetColour(String),
    ToggleSplitter(bool),
    ToggleSpoiler(bool),
    Lookup(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSource {
    Rpc,
    Keyboard,
    Startup,
    Lookup,
}

impl ActionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rpc => "rpc",
            Self::Keyboard => "keyboard",
            Self::Startup => "startup",
            Self::Lookup => "lookup",
        }
    }
}

#[derive(Event, Debug, Clone)]
pub struct ConfiguratorEvent {
    pub action: ConfiguratorAction,
    pub source: ActionSource,
}

/// Mirror of the page controls: variant selector, colour picker and part toggles.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ConfiguratorUi {
    /// `None` when the selector holds a value that is not a known trim.
    pub variant: Option<Trim>,
    pub colour_hex: String,
    pub colour: Color,
    pub show_splitter: bool,
    pub show_spoiler: bool,
}

impl Default for ConfiguratorUi {
    fn default() -> Self {
        Self {
            variant: Some(Trim::default()),
            colour_hex: DEFAULT_PAINT_HEX.to_string(),
            colour: parse_hex_colour(DEFAULT_PAINT_HEX).unwrap_or(Color::WHITE),
            show_splitter: false,
            show_spoiler: false,
        }
    }
}

impl ConfiguratorUi {
    pub fn car_plan(&self) -> CarLoadPlan {
        CarLoadPlan {
            trim: self.variant,
            show_splitter: self.show_splitter,
            show_spoiler: self.show_spoiler,
        }
    }

    /// Record a picked colour. Invalid hex leaves the selection unchanged.
    pub fn set_colour(&mut self, hex: &str) -> Option<Color> {
        let colour = parse_hex_colour(hex)?;
        self.colour = colour;
        self.colour_hex = colour.to_srgba().to_hex().to_lowercase();
        Some(colour)
    }

    pub fn snapshot(&self, lookup: LookupStatus) -> Value {
        json!({
            "variant": self.variant.map(|trim| trim.as_str()),
            "colour": self.colour_hex,
            "splitter": self.show_splitter,
            "spoiler": self.show_spoiler,
            "lookup": lookup.as_str(),
        })
    }
}

/// What to do with a settled lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupDecision {
    Configure { trim: Trim, paint_hex: &'static str },
    Unsupported,
    Incomplete,
}

pub fn evaluate_lookup(lookup: &VehicleLookup) -> LookupDecision {
    let (Some(make), Some(model), Some(colour), Some(trim)) =
        (&lookup.make, &lookup.model, &lookup.colour, lookup.trim)
    else {
        return LookupDecision::Incomplete;
    };

    if !is_supported_vehicle(make, model) {
        return LookupDecision::Unsupported;
    }

    LookupDecision::Configure {
        trim,
        paint_hex: colour_name_to_hex(Some(colour)),
    }
}

/// Blocking message for the user. Always logged and pushed to the page.
pub fn raise_alert(rpc_interface: &mut WebRpcInterface, message: &str) {
    warn!("{}", message);

    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                error!("Failed to show alert: {:?}", e);
            }
        }
    }

    rpc_interface.send_notification("configurator_alert", json!({ "message": message }));
}

/// Scene mutations shared by the configurator systems.
#[derive(SystemParam)]
pub struct SceneControl<'w, 's> {
    commands: Commands<'w, 's>,
    asset_server: Res<'w, AssetServer>,
    scene_state: ResMut<'w, SceneState>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
}

impl SceneControl<'_, '_> {
    fn reload_car(&mut self, plan: CarLoadPlan) {
        let asset_server = &self.asset_server;
        let released = begin_car_swap(&mut self.scene_state, plan, |path| {
            load_model_scene(asset_server, path)
        });
        despawn_models(&mut self.commands, released);
    }

    fn load_part(&mut self, slot: Slot, path: Option<&'static str>) {
        let asset_server = &self.asset_server;
        begin_slot_load(&mut self.scene_state, slot, path, |path| {
            load_model_scene(asset_server, path)
        });
    }

    fn unload_part(&mut self, slot: Slot) {
        let released = clear_slot(&mut self.scene_state, slot);
        despawn_models(&mut self.commands, released);
    }

    /// Show or hide a part, deferring to the pending car load if there is one.
    fn toggle_part(&mut self, slot: Slot, visible: bool, path: Option<&'static str>) {
        if let Some(plan) = self.scene_state.car_plan_mut() {
            match slot {
                Slot::Splitter => plan.show_splitter = visible,
                Slot::Spoiler => plan.show_spoiler = visible,
                Slot::Car => {}
            }
            debug!("Car still loading, {} follows it", slot.as_str());
            return;
        }

        if visible {
            self.load_part(slot, path);
        } else {
            self.unload_part(slot);
        }
    }

    fn apply_colour(&mut self, colour: Color) -> bool {
        let paint = self.scene_state.paint_material().cloned();
        apply_paint_colour(&mut self.materials, paint.as_ref(), colour)
    }
}

fn notify_variant(rpc_interface: &mut WebRpcInterface, ui: &ConfiguratorUi, source: ActionSource) {
    rpc_interface.send_notification(
        "variant_changed",
        json!({
            "trim": ui.variant.map(|trim| trim.as_str()),
            "source": source.as_str(),
        }),
    );
}

fn notify_colour(
    rpc_interface: &mut WebRpcInterface,
    ui: &ConfiguratorUi,
    applied: bool,
    source: ActionSource,
) {
    rpc_interface.send_notification(
        "colour_changed",
        json!({
            "hex": ui.colour_hex,
            "applied": applied,
            "source": source.as_str(),
        }),
    );
}

pub fn handle_configurator_actions(
    mut events: EventReader<ConfiguratorEvent>,
    mut ui: ResMut<ConfiguratorUi>,
    mut scene: SceneControl,
    mut lookup_state: ResMut<LookupState>,
    settings: Res<ConfiguratorSettings>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        debug!("{:?} via {}", event.action, event.source.as_str());

        match &event.action {
            ConfiguratorAction::SelectVariant(value) => {
                ui.variant = Trim::from_string(value);
                if ui.variant.is_none() {
                    warn!("Unknown variant '{}', showing the base car", value);
                }
                notify_variant(&mut rpc_interface, &ui, event.source);
                scene.reload_car(ui.car_plan());
            }
            ConfiguratorAction::SetColour(hex) => {
                let Some(colour) = ui.set_colour(hex) else {
                    warn!("Ignoring invalid paint colour '{}'", hex);
                    continue;
                };
                let applied = scene.apply_colour(colour);
                notify_colour(&mut rpc_interface, &ui, applied, event.source);
            }
            ConfiguratorAction::ToggleSplitter(visible) => {
                ui.show_splitter = *visible;
                scene.toggle_part(Slot::Splitter, *visible, splitter_path(ui.variant));
            }
            ConfiguratorAction::ToggleSpoiler(visible) => {
                ui.show_spoiler = *visible;
                if !ui.variant.is_some_and(|trim| trim.supports_spoiler()) {
                    debug!("No rear spoiler for the selected variant");
                    continue;
                }
                scene.toggle_part(Slot::Spoiler, *visible, spoiler_path(ui.variant));
            }
            ConfiguratorAction::Lookup(input) => {
                let Some(registration) = normalise_registration(input) else {
                    raise_alert(&mut rpc_interface, EMPTY_REGISTRATION_ALERT);
                    continue;
                };
                spawn_lookup(&settings, &mut lookup_state, registration.clone());
                rpc_interface.send_notification(
                    "lookup_state_changed",
                    json!({
                        "state": lookup_state.status().as_str(),
                        "registration": registration,
                    }),
                );
            }
        }
    }
}

/// Configure the scene from a settled lookup.
pub fn handle_lookup_completed(
    mut events: EventReader<LookupCompleted>,
    mut ui: ResMut<ConfiguratorUi>,
    mut scene: SceneControl,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match evaluate_lookup(&event.lookup) {
            LookupDecision::Incomplete => {
                error!("Missing vehicle data for {}", event.registration);
                raise_alert(
                    &mut rpc_interface,
                    &format!("{} for {}.", LOOKUP_FAILED_ALERT, event.registration),
                );
            }
            LookupDecision::Unsupported => {
                raise_alert(&mut rpc_interface, UNSUPPORTED_VEHICLE_ALERT);
            }
            LookupDecision::Configure { trim, paint_hex } => {
                info!(
                    "Configuring {} as {} in {}",
                    event.registration,
                    trim.as_str(),
                    paint_hex
                );
                ui.variant = Some(trim);
                ui.set_colour(paint_hex);
                notify_variant(&mut rpc_interface, &ui, ActionSource::Lookup);
                notify_colour(&mut rpc_interface, &ui, false, ActionSource::Lookup);
                // The paint is applied once the new body has spawned.
                scene.reload_car(ui.car_plan());
            }
        }
    }
}

/// Car-load continuation: capture the paint, apply the selected colour, then
/// request the parts the load was issued with.
pub fn handle_model_ready(
    mut events: EventReader<ModelReady>,
    ui: Res<ConfiguratorUi>,
    mut scene: SceneControl,
    children: Query<&Children>,
    named_materials: Query<(&MeshMaterial3d<StandardMaterial>, &GltfMaterialName)>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for ready in events.read() {
        if !scene.scene_state.is_current(ready.slot, ready.generation) {
            continue;
        }

        if ready.slot == Slot::Car {
            let paint = find_paint_material(ready.entity, &children, &named_materials);
            if paint.is_none() {
                warn!(
                    "Car model has no '{}' material, colour changes have no effect",
                    PAINT_MATERIAL_NAME
                );
            }
            scene.scene_state.set_paint_material(paint);
            scene.apply_colour(ui.colour);

            if let Some(plan) = scene.scene_state.take_car_plan() {
                if plan.show_splitter {
                    scene.load_part(Slot::Splitter, splitter_path(plan.trim));
                }
                if plan.show_spoiler {
                    scene.load_part(Slot::Spoiler, spoiler_path(plan.trim));
                }
            }
        }

        rpc_interface.send_notification(
            "model_loaded",
            json!({
                "slot": ready.slot.as_str(),
                "trim": ui.variant.map(|trim| trim.as_str()),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::vehicle::car_model_path;

    fn lookup(make: &str, model: &str, colour: &str) -> VehicleLookup {
        VehicleLookup {
            make: Some(make.to_string()),
            model: Some(model.to_string()),
            colour: Some(colour.to_string()),
            trim: Some(Trim::from_model_name(model)),
        }
    }

    #[test]
    fn test_golf_gti_lookup_configures_red_gti() {
        assert_eq!(
            evaluate_lookup(&lookup("VOLKSWAGEN", "Golf GTI", "RED")),
            LookupDecision::Configure {
                trim: Trim::Gti,
                paint_hex: "#c93030"
            }
        );
    }

    #[test]
    fn test_make_and_model_match_case_insensitively() {
        assert_eq!(
            evaluate_lookup(&lookup("Volkswagen", "golf r", "blue")),
            LookupDecision::Configure {
                trim: Trim::R,
                paint_hex: "#2e4cad"
            }
        );
    }

    #[test]
    fn test_other_makes_are_rejected() {
        assert_eq!(
            evaluate_lookup(&lookup("Toyota", "Golf", "RED")),
            LookupDecision::Unsupported
        );
        assert_eq!(
            evaluate_lookup(&lookup("VOLKSWAGEN", "Polo", "RED")),
            LookupDecision::Unsupported
        );
    }

    #[test]
    fn test_failed_lookup_is_incomplete() {
        assert_eq!(
            evaluate_lookup(&VehicleLookup::failed()),
            LookupDecision::Incomplete
        );
    }

    #[test]
    fn test_unknown_colour_uses_default_paint() {
        assert_eq!(
            evaluate_lookup(&lookup("VOLKSWAGEN", "Golf", "MAGENTA")),
            LookupDecision::Configure {
                trim: Trim::Base,
                paint_hex: DEFAULT_PAINT_HEX
            }
        );
    }

    #[test]
    fn test_set_colour_normalises_hex() {
        let mut ui = ConfiguratorUi::default();

        assert!(ui.set_colour("#C93030").is_some());
        assert_eq!(ui.colour_hex, "#c93030");

        assert!(ui.set_colour("blue-ish").is_none());
        assert_eq!(ui.colour_hex, "#c93030");
    }

    #[test]
    fn test_car_plan_follows_toggles() {
        let ui = ConfiguratorUi {
            variant: None,
            show_splitter: true,
            ..default()
        };

        assert_eq!(
            ui.car_plan(),
            CarLoadPlan {
                trim: None,
                show_splitter: true,
                show_spoiler: false
            }
        );
    }

    #[test]
    fn test_snapshot_reports_every_control() {
        let snapshot = ConfiguratorUi::default().snapshot(LookupStatus::Idle);

        assert_eq!(
            snapshot,
            json!({
                "variant": "base",
                "colour": DEFAULT_PAINT_HEX,
                "splitter": false,
                "spoiler": false,
                "lookup": "idle",
            })
        );
    }

    fn configurator_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<StandardMaterial>()
            .init_asset::<Scene>()
            .init_resource::<SceneState>()
            .init_resource::<ConfiguratorUi>()
            .init_resource::<LookupState>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(ConfiguratorSettings::default())
            .add_event::<ConfiguratorEvent>()
            .add_event::<ModelReady>()
            .add_event::<LookupCompleted>()
            .add_systems(
                Update,
                (
                    handle_configurator_actions,
                    handle_lookup_completed,
                    handle_model_ready,
                )
                    .chain(),
            );
        app
    }

    fn act(app: &mut App, action: ConfiguratorAction) {
        app.world_mut().send_event(ConfiguratorEvent {
            action,
            source: ActionSource::Rpc,
        });
        app.update();
    }

    /// Spawn a car hierarchy whose body mesh uses the paint material.
    fn spawn_car_body(app: &mut App) -> (Entity, Handle<StandardMaterial>) {
        let paint = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let body_paint = paint.clone();
        let root = app
            .world_mut()
            .spawn(Name::new("car model"))
            .with_children(|parent| {
                parent.spawn((
                    MeshMaterial3d(body_paint),
                    GltfMaterialName(PAINT_MATERIAL_NAME.to_string()),
                ));
                parent.spawn((
                    MeshMaterial3d(Handle::<StandardMaterial>::default()),
                    GltfMaterialName("glass".to_string()),
                ));
            })
            .id();
        (root, paint)
    }

    fn car_generation(app: &App) -> u64 {
        app.world().resource::<SceneState>().slot(Slot::Car).generation()
    }

    fn car_ready(app: &mut App, entity: Entity, generation: u64) {
        app.world_mut().send_event(ModelReady {
            slot: Slot::Car,
            entity,
            generation,
        });
        app.update();
    }

    fn base_colour(app: &App, paint: &Handle<StandardMaterial>) -> Option<Color> {
        app.world()
            .resource::<Assets<StandardMaterial>>()
            .get(paint)
            .map(|material| material.base_color)
    }

    fn is_loading(app: &App, slot: Slot) -> bool {
        app.world().resource::<SceneState>().slot(slot).is_loading()
    }

    #[test]
    fn test_toggles_during_car_load_follow_the_body() {
        let mut app = configurator_app();

        act(&mut app, ConfiguratorAction::SelectVariant("gti".to_string()));
        act(&mut app, ConfiguratorAction::ToggleSplitter(true));
        act(&mut app, ConfiguratorAction::ToggleSpoiler(true));
        act(&mut app, ConfiguratorAction::SetColour("#c93030".to_string()));

        assert!(is_loading(&app, Slot::Car));
        assert!(!is_loading(&app, Slot::Splitter));
        assert!(!is_loading(&app, Slot::Spoiler));

        let (root, paint) = spawn_car_body(&mut app);
        let generation = car_generation(&app);
        car_ready(&mut app, root, generation);

        assert_eq!(base_colour(&app, &paint), parse_hex_colour("#c93030"));
        let state = app.world().resource::<SceneState>();
        assert_eq!(state.paint_material(), Some(&paint));
        assert!(state.slot(Slot::Splitter).is_loading());
        assert!(state.slot(Slot::Spoiler).is_loading());
    }

    #[test]
    fn test_parts_toggled_off_mid_load_stay_unloaded() {
        let mut app = configurator_app();

        act(&mut app, ConfiguratorAction::ToggleSplitter(true));
        act(&mut app, ConfiguratorAction::SelectVariant("r".to_string()));
        act(&mut app, ConfiguratorAction::ToggleSplitter(false));

        let (root, _) = spawn_car_body(&mut app);
        let generation = car_generation(&app);
        car_ready(&mut app, root, generation);

        assert!(!is_loading(&app, Slot::Splitter));
        assert!(!is_loading(&app, Slot::Spoiler));
    }

    #[test]
    fn test_toggle_without_car_load_starts_part_load() {
        let mut app = configurator_app();

        act(&mut app, ConfiguratorAction::ToggleSplitter(true));

        assert!(is_loading(&app, Slot::Splitter));
        assert!(!is_loading(&app, Slot::Car));
    }

    #[test]
    fn test_superseded_car_ready_changes_nothing() {
        let mut app = configurator_app();

        act(&mut app, ConfiguratorAction::SelectVariant("gti".to_string()));
        let first = car_generation(&app);
        act(&mut app, ConfiguratorAction::ToggleSplitter(true));
        act(&mut app, ConfiguratorAction::SetColour("#2e4cad".to_string()));
        act(&mut app, ConfiguratorAction::SelectVariant("r".to_string()));
        assert_ne!(car_generation(&app), first);

        let (root, paint) = spawn_car_body(&mut app);
        car_ready(&mut app, root, first);

        assert_eq!(base_colour(&app, &paint), Some(StandardMaterial::default().base_color));
        assert!(!is_loading(&app, Slot::Splitter));
        let mut state = app.world_mut().resource_mut::<SceneState>();
        assert!(state.paint_material().is_none());
        assert!(state.car_plan_mut().is_some_and(|plan| plan.show_splitter));
    }

    #[test]
    fn test_accepted_lookup_reloads_car_in_vehicle_colour() {
        let mut app = configurator_app();
        app.world_mut().send_event(LookupCompleted {
            registration: "AB12CDE".to_string(),
            lookup: lookup("VOLKSWAGEN", "Golf R", "BLUE"),
        });
        app.update();

        let ui = app.world().resource::<ConfiguratorUi>();
        assert_eq!(ui.variant, Some(Trim::R));
        assert_eq!(ui.colour_hex, "#2e4cad");
        let pending = app
            .world()
            .resource::<SceneState>()
            .slot(Slot::Car)
            .pending()
            .map(|pending| pending.path);
        assert_eq!(pending, Some(car_model_path(Some(Trim::R))));

        let (root, paint) = spawn_car_body(&mut app);
        let generation = car_generation(&app);
        car_ready(&mut app, root, generation);

        assert_eq!(base_colour(&app, &paint), parse_hex_colour("#2e4cad"));
    }

    #[test]
    fn test_rejected_lookup_leaves_scene_alone() {
        let mut app = configurator_app();
        app.world_mut().send_event(LookupCompleted {
            registration: "AB12CDE".to_string(),
            lookup: lookup("TOYOTA", "Corolla", "RED"),
        });
        app.world_mut().send_event(LookupCompleted {
            registration: "ZZ99ZZZ".to_string(),
            lookup: VehicleLookup::failed(),
        });
        app.update();

        assert_eq!(
            *app.world().resource::<ConfiguratorUi>(),
            ConfiguratorUi::default()
        );
        assert!(!is_loading(&app, Slot::Car));
        assert_eq!(car_generation(&app), 0);
    }
}
