use bevy::prelude::*;
use constants::Trim;

/// Independently loadable scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Car,
    Splitter,
    Spoiler,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Car, Slot::Splitter, Slot::Spoiler];

    /// Identifier used in notifications and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Splitter => "splitter",
            Self::Spoiler => "spoiler",
        }
    }
}

/// Tags the root entity of a spawned model with the load that produced it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotModel {
    pub slot: Slot,
    pub generation: u64,
}

/// Asset request waiting for the asset server.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    pub generation: u64,
    pub path: &'static str,
    pub scene: Handle<Scene>,
}

/// Occupant, pending request and generation of one slot.
///
/// Every request or unload bumps the generation. A completed load is only
/// installed while its generation is still current.
#[derive(Debug, Default)]
pub struct SlotState {
    entity: Option<Entity>,
    generation: u64,
    pending: Option<PendingLoad>,
}

impl SlotState {
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending(&self) -> Option<&PendingLoad> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a new request, superseding any request still in flight.
    pub fn begin(&mut self, path: &'static str, scene: Handle<Scene>) -> u64 {
        self.generation += 1;
        self.pending = Some(PendingLoad {
            generation: self.generation,
            path,
            scene,
        });
        self.generation
    }

    pub fn take_pending(&mut self) -> Option<PendingLoad> {
        self.pending.take()
    }

    /// Make `entity` the occupant if `generation` is still current.
    ///
    /// Returns the displaced occupant, or `Err(entity)` when the load is stale
    /// and the new entity must be discarded instead.
    pub fn install(&mut self, generation: u64, entity: Entity) -> Result<Option<Entity>, Entity> {
        if generation != self.generation {
            return Err(entity);
        }
        Ok(self.entity.replace(entity))
    }

    /// Empty the slot and invalidate anything in flight.
    pub fn clear(&mut self) -> Option<Entity> {
        self.generation += 1;
        self.pending = None;
        self.entity.take()
    }
}

/// Flags carried by a car load until the body has spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarLoadPlan {
    pub trim: Option<Trim>,
    pub show_splitter: bool,
    pub show_spoiler: bool,
}

/// Session scene state: slot occupants and the captured paint material.
#[derive(Resource, Debug, Default)]
pub struct SceneState {
    car: SlotState,
    splitter: SlotState,
    spoiler: SlotState,
    paint_material: Option<Handle<StandardMaterial>>,
    car_plan: Option<CarLoadPlan>,
}

impl SceneState {
    pub fn slot(&self, slot: Slot) -> &SlotState {
        match slot {
            Slot::Car => &self.car,
            Slot::Splitter => &self.splitter,
            Slot::Spoiler => &self.spoiler,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        match slot {
            Slot::Car => &mut self.car,
            Slot::Splitter => &mut self.splitter,
            Slot::Spoiler => &mut self.spoiler,
        }
    }

    pub fn is_current(&self, slot: Slot, generation: u64) -> bool {
        self.slot(slot).generation() == generation
    }

    pub fn paint_material(&self) -> Option<&Handle<StandardMaterial>> {
        self.paint_material.as_ref()
    }

    pub fn set_paint_material(&mut self, material: Option<Handle<StandardMaterial>>) {
        self.paint_material = material;
    }

    /// Plan of the car load in flight, if any.
    pub fn car_plan_mut(&mut self) -> Option<&mut CarLoadPlan> {
        self.car_plan.as_mut()
    }

    pub fn take_car_plan(&mut self) -> Option<CarLoadPlan> {
        self.car_plan.take()
    }

    /// Drop every slot occupant and the paint material ahead of a car swap.
    ///
    /// Returns the entities that must be despawned.
    pub fn reset_for_car(&mut self, plan: CarLoadPlan) -> Vec<Entity> {
        self.paint_material = None;
        self.car_plan = Some(plan);
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.slot_mut(slot).clear())
            .collect()
    }
}
