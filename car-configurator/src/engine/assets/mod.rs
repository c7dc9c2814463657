//! Session scene state for the configurator.
//!
//! Tracks which model occupies each slot, the request currently in flight for
//! it, and the paint material captured from the car body.

/// Slot bookkeeping with per-slot generations.
pub mod scene_state;
