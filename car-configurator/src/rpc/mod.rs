//! JSON-RPC 2.0 communication layer for the hosting page.
//!
//! The configurator runs in a canvas embedded by a page that owns the form
//! controls. Control changes arrive as `postMessage` requests; state changes
//! go back as notifications.
//!
//! ## Message Flow
//!
//! ```text
//! Page (parent window)  <──postMessage──>  Bevy (canvas)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Decode, queue ConfiguratorEvent
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        ├─ Notification (no ID) ───────────────> ├─ Acted on, never answered
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Methods
//!
//! - `select_variant` `{trim}`: reload the car with the current part toggles
//! - `set_colour` `{hex}`: repaint the body
//! - `toggle_splitter` `{visible}`: show or hide the front splitter
//! - `toggle_spoiler` `{visible}`: show or hide the rear spoiler (GTI and R)
//! - `lookup_registration` `{registration}`: configure from a registration
//! - `get_configuration`: current variant, colour, toggles and lookup state
//! - `get_fps`: smoothed frame rate
//!
//! ## Notifications
//!
//! `variant_changed`, `colour_changed`, `model_loaded`,
//! `lookup_state_changed`, `configurator_alert` and `fps_update`.
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({ "data": "value" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// JSON-RPC 2.0 request decoding, response queueing and the WASM message listener.
pub mod web_rpc;
