use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::configurator::controller::{
    ActionSource, ConfiguratorAction, ConfiguratorEvent, ConfiguratorUi,
};
use crate::configurator::lookup::LookupState;
use crate::configurator::paint::parse_hex_colour;
use crate::engine::systems::fps_tracking::current_fps;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. A missing id marks a notification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource queueing notifications and responses for the hosting page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage RPC layer for the embedded canvas.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // JS owns the listener from here on.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Messages received by the page listener, drained every frame.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Decoded RPC method.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcCall {
    Configure(ConfiguratorAction),
    GetConfiguration,
    GetFps,
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: &serde_json::Value,
    expected: &str,
) -> Result<T, RpcError> {
    serde_json::from_value::<T>(params.clone()).map_err(|_| RpcError::invalid_params(expected))
}

/// Map a request onto a configurator call, validating its params.
pub fn decode_call(request: &RpcRequest) -> Result<RpcCall, RpcError> {
    #[derive(Deserialize)]
    struct TrimParams {
        trim: String,
    }

    #[derive(Deserialize)]
    struct ColourParams {
        hex: String,
    }

    #[derive(Deserialize)]
    struct VisibleParams {
        visible: bool,
    }

    #[derive(Deserialize)]
    struct RegistrationParams {
        registration: String,
    }

    if request.jsonrpc != "2.0" {
        return Err(RpcError::invalid_request("Expected jsonrpc \"2.0\""));
    }

    let action = match request.method.as_str() {
        "select_variant" => {
            let params: TrimParams = parse_params(&request.params, "Expected 'trim' parameter")?;
            ConfiguratorAction::SelectVariant(params.trim)
        }
        "set_colour" => {
            let params: ColourParams = parse_params(&request.params, "Expected 'hex' parameter")?;
            if parse_hex_colour(&params.hex).is_none() {
                return Err(RpcError::invalid_params(&format!(
                    "Invalid colour: {}",
                    params.hex
                )));
            }
            ConfiguratorAction::SetColour(params.hex)
        }
        "toggle_splitter" => {
            let params: VisibleParams =
                parse_params(&request.params, "Expected 'visible' parameter")?;
            ConfiguratorAction::ToggleSplitter(params.visible)
        }
        "toggle_spoiler" => {
            let params: VisibleParams =
                parse_params(&request.params, "Expected 'visible' parameter")?;
            ConfiguratorAction::ToggleSpoiler(params.visible)
        }
        "lookup_registration" => {
            let params: RegistrationParams =
                parse_params(&request.params, "Expected 'registration' parameter")?;
            ConfiguratorAction::Lookup(params.registration)
        }
        "get_configuration" => return Ok(RpcCall::GetConfiguration),
        "get_fps" => return Ok(RpcCall::GetFps),
        _ => return Err(RpcError::method_not_found(&request.method)),
    };

    Ok(RpcCall::Configure(action))
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    ui: Res<ConfiguratorUi>,
    lookup_state: Res<LookupState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut configurator_events: EventWriter<ConfiguratorEvent>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                continue;
            }
        };

        debug!("Processing RPC method: {}", request.method);

        let outcome = match decode_call(&request) {
            Ok(RpcCall::Configure(action)) => {
                configurator_events.write(ConfiguratorEvent {
                    action,
                    source: ActionSource::Rpc,
                });
                Ok(serde_json::json!({ "success": true }))
            }
            Ok(RpcCall::GetConfiguration) => Ok(ui.snapshot(lookup_state.status())),
            Ok(RpcCall::GetFps) => Ok(serde_json::json!({
                "fps": current_fps(&diagnostics).unwrap_or(0.0) as f32
            })),
            Err(error) => {
                warn!("RPC {} rejected: {}", request.method, error.message);
                Err(error)
            }
        };

        // Notifications are acted on but never answered.
        if let Some(id) = request.id {
            rpc_interface.queue_response(create_response(id, outcome));
        }
    }
}

fn create_response(
    id: serde_json::Value,
    outcome: Result<serde_json::Value, RpcError>,
) -> RpcResponse {
    let (result, error) = match outcome {
        Ok(value) => (Some(value), None),
        Err(error) => (None, Some(error)),
    };

    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result,
        error,
        id: Some(id),
    }
}

fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first, then responses, to keep page state ahead of replies.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
