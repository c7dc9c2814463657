use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use constants::Trim;
use constants::network::{REGISTRATION_PARAM, VEHICLE_ROUTE};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::configurator::settings::ConfiguratorSettings;
use crate::rpc::web_rpc::WebRpcInterface;

const MAKE_POINTER: &str = "/Results/ModelDetails/ModelIdentification/Make";
const MODEL_POINTER: &str = "/Results/ModelDetails/ModelIdentification/Model";
const COLOUR_POINTER: &str = "/Results/VehicleDetails/VehicleHistory/ColourDetails/CurrentColour";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid proxy URL: {0}")]
    InvalidUrl(String),
    #[error("vehicle proxy request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("vehicle proxy answered with status {0}")]
    Status(u16),
    #[error("vehicle proxy returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("vehicle data is missing {0}")]
    MissingField(&'static str),
    #[error("could not start lookup runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Fields the configurator needs from an upstream vehicle record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub colour: String,
}

/// Flattened lookup result. Every field is `None` when the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VehicleLookup {
    pub make: Option<String>,
    pub model: Option<String>,
    pub colour: Option<String>,
    pub trim: Option<Trim>,
}

impl VehicleLookup {
    pub fn failed() -> Self {
        Self::default()
    }
}

impl From<VehicleRecord> for VehicleLookup {
    fn from(record: VehicleRecord) -> Self {
        let trim = Trim::from_model_name(&record.model);
        Self {
            make: Some(record.make),
            model: Some(record.model),
            colour: Some(record.colour),
            trim: Some(trim),
        }
    }
}

fn required_field(body: &Value, pointer: &str, name: &'static str) -> Result<String, LookupError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(LookupError::MissingField(name))
}

/// Pull make, model and current colour out of the nested upstream response.
pub fn parse_vehicle_response(body: &Value) -> Result<VehicleRecord, LookupError> {
    Ok(VehicleRecord {
        make: required_field(body, MAKE_POINTER, "make")?,
        model: required_field(body, MODEL_POINTER, "model")?,
        colour: required_field(body, COLOUR_POINTER, "colour")?,
    })
}

/// Trim and upper-case a registration. Blank input yields `None`.
pub fn normalise_registration(input: &str) -> Option<String> {
    let registration = input.trim().to_uppercase();
    (!registration.is_empty()).then_some(registration)
}

/// Proxy URL for a registration, with the value percent-encoded.
pub fn lookup_url(proxy_url: &str, registration: &str) -> Result<Url, LookupError> {
    let endpoint = format!("{}{}", proxy_url.trim_end_matches('/'), VEHICLE_ROUTE);
    Url::parse_with_params(&endpoint, &[(REGISTRATION_PARAM, registration)])
        .map_err(|err| LookupError::InvalidUrl(err.to_string()))
}

pub async fn fetch_vehicle(client: &reqwest::Client, url: Url) -> Result<VehicleRecord, LookupError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }

    let text = response.text().await?;
    let body: Value = serde_json::from_str(&text)?;
    parse_vehicle_response(&body)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupStatus {
    #[default]
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Finished request waiting to be picked up by the schedule.
#[derive(Debug)]
pub struct LookupReply {
    pub request_id: u64,
    pub registration: String,
    pub result: Result<VehicleRecord, LookupError>,
}

pub type LookupInbox = Arc<Mutex<Vec<LookupReply>>>;

/// Lookup state machine. Only the most recently issued request may complete it.
#[derive(Resource, Debug, Default)]
pub struct LookupState {
    status: LookupStatus,
    latest_request: u64,
    inbox: LookupInbox,
}

impl LookupState {
    pub fn status(&self) -> LookupStatus {
        self.status
    }

    pub fn inbox(&self) -> LookupInbox {
        self.inbox.clone()
    }

    /// Enter `Requesting` and return the id the reply must carry.
    pub fn begin(&mut self) -> u64 {
        self.latest_request += 1;
        self.status = LookupStatus::Requesting;
        self.latest_request
    }

    /// Settle the state machine with a reply. Stale replies are returned as `None`.
    pub fn complete(&mut self, reply: LookupReply) -> Option<(String, VehicleLookup)> {
        if reply.request_id != self.latest_request {
            debug!(
                "Ignoring stale lookup reply #{} for {}",
                reply.request_id, reply.registration
            );
            return None;
        }

        let lookup = match reply.result {
            Ok(record) => {
                self.status = LookupStatus::Succeeded;
                VehicleLookup::from(record)
            }
            Err(err) => {
                error!("Vehicle lookup for {} failed: {}", reply.registration, err);
                self.status = LookupStatus::Failed;
                VehicleLookup::failed()
            }
        };
        Some((reply.registration, lookup))
    }

    fn drain_inbox(&self) -> Vec<LookupReply> {
        self.inbox
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

/// Lookup that settled the state machine.
#[derive(Event, Debug, Clone)]
pub struct LookupCompleted {
    pub registration: String,
    pub lookup: VehicleLookup,
}

fn deliver(inbox: &LookupInbox, reply: LookupReply) {
    if let Ok(mut queue) = inbox.lock() {
        queue.push(reply);
    }
}

/// Start a lookup off the schedule. The reply lands in the state's inbox.
pub fn spawn_lookup(settings: &ConfiguratorSettings, state: &mut LookupState, registration: String) {
    let request_id = state.begin();
    let inbox = state.inbox();
    info!("Looking up vehicle {} (#{})", registration, request_id);

    let url = match lookup_url(&settings.proxy_url, &registration) {
        Ok(url) => url,
        Err(err) => {
            deliver(
                &inbox,
                LookupReply {
                    request_id,
                    registration,
                    result: Err(err),
                },
            );
            return;
        }
    };

    run_request(url, move |result| {
        deliver(
            &inbox,
            LookupReply {
                request_id,
                registration,
                result,
            },
        )
    });
}

#[cfg(target_arch = "wasm32")]
fn run_request(url: Url, reply: impl FnOnce(Result<VehicleRecord, LookupError>) + 'static) {
    wasm_bindgen_futures::spawn_local(async move {
        let client = reqwest::Client::new();
        reply(fetch_vehicle(&client, url).await);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn run_request(url: Url, reply: impl FnOnce(Result<VehicleRecord, LookupError>) + Send + 'static) {
    std::thread::spawn(move || {
        let result = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt.block_on(async {
                let client = native_client()?;
                fetch_vehicle(&client, url).await
            }),
            Err(err) => Err(LookupError::from(err)),
        };
        reply(result);
    });
}

/// HTTP client for native builds. rustls lets the proxy sit behind HTTPS.
#[cfg(not(target_arch = "wasm32"))]
fn native_client() -> Result<reqwest::Client, LookupError> {
    Ok(reqwest::Client::builder().use_rustls_tls().build()?)
}

/// Hand settled lookups to the controller and report the state change.
pub fn poll_lookup_results(
    mut state: ResMut<LookupState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut completed: EventWriter<LookupCompleted>,
) {
    for reply in state.drain_inbox() {
        let Some((registration, lookup)) = state.complete(reply) else {
            continue;
        };

        rpc_interface.send_notification(
            "lookup_state_changed",
            serde_json::json!({
                "state": state.status().as_str(),
                "registration": registration,
                "vehicle": lookup,
            }),
        );
        completed.write(LookupCompleted {
            registration,
            lookup,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream(make: &str, model: &str, colour: &str) -> Value {
        json!({
            "Results": {
                "VehicleDetails": {
                    "VehicleHistory": {
                        "ColourDetails": { "CurrentColour": colour }
                    }
                },
                "ModelDetails": {
                    "ModelIdentification": { "Make": make, "Model": model }
                }
            }
        })
    }

    fn reply(request_id: u64, result: Result<VehicleRecord, LookupError>) -> LookupReply {
        LookupReply {
            request_id,
            registration: "AB12CDE".to_string(),
            result,
        }
    }

    #[test]
    fn test_parse_nested_vehicle_fields() {
        let record = parse_vehicle_response(&upstream("VOLKSWAGEN", "Golf GTI", "RED")).unwrap();

        assert_eq!(record.make, "VOLKSWAGEN");
        assert_eq!(record.model, "Golf GTI");
        assert_eq!(record.colour, "RED");
        assert_eq!(VehicleLookup::from(record).trim, Some(Trim::Gti));
    }

    #[test]
    fn test_missing_or_empty_fields_fail() {
        let no_colour = json!({
            "Results": {
                "ModelDetails": {
                    "ModelIdentification": { "Make": "VOLKSWAGEN", "Model": "Golf" }
                }
            }
        });
        assert!(matches!(
            parse_vehicle_response(&no_colour),
            Err(LookupError::MissingField("colour"))
        ));
        assert!(matches!(
            parse_vehicle_response(&upstream("", "Golf", "RED")),
            Err(LookupError::MissingField("make"))
        ));
        assert!(matches!(
            parse_vehicle_response(&json!({ "error": "Failed to fetch vehicle data" })),
            Err(LookupError::MissingField(_))
        ));
    }

    #[test]
    fn test_normalise_registration() {
        assert_eq!(normalise_registration("  ab12 cde "), Some("AB12 CDE".to_string()));
        assert_eq!(normalise_registration("   "), None);
        assert_eq!(normalise_registration(""), None);
    }

    #[test]
    fn test_lookup_url_encodes_registration() {
        let url = lookup_url("http://localhost:3000/", "AB12 CDE&x=1").unwrap();

        assert_eq!(url.path(), "/api/vehicle");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("vrm".to_string(), "AB12 CDE&x=1".to_string())]);
    }

    #[test]
    fn test_lookup_url_rejects_garbage_base() {
        assert!(matches!(
            lookup_url("not a url", "AB12CDE"),
            Err(LookupError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let mut state = LookupState::default();
        let first = state.begin();
        let second = state.begin();

        let record = VehicleRecord {
            make: "VOLKSWAGEN".to_string(),
            model: "Golf R".to_string(),
            colour: "BLUE".to_string(),
        };
        assert!(state.complete(reply(first, Ok(record.clone()))).is_none());
        assert_eq!(state.status(), LookupStatus::Requesting);

        let (_, lookup) = state.complete(reply(second, Ok(record))).unwrap();
        assert_eq!(state.status(), LookupStatus::Succeeded);
        assert_eq!(lookup.trim, Some(Trim::R));
    }

    #[test]
    fn test_failed_reply_nulls_every_field() {
        let mut state = LookupState::default();
        let id = state.begin();

        let (registration, lookup) = state
            .complete(reply(id, Err(LookupError::Status(500))))
            .unwrap();

        assert_eq!(registration, "AB12CDE");
        assert_eq!(lookup, VehicleLookup::failed());
        assert_eq!(state.status(), LookupStatus::Failed);
    }

    #[test]
    fn test_inbox_drains_once() {
        let state = LookupState::default();
        deliver(&state.inbox(), reply(1, Err(LookupError::Status(404))));

        assert_eq!(state.drain_inbox().len(), 1);
        assert!(state.drain_inbox().is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_client_supports_https_proxy() {
        assert!(native_client().is_ok());

        let url = lookup_url("https://proxy.example.com/", "AB12 CDE").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("proxy.example.com"));
    }
}
