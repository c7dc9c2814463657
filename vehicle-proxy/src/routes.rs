use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use constants::network::{REGISTRATION_PARAM, VEHICLE_ROUTE};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ProxyError;
use crate::upstream::VehicleDataClient;

/// Create the proxy router with CORS open to every origin.
pub fn create_router(client: VehicleDataClient) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(VEHICLE_ROUTE, get(vehicle_handler))
        .with_state(Arc::new(client))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// First registration in the query string, trimmed. Blank counts as absent.
fn registration(params: &[(String, String)]) -> Option<String> {
    params
        .iter()
        .find(|(name, _)| name == REGISTRATION_PARAM)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

async fn vehicle_handler(
    State(client): State<Arc<VehicleDataClient>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    let vrm = registration(&params).ok_or(ProxyError::MissingRegistration)?;

    info!(%vrm, "Received VRM");

    let body = client.lookup(&vrm).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
