//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use super::dto::{StationResponse, StationSummary, StationsResponse};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/station/:id", get(station))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List configured stations with their current state values.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let mut stations = Vec::with_capacity(state.config.stations.len());

    for (id, name) in &state.config.stations {
        let published = state.store.read(id).await;
        stations.push(StationSummary {
            id: id.clone(),
            name: name.clone(),
            state: published.map(|p| p.state),
        });
    }

    Json(StationsResponse { stations })
}

/// Full published board for one station.
async fn station(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.read(&id).await {
        Some(published) => Json(StationResponse {
            id,
            state: published.state,
            attributes: published.attributes,
        })
        .into_response(),
        None => (StatusCode::NOT_FOUND, "station not published").into_response(),
    }
}
