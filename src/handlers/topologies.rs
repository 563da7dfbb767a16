use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::{created, ApiError, MessageResponse};

/// List all topologies (id, name, last update)
pub async fn list_topologies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TopologySummary>>, ApiError> {
    let topologies = state.store.list_topologies().await?;
    Ok(Json(topologies))
}

/// Get the default topology, creating it on first use
pub async fn get_default_topology(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Topology>, ApiError> {
    let topology = state.store.get_or_create_default_topology().await?;
    Ok(Json(topology))
}

/// Replace the default topology
pub async fn update_default_topology(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TopologyPayload>,
) -> Result<Json<Topology>, ApiError> {
    let current = state.store.get_or_create_default_topology().await?;
    let topology = state.store.update_topology(current.id, &req).await?;
    Ok(Json(topology))
}

/// Get a single topology by ID
pub async fn get_topology(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Topology>, ApiError> {
    let topology = state
        .store
        .get_topology(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Topology"))?;
    Ok(Json(topology))
}

/// Create a new topology
pub async fn create_topology(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTopologyPayload>,
) -> Result<(StatusCode, Json<Topology>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let topology = state.store.create_topology(&TopologyPayload::from(req)).await?;
    Ok(created(topology))
}

/// Replace an existing topology
pub async fn update_topology(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<TopologyPayload>,
) -> Result<Json<Topology>, ApiError> {
    let topology = state.store.update_topology(id, &req).await?;
    Ok(Json(topology))
}

/// Delete a topology
pub async fn delete_topology(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_topology(id).await?;
    Ok(MessageResponse::new("deleted"))
}
