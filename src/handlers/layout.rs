//! Stateless endpoints over the layout engine, plus the stored-topology
//! re-layout action.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::layout::layout_nodes;
use crate::models::*;
use crate::services::{add_batch, editor, normalize_edges, planned_edge_count};
use crate::AppState;

use super::ApiError;

/// Position a posted graph
pub async fn layout(Json(req): Json<LayoutRequest>) -> Json<LayoutResponse> {
    let nodes = layout_nodes(
        &req.nodes,
        &req.edges,
        &req.topo_type,
        &req.topo_params,
        req.options,
    );
    Json(LayoutResponse { nodes })
}

/// Normalize edge handles of a posted edge list
pub async fn normalize(Json(req): Json<EdgesPayload>) -> Json<EdgesPayload> {
    Json(EdgesPayload {
        edges: normalize_edges(&req.edges),
    })
}

/// Generate a batch of nodes against the posted graph
pub async fn batch_nodes(
    Json(req): Json<BatchNodesRequest>,
) -> Result<Json<BatchOutcome>, ApiError> {
    if req.batch.count == 0 {
        return Err(ApiError::bad_request("count must be at least 1"));
    }
    if req.batch.count > MAX_BATCH_COUNT {
        return Err(ApiError::bad_request(format!(
            "count must be at most {}",
            MAX_BATCH_COUNT
        )));
    }
    let edges = planned_edge_count(&req.nodes, &req.batch);
    if edges > MAX_BATCH_EDGES {
        return Err(ApiError::bad_request(format!(
            "batch would create {} edges, limit is {}",
            edges, MAX_BATCH_EDGES
        )));
    }
    Ok(Json(add_batch(&req.nodes, &req.batch)))
}

/// Load a stored topology, prepare it for editing, lay it out and save it back
pub async fn relayout_topology(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    options: Option<Json<LayoutOptions>>,
) -> Result<Json<Topology>, ApiError> {
    let options = options.map(|Json(o)| o).unwrap_or_default();
    let topology = state
        .store
        .get_topology(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Topology"))?;

    // prepare_loaded leaves custom graphs where they are; an explicit re-layout moves them too
    let mut model = editor::prepare_loaded(&topology.into_model(), options);
    if model.topo_type == TopologyType::Custom {
        model = editor::auto_layout(&model, options);
    }
    let saved = state
        .store
        .update_topology(id, &TopologyPayload::from(model))
        .await?;
    Ok(Json(saved))
}
