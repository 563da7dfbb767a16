use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>, frontend_dir: &str) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Default topology (single-document editors)
        .route(
            "/api/topology",
            get(handlers::topologies::get_default_topology)
                .put(handlers::topologies::update_default_topology),
        )
        // Topology routes
        .route(
            "/api/topologies",
            get(handlers::topologies::list_topologies).post(handlers::topologies::create_topology),
        )
        .route(
            "/api/topologies/:id",
            get(handlers::topologies::get_topology)
                .put(handlers::topologies::update_topology)
                .delete(handlers::topologies::delete_topology),
        )
        .route("/api/topologies/:id/layout", post(handlers::layout::relayout_topology))
        // Stateless layout engine routes
        .route("/api/layout", post(handlers::layout::layout))
        .route("/api/edges/normalize", post(handlers::layout::normalize))
        .route("/api/nodes/batch", post(handlers::layout::batch_nodes))
        // Static files (rendering surface)
        .fallback_service(
            ServeDir::new(frontend_dir)
                .fallback(ServeFile::new(format!("{}/index.html", frontend_dir))),
        )
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
