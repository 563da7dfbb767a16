//! Data-center topology editing backend.
//!
//! The library holds the graph model, the layout engine (grid, dragonfly,
//! butterfly and tiered placements), edge normalization, batch node
//! generation and a bounded undo/redo history. The binary wraps it in an
//! HTTP API with a SQLite document store.

pub mod config;
pub mod db;
pub mod handlers;
pub mod history;
pub mod layout;
pub mod models;
pub mod router;
pub mod services;

use config::Config;
use db::Store;

/// Application state shared across handlers
pub struct AppState {
    pub store: Store,
    pub config: Config,
}
