use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use sqlx::{sqlite::SqliteRow, Row};

use crate::models::*;

/// Decode a JSON text column, naming the column on failure
fn json_column<T: DeserializeOwned>(row: &SqliteRow, column: &str) -> Result<T> {
    let raw: String = row.get(column);
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in column {}", column))
}

/// Map a SQLite row to a Topology struct
pub fn map_topology_row(row: &SqliteRow) -> Result<Topology> {
    let topo_type: String = row.get("topo_type");
    Ok(Topology {
        id: row.get("id"),
        name: row.get("name"),
        topo_type: TopologyType::from(topo_type),
        topo_params: json_column(row, "topo_params")?,
        nodes: json_column(row, "nodes")?,
        edges: json_column(row, "edges")?,
        updated_at: row.get("updated_at"),
    })
}

/// Map a SQLite row to a TopologySummary struct
pub fn map_topology_summary_row(row: &SqliteRow) -> TopologySummary {
    TopologySummary {
        id: row.get("id"),
        name: row.get("name"),
        updated_at: row.get("updated_at"),
    }
}
