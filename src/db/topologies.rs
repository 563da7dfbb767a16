use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};

use super::row_helpers::{map_topology_row, map_topology_summary_row};
use crate::models::*;

const SELECT_TOPOLOGY: &str = r#"
    SELECT id, name, topo_type, topo_params, nodes, edges, updated_at
    FROM topologies
"#;

/// JSON-encoded document columns of a payload
struct EncodedDocument {
    topo_params: String,
    nodes: String,
    edges: String,
}

impl EncodedDocument {
    fn encode(req: &TopologyPayload) -> Result<Self> {
        Ok(Self {
            topo_params: serde_json::to_string(&req.topo_params)?,
            nodes: serde_json::to_string(&req.nodes)?,
            edges: serde_json::to_string(&req.edges)?,
        })
    }
}

/// Topology database operations
pub struct TopologyRepo;

impl TopologyRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<TopologySummary>> {
        let rows = sqlx::query("SELECT id, name, updated_at FROM topologies ORDER BY id ASC")
            .fetch_all(pool)
            .await?;
        Ok(rows.iter().map(map_topology_summary_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Topology>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_TOPOLOGY))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.as_ref().map(map_topology_row).transpose()
    }

    pub async fn first(pool: &Pool<Sqlite>) -> Result<Option<Topology>> {
        let row = sqlx::query(&format!("{} ORDER BY id ASC LIMIT 1", SELECT_TOPOLOGY))
            .fetch_optional(pool)
            .await?;
        row.as_ref().map(map_topology_row).transpose()
    }

    pub async fn create(pool: &Pool<Sqlite>, req: &TopologyPayload) -> Result<Topology> {
        let now = Utc::now();
        let doc = EncodedDocument::encode(req)?;
        let result = sqlx::query(
            r#"INSERT INTO topologies (name, topo_type, topo_params, nodes, edges, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&req.name)
        .bind(req.topo_type.as_str())
        .bind(&doc.topo_params)
        .bind(&doc.nodes)
        .bind(&doc.edges)
        .bind(now)
        .execute(pool)
        .await?;

        let new_id = result.last_insert_rowid();
        tracing::info!("Created topology {} ({})", new_id, req.name);
        Self::get(pool, new_id)
            .await?
            .context("Topology not found after creation")
    }

    pub async fn update(pool: &Pool<Sqlite>, id: i64, req: &TopologyPayload) -> Result<Topology> {
        let now = Utc::now();
        let doc = EncodedDocument::encode(req)?;
        let result = sqlx::query(
            r#"UPDATE topologies SET name = ?, topo_type = ?, topo_params = ?, nodes = ?, edges = ?, updated_at = ? WHERE id = ?"#,
        )
        .bind(&req.name)
        .bind(req.topo_type.as_str())
        .bind(&doc.topo_params)
        .bind(&doc.nodes)
        .bind(&doc.edges)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Topology", &id.to_string()).into());
        }

        Self::get(pool, id)
            .await?
            .context("Topology not found after update")
    }

    pub async fn delete(pool: &Pool<Sqlite>, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM topologies WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Topology", &id.to_string()).into());
        }
        tracing::info!("Deleted topology {}", id);
        Ok(())
    }
}
