pub(crate) mod row_helpers;
mod topologies;

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::models::*;

/// Typed "resource not found" error; the API layer downcasts it to a 404.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Store handles all database operations, delegating to the topology repo.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with configurable pool size
    pub async fn new(db_path: &str) -> Result<Self> {
        Self::with_pool_size(db_path, 5).await
    }

    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database, used by tests
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_size(":memory:", 1).await
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ========== Topology Operations ==========

    /// List topology summaries; seeds the default topology into an empty store
    pub async fn list_topologies(&self) -> Result<Vec<TopologySummary>> {
        let items = topologies::TopologyRepo::list(&self.pool).await?;
        if !items.is_empty() {
            return Ok(items);
        }
        let seeded = self.seed_default_topology().await?;
        Ok(vec![TopologySummary {
            id: seeded.id,
            name: seeded.name,
            updated_at: seeded.updated_at,
        }])
    }

    pub async fn get_topology(&self, id: i64) -> Result<Option<Topology>> {
        topologies::TopologyRepo::get(&self.pool, id).await
    }

    /// First stored topology, seeding one if the store is empty
    pub async fn get_or_create_default_topology(&self) -> Result<Topology> {
        if let Some(topology) = topologies::TopologyRepo::first(&self.pool).await? {
            return Ok(topology);
        }
        self.seed_default_topology().await
    }

    pub async fn create_topology(&self, req: &TopologyPayload) -> Result<Topology> {
        topologies::TopologyRepo::create(&self.pool, req).await
    }

    pub async fn update_topology(&self, id: i64, req: &TopologyPayload) -> Result<Topology> {
        topologies::TopologyRepo::update(&self.pool, id, req).await
    }

    pub async fn delete_topology(&self, id: i64) -> Result<()> {
        topologies::TopologyRepo::delete(&self.pool, id).await
    }

    async fn seed_default_topology(&self) -> Result<Topology> {
        let seed = TopologyPayload {
            name: DEFAULT_TOPOLOGY_NAME.to_string(),
            topo_type: TopologyType::Custom,
            topo_params: TopologyParams::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        let topology = topologies::TopologyRepo::create(&self.pool, &seed).await?;
        tracing::info!("Seeded default topology (id={})", topology.id);
        Ok(topology)
    }
}
