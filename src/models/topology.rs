use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::graph::{Edge, GraphModel, LayoutOptions, Node, NodeKind, TopologyParams, TopologyType};

/// Name given to the topology seeded into an empty store
pub const DEFAULT_TOPOLOGY_NAME: &str = "Default";

/// Topology represents a stored diagram document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub id: i64,
    pub name: String,
    pub topo_type: TopologyType,
    pub topo_params: TopologyParams,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub updated_at: DateTime<Utc>,
}

impl Topology {
    pub fn into_model(self) -> GraphModel {
        GraphModel {
            name: self.name,
            topo_type: self.topo_type,
            topo_params: self.topo_params,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// TopologySummary is the list view of a stored topology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySummary {
    pub id: i64,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

/// TopologyPayload replaces a stored topology
#[derive(Debug, Clone, Deserialize)]
pub struct TopologyPayload {
    #[serde(default = "default_update_name")]
    pub name: String,
    #[serde(default)]
    pub topo_type: TopologyType,
    #[serde(default)]
    pub topo_params: TopologyParams,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// NewTopologyPayload creates a topology; an omitted name reads "Untitled"
#[derive(Debug, Clone, Deserialize)]
pub struct NewTopologyPayload {
    #[serde(default = "default_create_name")]
    pub name: String,
    #[serde(default)]
    pub topo_type: TopologyType,
    #[serde(default)]
    pub topo_params: TopologyParams,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn default_update_name() -> String {
    DEFAULT_TOPOLOGY_NAME.to_string()
}

fn default_create_name() -> String {
    "Untitled".to_string()
}

impl From<NewTopologyPayload> for TopologyPayload {
    fn from(req: NewTopologyPayload) -> Self {
        Self {
            name: req.name,
            topo_type: req.topo_type,
            topo_params: req.topo_params,
            nodes: req.nodes,
            edges: req.edges,
        }
    }
}

impl From<GraphModel> for TopologyPayload {
    fn from(model: GraphModel) -> Self {
        Self {
            name: model.name,
            topo_type: model.topo_type,
            topo_params: model.topo_params,
            nodes: model.nodes,
            edges: model.edges,
        }
    }
}

/// LayoutRequest asks for positions of a posted graph
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub topo_type: TopologyType,
    #[serde(default)]
    pub topo_params: TopologyParams,
    #[serde(default)]
    pub options: LayoutOptions,
}

/// LayoutResponse carries the repositioned nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub nodes: Vec<Node>,
}

/// EdgesPayload wraps an edge list for normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgesPayload {
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Largest `count` accepted by the batch endpoint
pub const MAX_BATCH_COUNT: usize = 1_000;
/// Largest number of edges a single batch request may generate
pub const MAX_BATCH_EDGES: usize = 50_000;

/// BatchRequest asks for `count` new nodes of one kind and tier
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub kind: NodeKind,
    pub tier: i32,
    pub count: usize,
    #[serde(default)]
    pub split_count: Option<u32>,
    #[serde(default)]
    pub edge_label: Option<String>,
}

/// BatchNodesRequest pairs a batch with the graph it extends
#[derive(Debug, Clone, Deserialize)]
pub struct BatchNodesRequest {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(flatten)]
    pub batch: BatchRequest,
}

/// BatchOutcome holds only the generated nodes and edges
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_name_defaults() {
        let update: TopologyPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(update.name, DEFAULT_TOPOLOGY_NAME);
        let create: NewTopologyPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(create.name, "Untitled");
        assert_eq!(TopologyPayload::from(create).name, "Untitled");
    }
}
