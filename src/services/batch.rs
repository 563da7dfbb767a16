//! Rapid manual graph construction: single nodes and auto-wired batches.

use uuid::Uuid;

use crate::models::{
    clamp_split_count, BatchOutcome, BatchRequest, Edge, Node, NodeData, NodeKind, NodeLayout,
    Position,
};

/// Label of edges created without an explicit one
pub const DEFAULT_EDGE_LABEL: &str = "link";

fn new_node_id() -> String {
    format!("node-{}", Uuid::new_v4().simple())
}

/// Staggered seed position so fresh nodes do not stack before the next layout
fn seed_position(ordinal: usize) -> Position {
    Position::new(120.0 + ordinal as f64 * 30.0, 120.0 + ordinal as f64 * 20.0)
}

fn split_for(kind: &NodeKind, requested: Option<u32>) -> Option<u32> {
    (*kind == NodeKind::Patch).then(|| clamp_split_count(requested))
}

/// Create a single node of `kind` at its default tier.
pub fn add_node(existing: &[Node], kind: NodeKind) -> Node {
    let ordinal = existing.len();
    Node {
        id: new_node_id(),
        position: Position::new(100.0 + ordinal as f64 * 40.0, 100.0 + ordinal as f64 * 30.0),
        data: NodeData {
            label: format!("{} {}", kind.label(), ordinal + 1),
            tier: Some(kind.default_tier()),
            split_count: split_for(&kind, None),
            kind,
            layout: Some(NodeLayout::Tree),
        },
        ..Default::default()
    }
}

/// Highest tier strictly below `tier` among `nodes`
fn nearest_lower_tier(nodes: &[Node], tier: i32) -> Option<i32> {
    nodes.iter().map(Node::tier).filter(|&t| t < tier).max()
}

/// Number of edges `add_batch` would create for `request`, saturating on overflow
pub fn planned_edge_count(existing: &[Node], request: &BatchRequest) -> usize {
    let Some(lower_tier) = nearest_lower_tier(existing, request.tier) else {
        return 0;
    };
    let targets = existing.iter().filter(|n| n.tier() == lower_tier).count();
    request.count.saturating_mul(targets)
}

/// Generate `request.count` nodes and wire each one to every node of the
/// nearest lower tier already present.
///
/// The wiring is all-pairs, so the edge count is
/// `count * |nodes at the lower tier|`. When no lower tier exists the new
/// nodes are left unconnected.
pub fn add_batch(existing: &[Node], request: &BatchRequest) -> BatchOutcome {
    let kind = &request.kind;
    let base_index = existing.iter().filter(|n| n.data.kind == *kind).count();
    let split_count = split_for(kind, request.split_count);

    let nodes: Vec<Node> = (0..request.count)
        .map(|i| Node {
            id: new_node_id(),
            position: seed_position(existing.len() + i),
            data: NodeData {
                label: format!("{} {}", kind.label(), base_index + i + 1),
                kind: kind.clone(),
                tier: Some(request.tier),
                split_count,
                layout: Some(NodeLayout::Tree),
            },
            ..Default::default()
        })
        .collect();

    let Some(lower_tier) = nearest_lower_tier(existing, request.tier) else {
        tracing::debug!(
            "Added {} {:?} nodes at tier {} with no lower tier to attach to",
            nodes.len(),
            kind,
            request.tier
        );
        return BatchOutcome {
            nodes,
            edges: Vec::new(),
        };
    };

    let targets: Vec<&Node> = existing.iter().filter(|n| n.tier() == lower_tier).collect();
    let label = request
        .edge_label
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_EDGE_LABEL);

    let edges: Vec<Edge> = nodes
        .iter()
        .flat_map(|source| {
            targets.iter().map(move |target| {
                Edge::link(
                    format!("e-custom-{}-{}", source.id, target.id),
                    &source.id,
                    &target.id,
                    label,
                )
            })
        })
        .collect();

    tracing::debug!(
        "Added {} {:?} nodes at tier {} wired to tier {} ({} edges)",
        nodes.len(),
        kind,
        request.tier,
        lower_tier,
        edges.len()
    );

    BatchOutcome { nodes, edges }
}
