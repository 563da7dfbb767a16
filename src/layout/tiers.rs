//! Generic tiered layout used for tree-shaped and free-form graphs.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{ORIGIN_X, ORIGIN_Y};
use crate::models::{Edge, LayoutOptions, Node, Position, TopologyParams};

/// Score of every node at tier 3 and above
const TOP_TIER_SCORE: usize = 1000;
/// Weight of each outgoing edge of a tier-2 node
const FAN_OUT_WEIGHT: usize = 10;

/// Assigns tiers and within-tier scores.
///
/// Tier 3+ nodes always lead their row. Tier 2 nodes are ranked by fan-out,
/// tier 1 and below by fan-in. Edges with an endpoint outside the node set
/// are ignored.
pub struct TierClassifier {
    out_degree: HashMap<String, usize>,
    in_degree: HashMap<String, usize>,
}

impl TierClassifier {
    pub fn new(nodes: &[Node], edges: &[Edge]) -> Self {
        let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let mut out_degree = HashMap::new();
        let mut in_degree = HashMap::new();

        for edge in edges {
            if !known.contains(edge.source.as_str()) || !known.contains(edge.target.as_str()) {
                continue;
            }
            *out_degree.entry(edge.source.clone()).or_insert(0) += 1;
            *in_degree.entry(edge.target.clone()).or_insert(0) += 1;
        }

        Self {
            out_degree,
            in_degree,
        }
    }

    pub fn score(&self, node: &Node) -> usize {
        let tier = node.tier();
        if tier >= 3 {
            TOP_TIER_SCORE
        } else if tier == 2 {
            FAN_OUT_WEIGHT * self.out_degree.get(&node.id).copied().unwrap_or(0)
        } else {
            self.in_degree.get(&node.id).copied().unwrap_or(0)
        }
    }

    /// Distinct tiers present, highest first
    pub fn tiers(&self, nodes: &[Node]) -> Vec<i32> {
        let mut tiers: Vec<i32> = nodes.iter().map(Node::tier).collect();
        tiers.sort_unstable_by(|a, b| b.cmp(a));
        tiers.dedup();
        tiers
    }

    /// Node indices per tier, each row ordered by score then label
    pub fn rows(&self, nodes: &[Node]) -> BTreeMap<i32, Vec<usize>> {
        let mut rows: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            rows.entry(node.tier()).or_default().push(idx);
        }
        for row in rows.values_mut() {
            row.sort_by(|&a, &b| {
                let (a, b) = (&nodes[a], &nodes[b]);
                self.score(b)
                    .cmp(&self.score(a))
                    .then_with(|| a.sort_key().cmp(b.sort_key()))
            });
        }
        rows
    }
}

pub(super) fn tiered(
    nodes: &[Node],
    edges: &[Edge],
    params: &TopologyParams,
    options: LayoutOptions,
) -> Vec<Node> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let layer_gap = params.number_or("layerGap", 220.0);
    let spacing_x = params.number_or("nodeSpacingX", 220.0);

    let classifier = TierClassifier::new(nodes, edges);
    let tiers = classifier.tiers(nodes);
    let rows = classifier.rows(nodes);
    let widest = rows.values().map(Vec::len).max().unwrap_or(1).max(1);

    let mut positions = vec![Position::default(); nodes.len()];
    for (rank, tier) in tiers.iter().enumerate() {
        let Some(row) = rows.get(tier) else { continue };
        let offset = (widest - row.len()) as f64 / 2.0;
        let y = ORIGIN_Y + rank as f64 * layer_gap;

        for (slot, &idx) in row.iter().enumerate() {
            let end_gap = if options.end_gap && slot == row.len() - 1 {
                spacing_x
            } else {
                0.0
            };
            let x = ORIGIN_X + (slot as f64 + offset).max(0.0) * spacing_x + end_gap;
            positions[idx] = Position::new(x, y);
        }
    }

    nodes
        .iter()
        .zip(positions)
        .map(|(node, position)| Node {
            position,
            ..node.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeKind;

    fn by_id<'a>(out: &'a [Node], id: &str) -> &'a Node {
        out.iter().find(|n| n.id == id).unwrap()
    }

    #[test]
    fn test_empty_graph() {
        let out = tiered(&[], &[], &TopologyParams::new(), LayoutOptions::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_top_tier_centered_over_bottom_row() {
        let nodes = vec![
            Node::new("core", "Core", NodeKind::Switch).with_tier(3),
            Node::new("a", "A", NodeKind::Server).with_tier(1),
            Node::new("b", "B", NodeKind::Server).with_tier(1),
        ];
        let out = tiered(&nodes, &[], &TopologyParams::new(), LayoutOptions::default());

        let core = by_id(&out, "core").position;
        let a = by_id(&out, "a").position;
        let b = by_id(&out, "b").position;
        assert_eq!(core.y, 120.0);
        assert_eq!(a.y, 340.0);
        assert_eq!(b.y, 340.0);
        assert_eq!(core.x, 250.0);
        assert_eq!(core.x - a.x, b.x - core.x);
    }

    #[test]
    fn test_unknown_kind_sits_on_bottom_row() {
        let router: Node = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "data": {"label": "R1", "kind": "router"}
        }))
        .unwrap();
        let nodes = vec![Node::new("w", "W", NodeKind::Switch), router];
        let out = tiered(&nodes, &[], &TopologyParams::new(), LayoutOptions::default());
        assert_eq!(by_id(&out, "w").position.y, 120.0);
        assert_eq!(by_id(&out, "r1").position.y, 340.0);
    }

    #[test]
    fn test_higher_tier_drawn_above() {
        let nodes = vec![
            Node::new("s", "S", NodeKind::Server),
            Node::new("t5", "T5", NodeKind::Server).with_tier(5),
            Node::new("r", "R", NodeKind::Rack),
            Node::new("w", "W", NodeKind::Switch),
            Node::new("neg", "Neg", NodeKind::Server).with_tier(-1),
        ];
        let out = tiered(&nodes, &[], &TopologyParams::new(), LayoutOptions::default());
        let y = |id: &str| by_id(&out, id).position.y;
        assert!(y("t5") < y("w"));
        assert!(y("w") < y("r"));
        assert!(y("r") < y("s"));
        assert!(y("s") < y("neg"));
    }

    #[test]
    fn test_tier_two_ordered_by_fan_out() {
        let nodes = vec![
            Node::new("r1", "Rack A", NodeKind::Rack),
            Node::new("r2", "Rack B", NodeKind::Rack),
            Node::new("s1", "Srv 1", NodeKind::Server),
            Node::new("s2", "Srv 2", NodeKind::Server),
        ];
        let edges = vec![
            Edge::link("e1", "r2", "s1", "link"),
            Edge::link("e2", "r2", "s2", "link"),
            Edge::link("e3", "r1", "s1", "link"),
        ];
        let classifier = TierClassifier::new(&nodes, &edges);
        assert_eq!(classifier.score(&nodes[0]), 10);
        assert_eq!(classifier.score(&nodes[1]), 20);
        assert_eq!(classifier.score(&nodes[2]), 2);
        assert_eq!(classifier.score(&nodes[3]), 1);

        let out = tiered(&nodes, &edges, &TopologyParams::new(), LayoutOptions::default());
        assert!(by_id(&out, "r2").position.x < by_id(&out, "r1").position.x);
        assert!(by_id(&out, "s1").position.x < by_id(&out, "s2").position.x);
    }

    #[test]
    fn test_unconnected_sort_after_connected_then_by_label() {
        let nodes = vec![
            Node::new("z", "zeta", NodeKind::Server),
            Node::new("b", "Beta", NodeKind::Server),
            Node::new("a", "alpha", NodeKind::Server),
            Node::new("c", "", NodeKind::Server),
            Node::new("top", "Top", NodeKind::Switch),
        ];
        let edges = vec![Edge::link("e1", "top", "z", "link")];
        let rows = TierClassifier::new(&nodes, &edges).rows(&nodes);
        let order: Vec<&str> = rows[&1].iter().map(|&i| nodes[i].id.as_str()).collect();
        // byte order: uppercase before lowercase, empty label sorts as its id
        assert_eq!(order, vec!["z", "b", "a", "c"]);
    }

    #[test]
    fn test_dangling_edges_score_zero() {
        let nodes = vec![
            Node::new("r1", "R1", NodeKind::Rack),
            Node::new("s1", "S1", NodeKind::Server),
        ];
        let edges = vec![
            Edge::link("e1", "r1", "ghost", "link"),
            Edge::link("e2", "ghost", "s1", "link"),
        ];
        let classifier = TierClassifier::new(&nodes, &edges);
        assert_eq!(classifier.score(&nodes[0]), 0);
        assert_eq!(classifier.score(&nodes[1]), 0);
        let out = tiered(&nodes, &edges, &TopologyParams::new(), LayoutOptions::default());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_single_tier_is_one_row() {
        let nodes = vec![
            Node::new("a", "A", NodeKind::Server),
            Node::new("b", "B", NodeKind::Server),
            Node::new("c", "C", NodeKind::Server),
        ];
        let out = tiered(&nodes, &[], &TopologyParams::new(), LayoutOptions::default());
        let xs: Vec<f64> = out.iter().map(|n| n.position.x).collect();
        assert_eq!(xs, vec![140.0, 360.0, 580.0]);
        assert!(out.iter().all(|n| n.position.y == 120.0));
    }

    #[test]
    fn test_end_gap_shifts_last_in_row() {
        let nodes = vec![
            Node::new("a", "A", NodeKind::Server),
            Node::new("b", "B", NodeKind::Server),
        ];
        let params = TopologyParams::new().with("nodeSpacingX", 100);
        let out = tiered(&nodes, &[], &params, LayoutOptions { end_gap: true });
        assert_eq!(out[0].position.x, 140.0);
        assert_eq!(out[1].position.x, 340.0);
    }

    #[test]
    fn test_custom_spacing() {
        let nodes = vec![
            Node::new("w", "W", NodeKind::Switch),
            Node::new("s", "S", NodeKind::Server),
        ];
        let params = TopologyParams::new().with("layerGap", 100).with("nodeSpacingX", 50);
        let out = tiered(&nodes, &[], &params, LayoutOptions::default());
        assert_eq!(out[0].position, Position::new(140.0, 120.0));
        assert_eq!(out[1].position, Position::new(140.0, 220.0));
    }
}
