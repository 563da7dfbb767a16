//! Deterministic placement of topology nodes.
//!
//! `layout_nodes` picks a [`LayoutFamily`] from the topology type and returns
//! a copy of the input nodes with new positions. Ids, data and order are
//! untouched. Structured families decode grid coordinates from node ids;
//! everything else goes through the generic tiered layout.

mod grid;
mod tiers;

pub use tiers::TierClassifier;

use crate::models::{Edge, LayoutOptions, Node, TopologyParams, TopologyType};

/// Left margin of every layout
pub const ORIGIN_X: f64 = 140.0;
/// Top margin of every layout
pub const ORIGIN_Y: f64 = 120.0;

/// Placement strategy, one per structural topology family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFamily {
    /// `n-<row>-<col>` on a flat grid (torus-2d, mesh)
    Grid2d,
    /// `n-<i>-<j>-<k>` with z-layers side by side (torus-3d)
    Grid3d,
    /// `g<group>-r<router>` grouped sub-grids
    Dragonfly,
    /// `s<stage>-n<index>` stages as rows
    Butterfly,
    /// Tier rows ordered by connectivity (trees, custom, unknown)
    Tiered,
}

impl LayoutFamily {
    pub fn for_topology(topo_type: &TopologyType) -> Self {
        match topo_type {
            TopologyType::Torus2d | TopologyType::Mesh => Self::Grid2d,
            TopologyType::Torus3d => Self::Grid3d,
            TopologyType::Dragonfly => Self::Dragonfly,
            TopologyType::Butterfly => Self::Butterfly,
            _ => Self::Tiered,
        }
    }
}

/// Assign positions to `nodes` according to the topology family.
pub fn layout_nodes(
    nodes: &[Node],
    edges: &[Edge],
    topo_type: &TopologyType,
    params: &TopologyParams,
    options: LayoutOptions,
) -> Vec<Node> {
    let family = LayoutFamily::for_topology(topo_type);
    tracing::debug!(
        "Laying out {} nodes / {} edges as {:?} ({})",
        nodes.len(),
        edges.len(),
        family,
        topo_type
    );

    match family {
        LayoutFamily::Grid2d => grid::grid_2d(nodes, params),
        LayoutFamily::Grid3d => grid::grid_3d(nodes, params),
        LayoutFamily::Dragonfly => grid::dragonfly(nodes, params),
        LayoutFamily::Butterfly => grid::butterfly(nodes, params),
        LayoutFamily::Tiered => tiers::tiered(nodes, edges, params, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeKind, Position};

    fn sample_tree() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![
            Node::new("spine-1", "Spine 1", NodeKind::Switch),
            Node::new("spine-2", "Spine 2", NodeKind::Switch),
            Node::new("leaf-1", "Leaf 1", NodeKind::Rack),
            Node::new("leaf-2", "Leaf 2", NodeKind::Rack),
            Node::new("srv-1", "Server 1", NodeKind::Server),
        ];
        let edges = vec![
            Edge::link("e1", "leaf-1", "spine-1", "link"),
            Edge::link("e2", "leaf-1", "spine-2", "link"),
            Edge::link("e3", "leaf-2", "spine-1", "link"),
            Edge::link("e4", "leaf-1", "srv-1", "link"),
        ];
        (nodes, edges)
    }

    #[test]
    fn test_family_dispatch() {
        assert_eq!(LayoutFamily::for_topology(&TopologyType::Torus2d), LayoutFamily::Grid2d);
        assert_eq!(LayoutFamily::for_topology(&TopologyType::Mesh), LayoutFamily::Grid2d);
        assert_eq!(LayoutFamily::for_topology(&TopologyType::Torus3d), LayoutFamily::Grid3d);
        assert_eq!(LayoutFamily::for_topology(&TopologyType::Dragonfly), LayoutFamily::Dragonfly);
        assert_eq!(LayoutFamily::for_topology(&TopologyType::Butterfly), LayoutFamily::Butterfly);
        assert_eq!(LayoutFamily::for_topology(&TopologyType::LeafSpine), LayoutFamily::Tiered);
        assert_eq!(LayoutFamily::for_topology(&TopologyType::Ring), LayoutFamily::Tiered);
        assert_eq!(
            LayoutFamily::for_topology(&TopologyType::from("hypercube")),
            LayoutFamily::Tiered
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        let (nodes, edges) = sample_tree();
        let params = TopologyParams::new();
        for topo in ["custom", "leaf-spine", "torus-2d", "dragonfly", "butterfly", "torus-3d"] {
            let topo = TopologyType::from(topo);
            let a = layout_nodes(&nodes, &edges, &topo, &params, LayoutOptions::default());
            let b = layout_nodes(&nodes, &edges, &topo, &params, LayoutOptions::default());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_layout_only_moves_positions() {
        let (nodes, edges) = sample_tree();
        let out = layout_nodes(
            &nodes,
            &edges,
            &TopologyType::Custom,
            &TopologyParams::new(),
            LayoutOptions::default(),
        );
        assert_eq!(out.len(), nodes.len());
        for (before, after) in nodes.iter().zip(&out) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.data, after.data);
            assert_eq!(before.extra, after.extra);
        }
    }

    #[test]
    fn test_unknown_type_uses_tiers() {
        let (nodes, edges) = sample_tree();
        let params = TopologyParams::new();
        let unknown = layout_nodes(
            &nodes,
            &edges,
            &TopologyType::from("hypercube"),
            &params,
            LayoutOptions::default(),
        );
        let custom = layout_nodes(&nodes, &edges, &TopologyType::Custom, &params, LayoutOptions::default());
        assert_eq!(unknown, custom);
    }

    #[test]
    fn test_torus_2d_scenario() {
        let nodes = vec![
            Node::new("n-0-0", "", NodeKind::Switch).with_tier(1),
            Node::new("n-0-1", "", NodeKind::Switch).with_tier(1),
        ];
        let params = TopologyParams::new()
            .with("rows", 1)
            .with("cols", 2)
            .with("nodeSpacingX", 180)
            .with("layerGap", 140);
        let out = layout_nodes(&nodes, &[], &TopologyType::Torus2d, &params, LayoutOptions::default());
        assert_eq!(out[0].position, Position::new(140.0, 120.0));
        assert_eq!(out[1].position, Position::new(320.0, 120.0));
    }
}
