//! Editing mutations on a [`GraphModel`].
//!
//! Every operation borrows the current model and returns the next one; the
//! caller swaps it in and commits the result to its history.

use crate::layout::layout_nodes;
use crate::models::{
    clamp_split_count, Edge, GraphModel, LayoutOptions, NodeKind, NodeLayout, TopologyType,
};

use super::batch::{self, DEFAULT_EDGE_LABEL};
use super::edges::normalize_edges;

/// Prepare a freshly loaded or imported document for editing.
///
/// Edges are normalized, nodes without a render mode get `grid` for
/// non-tree families and `tree` otherwise, and every family except
/// `custom` is laid out so stored positions never drift from the family's
/// placement rules. Custom graphs keep their hand-placed positions.
pub fn prepare_loaded(model: &GraphModel, options: LayoutOptions) -> GraphModel {
    let edges = normalize_edges(&model.edges);
    let default_layout = if model.topo_type.is_non_tree() {
        NodeLayout::Grid
    } else {
        NodeLayout::Tree
    };

    let mut nodes = model.nodes.clone();
    for node in &mut nodes {
        node.data.layout.get_or_insert(default_layout);
    }

    if model.topo_type != TopologyType::Custom {
        nodes = layout_nodes(&nodes, &edges, &model.topo_type, &model.topo_params, options);
    }

    GraphModel {
        nodes,
        edges,
        ..model.clone()
    }
}

/// Re-run the layout over the whole model.
pub fn auto_layout(model: &GraphModel, options: LayoutOptions) -> GraphModel {
    GraphModel {
        nodes: layout_nodes(
            &model.nodes,
            &model.edges,
            &model.topo_type,
            &model.topo_params,
            options,
        ),
        ..model.clone()
    }
}

pub fn add_node(model: &GraphModel, kind: NodeKind) -> GraphModel {
    let mut next = model.clone();
    next.nodes.push(batch::add_node(&model.nodes, kind));
    next
}

/// Connect two nodes with the canonical top-down handles.
/// Handles given by the rendering surface are normalized, not replaced.
pub fn connect(
    model: &GraphModel,
    source: &str,
    target: &str,
    source_handle: Option<&str>,
    target_handle: Option<&str>,
) -> GraphModel {
    let edge = Edge {
        id: format!("e-{}-{}-{}", source, target, model.edges.len() + 1),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: source_handle.map(String::from),
        target_handle: target_handle.map(String::from),
        label: Some(DEFAULT_EDGE_LABEL.to_string()),
        ..Default::default()
    };
    let mut next = model.clone();
    next.edges.extend(normalize_edges(&[edge]));
    next
}

/// Remove a node together with every edge touching it.
pub fn remove_node(model: &GraphModel, node_id: &str) -> GraphModel {
    GraphModel {
        nodes: model.nodes.iter().filter(|n| n.id != node_id).cloned().collect(),
        edges: model.edges.iter().filter(|e| !e.touches(node_id)).cloned().collect(),
        ..model.clone()
    }
}

pub fn remove_edge(model: &GraphModel, edge_id: &str) -> GraphModel {
    GraphModel {
        edges: model.edges.iter().filter(|e| e.id != edge_id).cloned().collect(),
        ..model.clone()
    }
}

pub fn set_tier(model: &GraphModel, node_id: &str, tier: i32) -> GraphModel {
    let mut next = model.clone();
    if let Some(node) = next.nodes.iter_mut().find(|n| n.id == node_id) {
        node.data.tier = Some(tier);
    }
    next
}

/// Change a patch panel's split count. Ignored for other kinds.
pub fn set_split_count(model: &GraphModel, node_id: &str, split_count: u32) -> GraphModel {
    let mut next = model.clone();
    if let Some(node) = next
        .nodes
        .iter_mut()
        .find(|n| n.id == node_id && n.data.kind == NodeKind::Patch)
    {
        node.data.split_count = Some(clamp_split_count(Some(split_count)));
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Position, TopologyParams};

    fn leaf_spine() -> GraphModel {
        GraphModel {
            name: "fabric".into(),
            topo_type: TopologyType::LeafSpine,
            topo_params: TopologyParams::new(),
            nodes: vec![
                Node::new("spine-1", "Spine 1", NodeKind::Switch).with_tier(3),
                Node::new("leaf-1", "Leaf 1", NodeKind::Switch).with_tier(2),
                Node::new("leaf-2", "Leaf 2", NodeKind::Switch).with_tier(2),
            ],
            edges: vec![
                Edge {
                    id: "e-leaf-1-spine-1".into(),
                    source: "leaf-1".into(),
                    target: "spine-1".into(),
                    source_handle: Some("top".into()),
                    target_handle: Some("bottom".into()),
                    ..Default::default()
                },
                Edge {
                    id: "e-leaf-2-spine-1".into(),
                    source: "leaf-2".into(),
                    target: "spine-1".into(),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_prepare_loaded_normalizes_and_lays_out() {
        let model = leaf_spine();
        let ready = prepare_loaded(&model, LayoutOptions::default());

        assert_eq!(ready.edges[0].source_handle.as_deref(), Some("top-out"));
        assert_eq!(ready.edges[0].target_handle.as_deref(), Some("bottom-in"));
        assert_eq!(ready.edges[1].source_handle.as_deref(), Some("bottom-out"));
        assert!(ready.nodes.iter().all(|n| n.data.layout == Some(NodeLayout::Tree)));
        assert_eq!(ready.node("spine-1").unwrap().position.y, 120.0);
        assert_eq!(ready.node("leaf-1").unwrap().position.y, 340.0);
        assert_eq!(ready.name, "fabric");
    }

    #[test]
    fn test_prepare_loaded_custom_keeps_positions() {
        let mut model = leaf_spine();
        model.topo_type = TopologyType::Custom;
        model.nodes[0].position = Position::new(7.0, 9.0);
        let ready = prepare_loaded(&model, LayoutOptions::default());
        assert_eq!(ready.nodes[0].position, Position::new(7.0, 9.0));
    }

    #[test]
    fn test_prepare_loaded_grid_mode_for_non_tree() {
        let model = GraphModel {
            topo_type: TopologyType::Mesh,
            nodes: vec![Node::new("n-1-1", "Node 1,1", NodeKind::Switch)],
            ..Default::default()
        };
        let ready = prepare_loaded(&model, LayoutOptions::default());
        assert_eq!(ready.nodes[0].data.layout, Some(NodeLayout::Grid));
        assert_eq!(ready.nodes[0].position, Position::new(320.0, 260.0));
    }

    #[test]
    fn test_remove_node_cascades_edges() {
        let next = remove_node(&leaf_spine(), "spine-1");
        assert_eq!(next.nodes.len(), 2);
        assert!(next.edges.is_empty());
    }

    #[test]
    fn test_remove_edge() {
        let next = remove_edge(&leaf_spine(), "e-leaf-1-spine-1");
        assert_eq!(next.edges.len(), 1);
        assert_eq!(next.nodes.len(), 3);
    }

    #[test]
    fn test_connect_normalizes_handles() {
        let next = connect(&leaf_spine(), "spine-1", "leaf-2", Some("right"), None);
        let edge = next.edges.last().unwrap();
        assert_eq!(edge.source_handle.as_deref(), Some("right-out"));
        assert_eq!(edge.target_handle.as_deref(), Some("top-in"));
        assert_eq!(edge.label.as_deref(), Some("link"));
        assert!(next.edges[..2].iter().all(|e| e.id != edge.id));
    }

    #[test]
    fn test_set_tier_and_split_count() {
        let mut model = leaf_spine();
        model.nodes.push(Node::new("pp", "Patch Panel 1", NodeKind::Patch));
        let next = set_tier(&model, "leaf-1", 1);
        assert_eq!(next.node("leaf-1").unwrap().data.tier, Some(1));

        let next = set_split_count(&next, "pp", 1);
        assert_eq!(next.node("pp").unwrap().data.split_count, Some(2));
        let next = set_split_count(&next, "leaf-1", 16);
        assert_eq!(next.node("leaf-1").unwrap().data.split_count, None);
    }

    #[test]
    fn test_add_node_and_auto_layout() {
        let model = add_node(&GraphModel::default(), NodeKind::Rack);
        assert_eq!(model.nodes.len(), 1);
        let laid_out = auto_layout(&model, LayoutOptions::default());
        assert_eq!(laid_out.nodes[0].position, Position::new(140.0, 120.0));
    }
}
