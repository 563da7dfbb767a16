//! Structured families whose coordinates are encoded in the node id.
//!
//! Ids that do not match their family pattern resolve to index 0 so a
//! hand-edited or corrupt import still renders.

use regex_lite::Regex;
use std::sync::OnceLock;

use super::{ORIGIN_X, ORIGIN_Y};
use crate::models::{Node, Position, TopologyParams};

static GRID_2D_ID: OnceLock<Option<Regex>> = OnceLock::new();
static GRID_3D_ID: OnceLock<Option<Regex>> = OnceLock::new();
static DRAGONFLY_ID: OnceLock<Option<Regex>> = OnceLock::new();
static BUTTERFLY_ID: OnceLock<Option<Regex>> = OnceLock::new();

/// Numeric captures of `id` against `pattern`, or all zeros when it does not match.
fn id_indices<const N: usize>(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: &str,
    id: &str,
) -> [usize; N] {
    let mut out = [0usize; N];
    let re = cell.get_or_init(|| Regex::new(pattern).ok());
    let Some(caps) = re.as_ref().and_then(|re| re.captures(id)) else {
        return out;
    };
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = caps
            .get(i + 1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
    }
    out
}

fn place(nodes: &[Node], mut position_of: impl FnMut(&Node) -> Position) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| Node {
            position: position_of(node),
            ..node.clone()
        })
        .collect()
}

/// torus-2d / mesh: `n-<row>-<col>`
pub(super) fn grid_2d(nodes: &[Node], params: &TopologyParams) -> Vec<Node> {
    let spacing_x = params.number_or("nodeSpacingX", 180.0);
    let spacing_y = params.number_or("layerGap", 140.0);

    place(nodes, |node| {
        let [row, col] = id_indices::<2>(&GRID_2D_ID, r"^n-(\d+)-(\d+)$", &node.id);
        Position::new(
            ORIGIN_X + col as f64 * spacing_x,
            ORIGIN_Y + row as f64 * spacing_y,
        )
    })
}

/// torus-3d: `n-<i>-<j>-<k>`, each z-layer shifted right by `layerGap3d`
pub(super) fn grid_3d(nodes: &[Node], params: &TopologyParams) -> Vec<Node> {
    let z_count = params.count_or("z", 3);
    let spacing_x = params.number_or("nodeSpacingX", 160.0);
    let spacing_y = params.number_or("layerGap", 120.0);
    let layer_gap = params.number_or("layerGap3d", 260.0);

    place(nodes, |node| {
        let [i, j, k] = id_indices::<3>(&GRID_3D_ID, r"^n-(\d+)-(\d+)-(\d+)$", &node.id);
        let layer_x = (k % z_count) as f64 * layer_gap;
        Position::new(
            ORIGIN_X + layer_x + i as f64 * spacing_x,
            ORIGIN_Y + j as f64 * spacing_y,
        )
    })
}

/// Columns of a square-ish grid holding `count` cells
fn square_cols(count: usize) -> usize {
    ((count as f64).sqrt().ceil() as usize).max(1)
}

/// dragonfly: `g<group>-r<router>`, 1-based in the id
pub(super) fn dragonfly(nodes: &[Node], params: &TopologyParams) -> Vec<Node> {
    let group_cols = square_cols(params.count_or("groups", 3));
    let router_cols = square_cols(params.count_or("routers_per_group", 4));
    let group_gap_x = params.number_or("groupGapX", 320.0);
    let group_gap_y = params.number_or("layerGap", 260.0);
    let spacing_x = params.number_or("nodeSpacingX", 120.0);
    let spacing_y = params.number_or("nodeSpacingY", 90.0);

    place(nodes, |node| {
        let [g, r] = id_indices::<2>(&DRAGONFLY_ID, r"^g(\d+)-r(\d+)$", &node.id);
        let (g, r) = (g.saturating_sub(1), r.saturating_sub(1));
        let (group_row, group_col) = (g / group_cols, g % group_cols);
        let (local_row, local_col) = (r / router_cols, r % router_cols);
        Position::new(
            ORIGIN_X + group_col as f64 * group_gap_x + local_col as f64 * spacing_x,
            ORIGIN_Y + group_row as f64 * group_gap_y + local_row as f64 * spacing_y,
        )
    })
}

/// butterfly: `s<stage>-n<index>`, 1-based in the id
pub(super) fn butterfly(nodes: &[Node], params: &TopologyParams) -> Vec<Node> {
    let spacing_x = params.number_or("nodeSpacingX", 180.0);
    let spacing_y = params.number_or("layerGap", 140.0);

    place(nodes, |node| {
        let [stage, index] = id_indices::<2>(&BUTTERFLY_ID, r"^s(\d+)-n(\d+)$", &node.id);
        Position::new(
            ORIGIN_X + index.saturating_sub(1) as f64 * spacing_x,
            ORIGIN_Y + stage.saturating_sub(1) as f64 * spacing_y,
        )
    })
}
