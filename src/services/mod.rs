pub mod batch;
pub mod edges;
pub mod editor;

pub use batch::{add_batch, add_node, planned_edge_count};
pub use edges::normalize_edges;
