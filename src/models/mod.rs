mod graph;
mod topology;

pub use graph::*;
pub use topology::*;
