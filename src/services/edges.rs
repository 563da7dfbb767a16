use crate::models::{Edge, HandleDirection, HandleId, HandleSide};

/// Map one endpoint handle into the canonical `<side>-<in|out>` vocabulary.
/// Unrecognized non-empty values pass through untouched.
fn normalize_handle(value: Option<&str>, direction: HandleDirection) -> String {
    let value = value.unwrap_or("");
    if value.is_empty() {
        let fallback = match direction {
            HandleDirection::Out => HandleId::BOTTOM_OUT,
            HandleDirection::In => HandleId::TOP_IN,
        };
        return fallback.to_string();
    }
    if value.ends_with("-in") || value.ends_with("-out") {
        return value.to_string();
    }
    match HandleSide::parse(value) {
        Some(side) => HandleId::new(side, direction).to_string(),
        None => value.to_string(),
    }
}

/// Rewrite edge endpoint handles so storage never carries bare or missing
/// handles. Idempotent.
pub fn normalize_edges(edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .map(|edge| Edge {
            source_handle: Some(normalize_handle(
                edge.source_handle.as_deref(),
                HandleDirection::Out,
            )),
            target_handle: Some(normalize_handle(
                edge.target_handle.as_deref(),
                HandleDirection::In,
            )),
            ..edge.clone()
        })
        .collect()
}
