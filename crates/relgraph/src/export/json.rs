//! JSON snapshot export.
//!
//! Produces `{"nodes": [...], "relations": [...]}` with IDs, values, and
//! endpoints, in creation order.

use crate::error::GraphError;
use crate::{Graph, GraphObject, Node, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// Export graph to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`GraphError::Serialization`] if a node value cannot be serialized.
pub fn export_json<V: Serialize>(graph: &Graph<V>) -> Result<String> {
    export_json_filtered(graph, |_| true)
}

/// Export the nodes matching `node_filter` and the attached relations between
/// them.
///
/// # Errors
///
/// Returns [`GraphError::Serialization`] if a node value cannot be serialized.
pub fn export_json_filtered<V: Serialize>(
    graph: &Graph<V>,
    node_filter: impl Fn(&Node<V>) -> bool,
) -> Result<String> {
    let mut nodes_array = Vec::new();
    let mut kept = Vec::new();

    for node in graph.nodes().filter(|node| node_filter(node)) {
        nodes_array.push(node_to_json(node)?);
        kept.push(node.key());
    }

    let mut relations_array = Vec::new();
    for relation in graph.relations() {
        if !kept.contains(&relation.from()) || !kept.contains(&relation.to()) {
            continue;
        }
        if !graph.is_attached(relation.key())? {
            continue;
        }
        relations_array.push(json!({
            "id": relation.id(),
            "from": graph.node(relation.from())?.id(),
            "to": graph.node(relation.to())?.id(),
        }));
    }

    let result = json!({
        "nodes": nodes_array,
        "relations": relations_array,
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| GraphError::serialization("Failed to serialize graph", Some(e)))
}

fn node_to_json<V: Serialize>(node: &Node<V>) -> Result<Value> {
    let value = serde_json::to_value(node.value())
        .map_err(|e| GraphError::serialization("Failed to serialize node value", Some(e)))?;
    Ok(json!({
        "id": node.id(),
        "value": value,
        "incoming": node.incoming().len(),
        "outgoing": node.outgoing().len(),
    }))
}
