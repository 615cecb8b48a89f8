//! DOT format export for Graphviz visualization.
//!
//! Generates Graphviz DOT format for rendering graphs as images or interactive visualizations.

use crate::{Graph, GraphObject, Result};
use std::fmt::Display;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Fill color for nodes (hex color code)
    pub node_color: String,
    /// Append the node ID under the value in each label
    pub show_ids: bool,
    /// Label relations with their IDs
    pub label_relations: bool,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions {
            rankdir: "LR".to_string(),
            node_color: "#E0E0E0".to_string(),
            show_ids: false,
            label_relations: false,
        }
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot<V: Display>(graph: &Graph<V>) -> Result<String> {
    export_dot_styled(graph, DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
///
/// Detached relations are left out.
pub fn export_dot_styled<V: Display>(graph: &Graph<V>, options: DotOptions) -> Result<String> {
    let mut output = String::new();

    // Header
    output.push_str("digraph relgraph {\n");
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str("    node [style=filled];\n\n");

    for node in graph.nodes() {
        let mut label = match node.value() {
            Some(value) => escape_dot_label(&value.to_string()),
            None => escape_dot_label(node.id().as_str()),
        };
        if options.show_ids && node.value().is_some() {
            label.push_str(&format!("\\n{}", escape_dot_label(node.id().as_str())));
        }

        output.push_str(&format!(
            "    n{} [label=\"{label}\", fillcolor=\"{}\"];\n",
            node.key().0,
            options.node_color
        ));
    }

    output.push('\n');

    for relation in graph.relations() {
        if !graph.is_attached(relation.key())? {
            continue;
        }
        let label = if options.label_relations {
            format!(" [label=\"{}\"]", escape_dot_label(relation.id().as_str()))
        } else {
            String::new()
        };
        output.push_str(&format!(
            "    n{} -> n{}{label};\n",
            relation.from().0,
            relation.to().0
        ));
    }

    output.push_str("}\n");

    Ok(output)
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
